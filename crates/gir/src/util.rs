//! Graph utilities that operate on a whole [Module](crate::Module).

pub mod dead_inst_elimination;
