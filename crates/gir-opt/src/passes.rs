//! All passes of the optimizer.

pub mod generic_specializer;
