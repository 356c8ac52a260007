use thiserror::Error;

use crate::{BlockRef, FuncRef, InstRef};

///Errors that happen when operating on the module directly. For instance when trying to delete an
/// instruction that is still used, or accessing an entity that was deleted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("The function {0:?} is invalid. It might have been deleted since its creation.")]
    InvalidFunction(FuncRef),
    #[error("The block {0:?} is invalid. It might have been deleted since its creation.")]
    InvalidBlock(BlockRef),
    #[error("The instruction {0:?} is invalid. It might have been deleted since its creation.")]
    InvalidInst(InstRef),
    #[error("Instruction {inst:?} still has {uses} use(s) and can not be removed")]
    InstHasUses { inst: InstRef, uses: usize },
}
