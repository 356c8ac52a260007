use crate::{BlockRef, FuncRef, InstRef};

///A function of the module. A function without blocks is only _declared_, its body is not visible
/// to the optimizer.
pub struct Function {
    pub name: String,
    ///True if the optimizer is allowed to touch this function (or clone its body).
    pub should_optimize: bool,
    ///True if the function is still in ownership form.
    pub has_ownership: bool,
    pub(crate) blocks: Vec<BlockRef>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            should_optimize: true,
            has_ownership: false,
            blocks: Vec::with_capacity(0),
        }
    }

    ///True if the body of the function is present.
    pub fn is_definition(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[BlockRef] {
        &self.blocks
    }
}

///Basic block. Instructions are kept in execution order.
pub struct Block {
    pub(crate) function: FuncRef,
    pub(crate) insts: Vec<InstRef>,
}

impl Block {
    pub fn function(&self) -> FuncRef {
        self.function
    }

    pub fn insts(&self) -> &[InstRef] {
        &self.insts
    }
}
