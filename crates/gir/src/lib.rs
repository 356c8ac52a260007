//! # GIR
//!
//! A small, SSA-style function IR that is optimized by `gir-opt`.
//!
//! A [Module] owns all functions, blocks and instructions in three arenas. Every entity is
//! addressed by a versioned key ([FuncRef], [BlockRef], [InstRef]). Once an entity is deleted its key
//! stays invalid forever, so a stale key can't alias a newer entity. Accessors therefore return
//! `Option`s instead of panicking, passes can hold keys across mutations and check them later.
//!
//! Instructions track their operands _and_ their users, which makes "is this value still used?" an O(1)
//! question. See [util::dead_inst_elimination] for the deletion utility built on top of that.
use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

pub mod builder;
pub mod display;
pub mod err;
mod function;
mod inst;
mod span;
pub mod util;

pub use function::{Block, Function};
pub use inst::{ApplySite, InstKind, Instruction, Ty};
pub use span::Span;

pub use slotmap;
pub use smallvec;

new_key_type! {pub struct FuncRef;}
new_key_type! {pub struct BlockRef;}
new_key_type! {pub struct InstRef;}

///Small collection that is used throughout the IR, mostly for operands, users and substitutions.
pub type SmallColl<T> = SmallVec<[T; 3]>;

pub struct Module {
    pub name: String,
    pub(crate) functions: SlotMap<FuncRef, Function>,
    pub(crate) blocks: SlotMap<BlockRef, Block>,
    pub(crate) insts: SlotMap<InstRef, Instruction>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            functions: SlotMap::default(),
            blocks: SlotMap::default(),
            insts: SlotMap::default(),
        }
    }

    pub fn function(&self, f: FuncRef) -> Option<&Function> {
        self.functions.get(f)
    }

    pub fn function_mut(&mut self, f: FuncRef) -> Option<&mut Function> {
        self.functions.get_mut(f)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FuncRef, &Function)> {
        self.functions.iter()
    }

    ///Finds the first function called `name`.
    pub fn function_by_name(&self, name: &str) -> Option<FuncRef> {
        self.functions
            .iter()
            .find(|(_, f)| f.name == name)
            .map(|(fref, _)| fref)
    }

    pub fn block(&self, b: BlockRef) -> Option<&Block> {
        self.blocks.get(b)
    }

    pub fn inst(&self, i: InstRef) -> Option<&Instruction> {
        self.insts.get(i)
    }

    pub fn inst_mut(&mut self, i: InstRef) -> Option<&mut Instruction> {
        self.insts.get_mut(i)
    }

    ///True if `i` still names a live instruction.
    pub fn contains_inst(&self, i: InstRef) -> bool {
        self.insts.contains_key(i)
    }

    ///Returns the function `i` is placed in.
    pub fn function_of(&self, i: InstRef) -> Option<FuncRef> {
        let inst = self.insts.get(i)?;
        self.blocks.get(inst.block).map(|b| b.function)
    }

    ///All instructions of `f` in block, then execution order. Returns an owned list, so the module can be
    /// mutated while iterating it.
    pub fn function_insts(&self, f: FuncRef) -> Vec<InstRef> {
        let Some(func) = self.functions.get(f) else {
            return Vec::with_capacity(0);
        };
        func.blocks
            .iter()
            .filter_map(|b| self.blocks.get(*b))
            .flat_map(|b| b.insts.iter().cloned())
            .collect()
    }

    ///Returns the function an apply calls, if the callee is statically known. This is the case if
    /// the apply's callee operand is a `function_ref` of a still existing function.
    pub fn referenced_function(&self, apply: InstRef) -> Option<FuncRef> {
        let inst = self.insts.get(apply)?;
        if !inst.is_apply() {
            return None;
        }
        let callee = inst.operands.first()?;
        match self.insts.get(*callee)?.kind {
            InstKind::FunctionRef(f) if self.functions.contains_key(f) => Some(f),
            _ => None,
        }
    }
}

impl Index<FuncRef> for Module {
    type Output = Function;
    fn index(&self, index: FuncRef) -> &Self::Output {
        self.function(index).unwrap()
    }
}

impl IndexMut<FuncRef> for Module {
    fn index_mut(&mut self, index: FuncRef) -> &mut Self::Output {
        self.function_mut(index).unwrap()
    }
}

impl Index<BlockRef> for Module {
    type Output = Block;
    fn index(&self, index: BlockRef) -> &Self::Output {
        self.block(index).unwrap()
    }
}

impl Index<InstRef> for Module {
    type Output = Instruction;
    fn index(&self, index: InstRef) -> &Self::Output {
        self.inst(index).unwrap()
    }
}

impl IndexMut<InstRef> for Module {
    fn index_mut(&mut self, index: InstRef) -> &mut Self::Output {
        self.inst_mut(index).unwrap()
    }
}
