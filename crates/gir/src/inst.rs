/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Instructions of the IR. Each instruction is a node in the def/use graph of a function.

use std::fmt::Display;

use crate::{BlockRef, FuncRef, InstRef, SmallColl, Span};

///A concrete (or still generic) type as it appears in a type substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ty {
    pub name: String,
}

impl Ty {
    pub fn named(name: impl Into<String>) -> Self {
        Ty { name: name.into() }
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

///Payload of an `apply` instruction.
///
/// The callee is _not_ stored here. It is the apply's first operand, which makes it statically known only
/// if that operand is a [InstKind::FunctionRef]. See [Module::referenced_function](crate::Module::referenced_function).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplySite {
    ///Bindings of the callee's generic parameters.
    pub substitutions: SmallColl<Ty>,
    ///False for calls the optimizer must not touch, for instance dynamically replaceable
    /// or ABI constrained calls.
    pub can_optimize: bool,
}

impl ApplySite {
    pub fn new(substitutions: impl IntoIterator<Item = Ty>) -> Self {
        ApplySite {
            substitutions: substitutions.into_iter().collect(),
            can_optimize: true,
        }
    }

    pub fn with_can_optimize(mut self, can_optimize: bool) -> Self {
        self.can_optimize = can_optimize;
        self
    }

    pub fn has_substitutions(&self) -> bool {
        !self.substitutions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstKind {
    ///The n-th argument of the function.
    Argument(usize),
    Literal(i64),
    FunctionRef(FuncRef),
    AllocStack(Ty),
    DeallocStack,
    ///Stores operand 0 to the address operand 1.
    Store,
    Load,
    DebugValue(String),
    ///Call of operand 0 with the remaining operands as arguments.
    Apply(ApplySite),
    Return,
}

impl InstKind {
    ///True if the instruction must not be removed just because its result is unused.
    pub fn has_side_effects(&self) -> bool {
        match self {
            InstKind::Argument(_)
            | InstKind::Store
            | InstKind::DeallocStack
            | InstKind::Apply(_)
            | InstKind::Return => true,
            InstKind::Literal(_)
            | InstKind::FunctionRef(_)
            | InstKind::AllocStack(_)
            | InstKind::Load
            | InstKind::DebugValue(_) => false,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            InstKind::Argument(_) => "argument",
            InstKind::Literal(_) => "literal",
            InstKind::FunctionRef(_) => "function_ref",
            InstKind::AllocStack(_) => "alloc_stack",
            InstKind::DeallocStack => "dealloc_stack",
            InstKind::Store => "store",
            InstKind::Load => "load",
            InstKind::DebugValue(_) => "debug_value",
            InstKind::Apply(_) => "apply",
            InstKind::Return => "return",
        }
    }
}

pub struct Instruction {
    pub kind: InstKind,
    pub span: Option<Span>,
    pub(crate) block: BlockRef,
    pub(crate) operands: SmallColl<InstRef>,
    ///One entry per use. An instruction that uses this value twice is listed twice.
    pub(crate) users: SmallColl<InstRef>,
}

impl Instruction {
    pub fn block(&self) -> BlockRef {
        self.block
    }

    pub fn operands(&self) -> &[InstRef] {
        &self.operands
    }

    pub fn users(&self) -> &[InstRef] {
        &self.users
    }

    pub fn use_count(&self) -> usize {
        self.users.len()
    }

    pub fn has_uses(&self) -> bool {
        !self.users.is_empty()
    }

    pub fn apply_site(&self) -> Option<&ApplySite> {
        if let InstKind::Apply(site) = &self.kind {
            Some(site)
        } else {
            None
        }
    }

    pub fn apply_site_mut(&mut self) -> Option<&mut ApplySite> {
        if let InstKind::Apply(site) = &mut self.kind {
            Some(site)
        } else {
            None
        }
    }

    pub fn is_apply(&self) -> bool {
        self.apply_site().is_some()
    }
}
