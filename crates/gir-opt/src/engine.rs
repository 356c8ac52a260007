//! Interface to the engine that builds specialized functions.
//!
//! The optimizer only decides _which_ calls are specialized. _How_ a type-concrete clone is built (substitution,
//! cloning, layout) is up to the engine.

use gir::{FuncRef, InstRef, Module, SmallColl};
use smallvec::SmallVec;

use crate::{remark::RemarkSink, OptError};

///Instructions that became dead by a specialization. Consumed LIFO.
pub type DeadSet = SmallVec<[InstRef; 4]>;
///Functions created by a single specialization.
pub type NewFunctions = SmallColl<FuncRef>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Specialization {
    ///On success, contains at least the specialized apply, which must not have users anymore.
    pub dead: DeadSet,
    ///Empty if an already existing specialization was reused.
    pub new_functions: NewFunctions,
}

impl Specialization {
    ///The engine declined, nothing was changed.
    pub fn declined() -> Self {
        Self::default()
    }

    pub fn is_declined(&self) -> bool {
        self.dead.is_empty() && self.new_functions.is_empty()
    }
}

pub trait SpecializationEngine {
    ///Tries to replace `apply` with a call to a specialization of its callee.
    ///
    /// `apply` is guaranteed to be a live, optimizable apply with a statically known, optimizable callee.
    /// Declining is not an error, return [Specialization::declined] in that case. An `Err` is treated like a
    /// decline by the caller, but reported as an internal error.
    ///
    /// For a given callee and substitution the engine must be deterministic, and reuse specializations it
    /// created before.
    fn try_specialize(
        &mut self,
        module: &mut Module,
        apply: InstRef,
        remarks: &mut dyn RemarkSink,
    ) -> Result<Specialization, OptError>;
}

impl<T: SpecializationEngine + ?Sized> SpecializationEngine for &mut T {
    fn try_specialize(
        &mut self,
        module: &mut Module,
        apply: InstRef,
        remarks: &mut dyn RemarkSink,
    ) -> Result<Specialization, OptError> {
        (**self).try_specialize(module, apply, remarks)
    }
}
