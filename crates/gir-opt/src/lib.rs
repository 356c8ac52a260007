//! # GIR-Opt
//!
//! Function level optimizer for [gir].
//!
//! Passes implement [FunctionTransform] and are driven by the [PassManager](pass_manager::PassManager), which owns
//! the list of functions that are still waiting for optimization.
//!
//! ### Generic specializer
//!
//! The main pass of this crate. Finds calls to generic functions with concrete type substitutions and lets a
//! [SpecializationEngine](engine::SpecializationEngine) replace them with calls to type-concrete clones.
//! See [GenericSpecializer](passes::generic_specializer::GenericSpecializer).

use gir::{FuncRef, Module};

pub mod config;
pub mod engine;
mod error;
pub mod pass_manager;
pub mod passes;
pub mod remark;
pub mod schedule;
pub mod worklist;

pub use error::OptError;
pub use schedule::Reschedule;

///Which cached analyses of a function are no longer valid after a pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Invalidation {
    Nothing,
    Everything,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub invalidation: Invalidation,
    ///Functions that should be optimized (again), because this pass created them.
    pub reschedule: Vec<Reschedule>,
}

impl TransformResult {
    pub fn unchanged() -> Self {
        TransformResult {
            invalidation: Invalidation::Nothing,
            reschedule: Vec::with_capacity(0),
        }
    }
}

///A pass that transforms a single function at a time. It might create new functions in the module, but must only
/// mutate the function it is run on.
pub trait FunctionTransform {
    fn name(&self) -> &'static str;
    fn run(&mut self, module: &mut Module, function: FuncRef) -> Result<TransformResult, OptError>;
}
