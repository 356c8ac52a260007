/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Specializes calls to generic functions by substituting static type information.
//!
//! The pass works in two decoupled phases per function:
//!
//! 1. All candidates (applies with substitutions and a visible, statically known callee) are collected into a
//!    [WorkSet](crate::worklist::WorkSet) in execution order.
//! 2. Candidates are popped front to back. Each one is checked again, then handed to the
//!    [SpecializationEngine]. Whatever the engine reports as dead is deleted immediately, including producers
//!    that become unused, and removed from the work set. Functions the engine created are returned as
//!    [Reschedule] requests, so the host can optimize them later.
//!
//! Since all identities are arena keys, deleting instructions never invalidates the work set. A deleted instruction
//! simply is not part of it anymore.

use gir::{FuncRef, InstRef, Module};

use crate::{
    config::SpecializerConfig,
    engine::SpecializationEngine,
    remark::{LogRemarks, RemarkSink},
    FunctionTransform, Invalidation, OptError, Reschedule, TransformResult,
};

mod cascade;
mod candidate;
mod invoke;
mod reschedule;

pub use candidate::{collect_candidates, is_attemptable, is_candidate};
pub use cascade::drain;
pub use reschedule::notify;

use invoke::{invoke, AttemptOutcome};

pub const PASS_NAME: &str = "generic-specializer";

///Counters of a single run on one function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecializeStats {
    pub candidates: usize,
    ///Candidates that were not attemptable anymore when their turn came.
    pub skipped: usize,
    ///Candidates the engine declined.
    pub declined: usize,
    ///Candidates replaced by a call to an existing specialization.
    pub reused: usize,
    ///Candidates replaced by a call to a new specialization.
    pub specialized: usize,
    ///All deleted instructions, including transitively dead ones.
    pub deleted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecializeOutcome {
    ///True if the function's IR was mutated.
    pub changed: bool,
    pub reschedule: Vec<Reschedule>,
    pub stats: SpecializeStats,
}

pub struct GenericSpecializer<E: SpecializationEngine, R: RemarkSink = LogRemarks> {
    pub config: SpecializerConfig,
    engine: E,
    remarks: R,
}

impl<E: SpecializationEngine> GenericSpecializer<E, LogRemarks> {
    pub fn new(engine: E) -> Self {
        Self::with_remarks(engine, LogRemarks)
    }
}

impl<E: SpecializationEngine, R: RemarkSink> GenericSpecializer<E, R> {
    pub fn with_remarks(engine: E, remarks: R) -> Self {
        GenericSpecializer {
            config: SpecializerConfig::from_env(),
            engine,
            remarks,
        }
    }

    pub fn with_config(mut self, config: SpecializerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn remarks(&self) -> &R {
        &self.remarks
    }

    pub fn into_parts(self) -> (E, R) {
        (self.engine, self.remarks)
    }

    ///Specializes all applies of generic functions in `function`.
    ///
    /// Only fails if `function` does not exist. Anything that goes wrong for a single apply leaves that apply
    /// untouched, which is always valid.
    pub fn specialize_applies_in_function(
        &mut self,
        module: &mut Module,
        function: FuncRef,
    ) -> Result<SpecializeOutcome, OptError> {
        let func = module
            .function(function)
            .ok_or(OptError::InvalidFunction(function))?;
        let mut outcome = SpecializeOutcome::default();

        //TODO: handle functions in ownership form once the engine can clone them.
        if self.config.skip_ownership_functions && func.has_ownership {
            #[cfg(feature = "log")]
            log::debug!("skipping {}, it is in ownership form", func.name);
            return Ok(outcome);
        }

        #[cfg(feature = "log")]
        log::debug!("{PASS_NAME} on function: {}", func.name);

        let mut applies = collect_candidates(
            module,
            function,
            &mut self.remarks,
            self.config.report_missing_definitions,
        );
        outcome.stats.candidates = applies.len();

        while let Some(apply) = applies.pop_front() {
            if !self.attemptable(module, apply) {
                outcome.stats.skipped += 1;
                continue;
            }
            let Some(callee) = module.referenced_function(apply) else {
                outcome.stats.skipped += 1;
                continue;
            };

            if self.config.dump_functions {
                #[cfg(feature = "log")]
                log::debug!(
                    "specialize: {}\n{}",
                    module[callee].name,
                    module.display_function(function)
                );
            }

            let (mut dead, new_functions) =
                match invoke(&mut self.engine, module, apply, &mut self.remarks) {
                    AttemptOutcome::Declined => {
                        outcome.stats.declined += 1;
                        continue;
                    }
                    AttemptOutcome::Reused { dead } => {
                        outcome.stats.reused += 1;
                        (dead, Default::default())
                    }
                    AttemptOutcome::Specialized {
                        dead,
                        new_functions,
                    } => {
                        outcome.stats.specialized += 1;
                        (dead, new_functions)
                    }
                };

            //Delete right away, the engine must never see (and clone) dead applies
            //when specializing recursively.
            //A non-empty dead set means the engine already rewrote the function, even if nothing
            //could be deleted below.
            if !dead.is_empty() {
                outcome.changed = true;
            }
            outcome.stats.deleted += drain(module, function, &mut dead, &mut applies);

            notify(
                &new_functions,
                callee,
                self.config.reschedule_order,
                &mut outcome.reschedule,
            );
        }

        #[cfg(feature = "log")]
        log::info!(
            "{PASS_NAME}: {} candidate(s), {} specialized, {} reused, {} declined, {} skipped, {} deleted",
            outcome.stats.candidates,
            outcome.stats.specialized,
            outcome.stats.reused,
            outcome.stats.declined,
            outcome.stats.skipped,
            outcome.stats.deleted
        );

        Ok(outcome)
    }

    fn attemptable(&self, module: &Module, apply: InstRef) -> bool {
        //the engine may delete pending candidates without reporting them
        if !module.contains_inst(apply) {
            #[cfg(feature = "log")]
            log::debug!("{apply:?} was deleted while pending, skipping");
            return false;
        }
        //live entries are always candidates, so this only fails on a collection bug
        match is_attemptable(module, apply) {
            Ok(attemptable) => attemptable,
            Err(e) => {
                #[cfg(feature = "log")]
                log::error!("invalid entry in specializer work set: {e}");
                debug_assert!(false, "invalid entry in specializer work set: {e}");
                false
            }
        }
    }
}

impl<E: SpecializationEngine, R: RemarkSink> FunctionTransform for GenericSpecializer<E, R> {
    fn name(&self) -> &'static str {
        PASS_NAME
    }

    fn run(&mut self, module: &mut Module, function: FuncRef) -> Result<TransformResult, OptError> {
        let outcome = self.specialize_applies_in_function(module, function)?;
        Ok(TransformResult {
            invalidation: if outcome.changed {
                Invalidation::Everything
            } else {
                Invalidation::Nothing
            },
            reschedule: outcome.reschedule,
        })
    }
}
