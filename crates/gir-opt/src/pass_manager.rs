/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Minimal function pass manager. Owns the worklist of functions that still need to be optimized, and feeds the
//! functions passes create back into it.

use std::collections::VecDeque;

use ahash::AHashSet;
use gir::{FuncRef, Module};

use crate::{schedule::Scheduler, FunctionTransform, Invalidation, OptError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassManagerStats {
    ///Number of times a pass was run on a function.
    pub runs: usize,
    ///Number of runs that changed their function.
    pub changed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFunction {
    pub function: FuncRef,
    ///The function whose specialization created `function`, if any.
    pub origin: Option<FuncRef>,
}

#[derive(Default)]
pub struct PassManager {
    worklist: VecDeque<PendingFunction>,
    invalidated: AHashSet<FuncRef>,
    ///Every function that was run, in run order.
    history: Vec<PendingFunction>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    ///Schedules all function definitions of `module` in module order.
    pub fn add_module(&mut self, module: &Module) {
        let defs = module
            .functions()
            .filter(|(_, f)| f.is_definition())
            .map(|(fref, _)| fref)
            .collect::<Vec<_>>();
        for f in defs {
            self.enqueue(f, None);
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &PendingFunction> {
        self.worklist.iter()
    }

    pub fn history(&self) -> &[PendingFunction] {
        &self.history
    }

    ///True if some pass run invalidated the analyses of `function`.
    pub fn is_invalidated(&self, function: FuncRef) -> bool {
        self.invalidated.contains(&function)
    }

    ///Runs `pass` on every pending function, until the worklist is empty. Functions the pass asks to reschedule are
    /// appended to the worklist, and thus run after everything that was already pending.
    pub fn run(
        &mut self,
        module: &mut Module,
        pass: &mut dyn FunctionTransform,
    ) -> Result<PassManagerStats, OptError> {
        let mut stats = PassManagerStats::default();
        while let Some(pending) = self.worklist.pop_front() {
            //might have been deleted by the host since it was enqueued
            if module.function(pending.function).is_none() {
                #[cfg(feature = "log")]
                log::warn!("skipping deleted function {:?}", pending.function);
                continue;
            }

            let result = pass.run(module, pending.function)?;
            stats.runs += 1;
            if result.invalidation == Invalidation::Everything {
                stats.changed += 1;
                self.invalidated.insert(pending.function);
            }
            self.history.push(pending);
            self.enqueue_all(result.reschedule);
        }

        #[cfg(feature = "log")]
        log::info!(
            "{}: {} run(s), {} changed",
            pass.name(),
            stats.runs,
            stats.changed
        );

        Ok(stats)
    }
}

impl Scheduler for PassManager {
    fn enqueue(&mut self, function: FuncRef, origin: Option<FuncRef>) {
        #[cfg(feature = "log")]
        log::trace!("enqueue {function:?} (origin {origin:?})");
        self.worklist.push_back(PendingFunction { function, origin });
    }
}
