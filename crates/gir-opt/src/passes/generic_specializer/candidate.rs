/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Classification and collection of specializable applies.

use gir::{FuncRef, InstRef, Module};

use crate::{
    remark::{Remark, RemarkSink},
    worklist::WorkSet,
    OptError,
};

use super::PASS_NAME;

///True if `inst` is an apply with type substitutions, whose callee is statically known and has a visible body.
///
/// A known callee without visible body is reported as missed `NoDef` remark (if `report_missing_definition` is set).
pub fn is_candidate(
    module: &Module,
    inst: InstRef,
    remarks: &mut dyn RemarkSink,
    report_missing_definition: bool,
) -> bool {
    let Some(instruction) = module.inst(inst) else {
        return false;
    };
    let Some(site) = instruction.apply_site() else {
        return false;
    };
    if !site.has_substitutions() {
        return false;
    }
    let Some(callee) = module.referenced_function(inst) else {
        return false;
    };

    let callee = &module[callee];
    if !callee.is_definition() {
        if report_missing_definition {
            remarks.emit(
                Remark::missed(
                    PASS_NAME,
                    "NoDef",
                    inst,
                    format!(
                        "Unable to specialize generic function {} since definition is not visible",
                        callee.name
                    ),
                )
                .with_span(instruction.span.clone()),
            );
        }
        return false;
    }

    true
}

///Checks a collected candidate again, right before it is handed to the engine. True if the apply may be optimized
/// and its callee is (still) allowed to be optimized.
///
/// Returns an error if `apply` is not an apply with known callee. That can only happen if something that was
/// not a candidate ended up in the work set.
pub fn is_attemptable(module: &Module, apply: InstRef) -> Result<bool, OptError> {
    let site = module
        .inst(apply)
        .and_then(|i| i.apply_site())
        .ok_or(OptError::NotAnApply(apply))?;
    let callee = module
        .referenced_function(apply)
        .ok_or(OptError::UnknownCallee(apply))?;

    Ok(site.can_optimize && module[callee].should_optimize)
}

///Collects all candidates of `function` in execution order (blocks in order, instructions top to bottom).
pub fn collect_candidates(
    module: &Module,
    function: FuncRef,
    remarks: &mut dyn RemarkSink,
    report_missing_definition: bool,
) -> WorkSet<InstRef> {
    let mut applies = WorkSet::new();
    let Some(func) = module.function(function) else {
        return applies;
    };

    for block in func.blocks() {
        for inst in module[*block].insts() {
            if is_candidate(module, *inst, remarks, report_missing_definition) {
                applies.insert(*inst);
            }
        }
    }

    applies
}
