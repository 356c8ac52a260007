/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Transitive deletion of dead instructions.
//!
//! See [recursively_delete_dead](crate::Module::recursively_delete_dead).
use crate::{err::GraphError, InstRef, Module};

impl Module {
    ///True if `inst` has no users and no side effects.
    pub fn is_trivially_dead(&self, inst: InstRef) -> bool {
        self.inst(inst)
            .map(|i| !i.has_uses() && !i.kind.has_side_effects())
            .unwrap_or(false)
    }

    ///Deletes `root`, and then every producer of its operands that became trivially dead because of that,
    /// transitively. Returns all deleted instructions in deletion order.
    ///
    /// If `force` is set, `root` is deleted even if it has side effects. It must never have uses though.
    ///
    /// The deletion never leaves the function `root` lives in. A producer in another function keeps
    /// living, even if it has no users anymore.
    pub fn recursively_delete_dead(
        &mut self,
        root: InstRef,
        force: bool,
    ) -> Result<Vec<InstRef>, GraphError> {
        let function = self.function_of(root).ok_or(GraphError::InvalidInst(root))?;
        let root_inst = &self[root];
        if root_inst.has_uses() {
            return Err(GraphError::InstHasUses {
                inst: root,
                uses: root_inst.use_count(),
            });
        }
        if !force && root_inst.kind.has_side_effects() {
            return Ok(Vec::with_capacity(0));
        }

        //NOTE: explicit stack instead of recursion, dead chains can be as long as the function.
        let mut stack = vec![root];
        let mut deleted = Vec::new();
        while let Some(inst) = stack.pop() {
            //might have been pushed twice, if it was used twice by the same instruction
            if !self.contains_inst(inst) || self[inst].has_uses() {
                continue;
            }

            let removed = self.remove_inst(inst)?;
            deleted.push(inst);

            for producer in removed.operands() {
                if self.function_of(*producer) != Some(function) {
                    continue;
                }
                if self.is_trivially_dead(*producer) {
                    stack.push(*producer);
                }
            }
        }

        #[cfg(feature = "log")]
        log::trace!("deleted {} instruction(s) starting at {root:?}", deleted.len());

        Ok(deleted)
    }
}
