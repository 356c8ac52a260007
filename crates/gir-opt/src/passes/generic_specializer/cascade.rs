/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Deletes what a specialization left dead, and keeps the work set in sync with that.

use gir::{err::GraphError, FuncRef, InstRef, Module};

use crate::{engine::DeadSet, worklist::WorkSet};

///Deletes every instruction of `function` in `dead`, and transitively the producers that become unused because
/// of that. Every deleted instruction is removed from `applies`. Returns the number of deleted instructions.
///
/// Entries that live in another function are never deleted, they are logged and dropped.
///
/// `dead` is consumed LIFO. An entry that is still used (for instance by another dead entry that was not
/// deleted yet) is retried once the rest is processed. Entries that stay used are kept.
pub fn drain(
    module: &mut Module,
    function: FuncRef,
    dead: &mut DeadSet,
    applies: &mut WorkSet<InstRef>,
) -> usize {
    let mut deleted_count = 0;
    let mut still_used = DeadSet::new();

    loop {
        let before = deleted_count;
        while let Some(inst) = dead.pop() {
            applies.remove(&inst);
            //already taken by an earlier cascade
            let Some(owner) = module.function_of(inst) else {
                continue;
            };
            if owner != function {
                #[cfg(feature = "log")]
                log::error!(
                    "{inst:?} was reported dead, but belongs to {owner:?}, not {function:?}. Keeping it"
                );
                continue;
            }

            match module.recursively_delete_dead(inst, true) {
                Ok(deleted) => {
                    for d in &deleted {
                        applies.remove(d);
                    }
                    deleted_count += deleted.len();
                }
                Err(GraphError::InstHasUses { .. }) => still_used.push(inst),
                Err(_e) => {
                    #[cfg(feature = "log")]
                    log::error!("could not delete dead {inst:?}: {_e}");
                }
            }
        }

        if still_used.is_empty() || before == deleted_count {
            break;
        }
        dead.extend(still_used.drain(..).rev());
    }

    for _inst in still_used {
        #[cfg(feature = "log")]
        log::warn!("{_inst:?} was reported dead, but is still used");
    }

    deleted_count
}
