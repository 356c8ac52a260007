/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Config options for the optimizer

///Order in which the functions created by one specialization are handed to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescheduleOrder {
    ///Last created function first.
    #[default]
    Reversed,
    ///In creation order.
    Forward,
}

#[derive(Debug, Clone)]
pub struct SpecializerConfig {
    pub reschedule_order: RescheduleOrder,
    ///If true, functions that are still in ownership form are not touched.
    pub skip_ownership_functions: bool,
    ///If true, a missed-remark is emitted for each generic callee whose body is not visible.
    pub report_missing_definitions: bool,
    ///Dumps the function before each specialization attempt (debug log level).
    pub dump_functions: bool,
}

impl Default for SpecializerConfig {
    fn default() -> Self {
        SpecializerConfig {
            reschedule_order: RescheduleOrder::default(),
            skip_ownership_functions: true,
            report_missing_definitions: true,
            dump_functions: false,
        }
    }
}

impl SpecializerConfig {
    ///Default config, but enables function dumps if `GIR_DUMP_ALL` or `GIR_DUMP_SPECIALIZE` is set.
    pub fn from_env() -> Self {
        SpecializerConfig {
            dump_functions: std::env::var("GIR_DUMP_ALL").is_ok()
                || std::env::var("GIR_DUMP_SPECIALIZE").is_ok(),
            ..Default::default()
        }
    }

    pub fn with_reschedule_order(mut self, order: RescheduleOrder) -> Self {
        self.reschedule_order = order;
        self
    }

    pub fn with_skip_ownership_functions(mut self, skip: bool) -> Self {
        self.skip_ownership_functions = skip;
        self
    }
}
