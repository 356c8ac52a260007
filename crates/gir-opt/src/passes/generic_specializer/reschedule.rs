use gir::FuncRef;

use crate::{config::RescheduleOrder, engine::NewFunctions, Reschedule};

///Appends a [Reschedule] for each of `new_functions` to `out`, tagged with the specialized `origin`.
pub fn notify(
    new_functions: &NewFunctions,
    origin: FuncRef,
    order: RescheduleOrder,
    out: &mut Vec<Reschedule>,
) {
    let request = |function: &FuncRef| Reschedule {
        function: *function,
        origin,
    };
    match order {
        RescheduleOrder::Reversed => out.extend(new_functions.iter().rev().map(request)),
        RescheduleOrder::Forward => out.extend(new_functions.iter().map(request)),
    }
}
