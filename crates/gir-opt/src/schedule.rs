//! Hand-off of newly created functions to whoever schedules function passes.

use gir::FuncRef;

///Request to optimize `function`, which was created while optimizing a call to `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reschedule {
    pub function: FuncRef,
    pub origin: FuncRef,
}

///Sink for functions that need to be optimized. Enqueueing a function twice must be tolerated.
pub trait Scheduler {
    fn enqueue(&mut self, function: FuncRef, origin: Option<FuncRef>);

    fn enqueue_all(&mut self, requests: impl IntoIterator<Item = Reschedule>)
    where
        Self: Sized,
    {
        for req in requests {
            self.enqueue(req.function, Some(req.origin));
        }
    }
}

impl Scheduler for Vec<Reschedule> {
    ///Records only requests that carry an origin.
    fn enqueue(&mut self, function: FuncRef, origin: Option<FuncRef>) {
        if let Some(origin) = origin {
            self.push(Reschedule { function, origin });
        }
    }
}
