//! Calls the engine and turns its result into something the driver can act on.

use gir::{InstRef, Module};

use crate::{
    engine::{DeadSet, NewFunctions, SpecializationEngine},
    remark::RemarkSink,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttemptOutcome {
    ///The engine did not touch the apply.
    Declined,
    ///The apply was replaced by a call to an already existing specialization.
    Reused { dead: DeadSet },
    ///The apply was replaced by a call to a freshly created specialization.
    Specialized {
        dead: DeadSet,
        new_functions: NewFunctions,
    },
}

pub(crate) fn invoke<E: SpecializationEngine + ?Sized>(
    engine: &mut E,
    module: &mut Module,
    apply: InstRef,
    remarks: &mut dyn RemarkSink,
) -> AttemptOutcome {
    let specialization = match engine.try_specialize(module, apply, remarks) {
        Ok(spec) => spec,
        Err(_e) => {
            #[cfg(feature = "log")]
            log::error!("specialization engine failed on {apply:?}, leaving it as is: {_e}");
            return AttemptOutcome::Declined;
        }
    };
    if specialization.is_declined() {
        return AttemptOutcome::Declined;
    }

    let mut dead = DeadSet::new();
    for inst in specialization.dead {
        if !dead.contains(&inst) {
            dead.push(inst);
        }
    }
    if !dead.is_empty() && !dead.contains(&apply) {
        #[cfg(feature = "log")]
        log::error!("specialization engine did not report {apply:?} as dead");
        debug_assert!(false, "specialized apply {apply:?} was not reported dead");
    }
    if dead.is_empty() && !specialization.new_functions.is_empty() {
        #[cfg(feature = "log")]
        log::error!("specialization engine created functions, but did not rewrite {apply:?}");
        debug_assert!(false, "new functions for {apply:?}, but nothing dead");
    }

    let new_functions: NewFunctions = specialization
        .new_functions
        .into_iter()
        .filter(|f| {
            let exists = module.function(*f).is_some();
            if !exists {
                #[cfg(feature = "log")]
                log::error!("specialization engine reported non-existent function {f:?}");
            }
            exists
        })
        .collect();

    if new_functions.is_empty() {
        AttemptOutcome::Reused { dead }
    } else {
        AttemptOutcome::Specialized {
            dead,
            new_functions,
        }
    }
}
