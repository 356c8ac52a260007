/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */
use gir::{err::GraphError, FuncRef, InstRef};
use thiserror::Error;

///Optimizer errors. Passes absorb most of them locally, only misuse by the host (like running a pass on a
/// function that does not exist) is returned.
#[derive(Debug, Error, Clone)]
pub enum OptError {
    #[error("Function {0:?} does not exist")]
    InvalidFunction(FuncRef),

    #[error("Expected {0:?} to be an apply")]
    NotAnApply(InstRef),

    #[error("Apply {0:?} has no statically known callee")]
    UnknownCallee(InstRef),

    #[error("Specialization of {callee} failed: {text}")]
    Engine { callee: String, text: String },

    #[error("Internal compiler error: {0}\nPlease file an issue!")]
    Internal(String),

    #[error("Internal graph error: {0}")]
    InternalGraphError(#[from] GraphError),
}
