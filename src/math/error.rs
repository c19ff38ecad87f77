// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid argument '{name}': {value}")]
    InvalidArgument { name: &'static str, value: f64 },

    #[error("The root is not bracketed by [{lo:e}, {hi:e}]")]
    NoBracket { lo: f64, hi: f64 },

    #[error("The {routine} did not converge after {iterations} iterations")]
    NoConvergence {
        routine: &'static str,
        iterations: usize,
    },
}
