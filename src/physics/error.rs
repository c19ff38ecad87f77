// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{math::MathError, params::ParameterError};

#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("Domain error: '{name}' must be positive and finite, but got {value}")]
    Domain { name: &'static str, value: f64 },

    #[error("Domain error: '{name}' must be finite and not negative, but got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("The {quantity} is not finite ({value}); the inputs are too extreme")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("Velocity grid steps are unequal in size")]
    UnevenGrid,

    #[error("A velocity grid needs at least 2 values, but got {0}")]
    GridTooSmall(usize),

    #[error("A velocity grid of {0} values per axis has too many cells")]
    GridTooLarge(usize),

    #[error("Expected {expected} orbital speeds (one per body after the first), but got {got}")]
    OrbitalSpeedCount { expected: usize, got: usize },

    #[error("No masses were supplied for the constraint curve")]
    NoMasses,

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Parameters(#[from] ParameterError),
}
