// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The macro-induced lightning calculations. Every function here is a pure
//! function of its inputs; inputs are validated before use and results that
//! would be NaN or infinite are reported as errors.

mod error;
pub mod escape;
pub mod rate;
pub mod reference;
pub mod threshold;
pub mod velocity;

pub use error::PhysicsError;
pub use rate::{CandidatePoint, ConstraintCurve, EventRate, RateCalculator};
pub use threshold::{seeding_speed, threshold_cross_section};
pub use velocity::{flux_speed, mean_speed, velocity_fraction, BinnedHalo};

/// Ensure that a supplied quantity is positive and finite.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::Domain { name, value })
    }
}

/// Ensure that a computed quantity is finite.
pub(crate) fn finite(quantity: &'static str, value: f64) -> Result<f64, PhysicsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonFinite { quantity, value })
    }
}

/// Ensure that a supplied quantity is finite and not negative.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, PhysicsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::Negative { name, value })
    }
}
