// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all macro-lightning-related errors. This should be the
//! *only* error enum that is publicly visible.

use thiserror::Error;

use super::{common::PhysicsArgsError, rate::RateArgsError};
use crate::{
    math::MathError,
    params::{ConstraintsError, ParameterError, RateError, WriteError},
    physics::PhysicsError,
    unit_parsing::UnitParseError,
};

const UNITS: &str = "mass: g, kg; cross-section: cm2, m2; speed: cm/s, m/s, km/s; time: s, day, yr";

/// The *only* publicly visible error from macro-lightning. Each error message
/// should include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum MacroLightningError {
    /// A calculation was given bad inputs or gave a non-finite result.
    #[error("{0}\n\nAll quantities are CGS unless a unit is given. Try turning up verbosity (-v or -vv) to see intermediate values.")]
    Physics(String),

    /// An error related to physical parameters.
    #[error("{0}\n\nPhysical parameters are CGS; anything missing from a parameter file takes its default value.")]
    Parameters(String),

    /// An error parsing a quantity with a unit.
    #[error("{0}\n\nSupported units: {UNITS}")]
    UnitParse(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files use the same names as the command-line arguments, with '-' replaced by '_'.")]
    ArgFile(String),

    /// An error writing results.
    #[error("{0}\n\nThe output format is taken from the output file's extension.")]
    Output(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<PhysicsArgsError> for MacroLightningError {
    fn from(e: PhysicsArgsError) -> Self {
        let s = e.to_string();
        match e {
            PhysicsArgsError::UnknownPlanet(_)
            | PhysicsArgsError::NoPlanets
            | PhysicsArgsError::Exposure(_)
            | PhysicsArgsError::MassRange { .. }
            | PhysicsArgsError::NoMasses
            | PhysicsArgsError::Math(_) => Self::Physics(s),
            PhysicsArgsError::OutputType(_) => Self::Output(s),
            PhysicsArgsError::Parameters(e) => Self::from(e),
            PhysicsArgsError::UnitParse(e) => Self::from(e),
        }
    }
}

impl From<RateArgsError> for MacroLightningError {
    fn from(e: RateArgsError) -> Self {
        let s = e.to_string();
        match e {
            RateArgsError::NoMasses | RateArgsError::NoCrossSections => Self::Physics(s),
        }
    }
}

impl From<RateError> for MacroLightningError {
    fn from(e: RateError) -> Self {
        match e {
            RateError::Physics(e) => Self::from(e),
            RateError::Write(e) => Self::from(e),
        }
    }
}

impl From<ConstraintsError> for MacroLightningError {
    fn from(e: ConstraintsError) -> Self {
        match e {
            ConstraintsError::Physics(e) => Self::from(e),
            ConstraintsError::Write(e) => Self::from(e),
        }
    }
}

// Library code errors.

impl From<PhysicsError> for MacroLightningError {
    fn from(e: PhysicsError) -> Self {
        match e {
            PhysicsError::Parameters(e) => Self::from(e),
            _ => Self::Physics(e.to_string()),
        }
    }
}

impl From<ParameterError> for MacroLightningError {
    fn from(e: ParameterError) -> Self {
        let s = e.to_string();
        match e {
            ParameterError::IO(_) => Self::Generic(s),
            _ => Self::Parameters(s),
        }
    }
}

impl From<MathError> for MacroLightningError {
    fn from(e: MathError) -> Self {
        Self::Physics(e.to_string())
    }
}

impl From<UnitParseError> for MacroLightningError {
    fn from(e: UnitParseError) -> Self {
        Self::UnitParse(e.to_string())
    }
}

impl From<WriteError> for MacroLightningError {
    fn from(e: WriteError) -> Self {
        Self::Output(e.to_string())
    }
}

impl From<std::io::Error> for MacroLightningError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
