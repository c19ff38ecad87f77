// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that are kept modular to be used in multiple aspects of
//! `macro-lightning`.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly. Physical parameters are
//! public; the run parameters are only for the `cli` module.

mod constraints;
mod error;
mod output;
mod physical;
mod rate;

pub(crate) use constraints::{ConstraintsError, ConstraintsParams};
pub use error::ParameterError;
pub(crate) use output::{write_output, OutputType, WriteError};
pub use physical::{HaloParameters, PhysicalParameters, Planet, PlanetParameters, SeedingParameters};
pub(crate) use rate::{RateError, RateParams};
