// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reference lines in the (mass, cross-section) plane: the cross-sections of
//! objects of fixed density, and existing bounds from other probes. Masses
//! are in grams, cross-sections in cm². Masses must be positive and finite.

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{finite, positive, PhysicsError};
use crate::constants::PI;

/// Macros with this σ/M [cm²/g] or more are excluded by their elastic
/// scattering effects on the CMB.
const CMB_SIGMA_PER_MASS: f64 = 4.5e-7;

/// Microlensing bound from Kepler [cm²/g].
const KEPLER_SIGMA_PER_MASS: f64 = 1e-6;

/// Microlensing bound from observations of the LMC [cm²/g].
const LMC_SIGMA_PER_MASS: f64 = 1e-4;

/// Macros with more σ/M [cm²/g] than this don't get through the Earth
/// (piecewise PREM density model).
const EARTH_PASSAGE_SIGMA_PER_MASS: f64 = 2e-10;

/// Nuclear density [g/cm³].
const NUCLEAR_DENSITY: f64 = 3.6e14;

/// Cross-section of a sphere of mass `mass` and uniform `density`.
fn sphere_cross_section(mass: f64, density: f64) -> Result<f64, PhysicsError> {
    let mass = positive("mass", mass)?;
    let volume_per_radius_cubed = 4.0 / 3.0 * PI * density;
    finite(
        "cross-section",
        PI * (mass / volume_per_radius_cubed).powf(2.0 / 3.0),
    )
}

/// A bound that is linear in mass.
fn linear_bound(mass: f64, sigma_per_mass: f64) -> Result<f64, PhysicsError> {
    finite("cross-section", positive("mass", mass)? * sigma_per_mass)
}

/// Cross-section of an object of atomic density (1 g/cm³).
pub fn atomic_density(mass: f64) -> Result<f64, PhysicsError> {
    sphere_cross_section(mass, 1.0)
}

/// Cross-section of an object of nuclear density.
pub fn nuclear_density(mass: f64) -> Result<f64, PhysicsError> {
    sphere_cross_section(mass, NUCLEAR_DENSITY)
}

/// Cross-section of a black hole: the area within the Schwarzschild radius
/// (3 km per solar mass).
pub fn black_hole(mass: f64) -> Result<f64, PhysicsError> {
    let mass = positive("mass", mass)?;
    finite("cross-section", PI * 3e5f64.powi(2) * (mass / 2e33).powi(2))
}

/// The CMB bound.
pub fn cmb(mass: f64) -> Result<f64, PhysicsError> {
    linear_bound(mass, CMB_SIGMA_PER_MASS)
}

/// The Kepler microlensing bound.
pub fn kepler_microlensing(mass: f64) -> Result<f64, PhysicsError> {
    linear_bound(mass, KEPLER_SIGMA_PER_MASS)
}

/// The LMC microlensing bound.
pub fn lmc_microlensing(mass: f64) -> Result<f64, PhysicsError> {
    linear_bound(mass, LMC_SIGMA_PER_MASS)
}

/// The largest cross-section of a macro that makes it through the Earth.
pub fn earth_passage_limit(mass: f64) -> Result<f64, PhysicsError> {
    linear_bound(mass, EARTH_PASSAGE_SIGMA_PER_MASS)
}

/// All of the reference lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ReferenceLine {
    AtomicDensity,
    NuclearDensity,
    BlackHole,
    Cmb,
    KeplerMicrolensing,
    LmcMicrolensing,
    EarthPassage,
}

impl ReferenceLine {
    /// The cross-section [cm²] of this line at `mass` [g].
    pub fn cross_section(self, mass: f64) -> Result<f64, PhysicsError> {
        match self {
            ReferenceLine::AtomicDensity => atomic_density(mass),
            ReferenceLine::NuclearDensity => nuclear_density(mass),
            ReferenceLine::BlackHole => black_hole(mass),
            ReferenceLine::Cmb => cmb(mass),
            ReferenceLine::KeplerMicrolensing => kepler_microlensing(mass),
            ReferenceLine::LmcMicrolensing => lmc_microlensing(mass),
            ReferenceLine::EarthPassage => earth_passage_limit(mass),
        }
    }
}
