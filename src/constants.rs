// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision and in CGS units (grams, centimetres,
seconds, ergs). Conversion factors are named `<UNIT>_TO_<CGS UNIT>`.
 */

pub use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

/// 1 km/s in cm/s.
pub const KMS_TO_CMS: f64 = 1e5;

/// 1 m/s in cm/s.
pub const MS_TO_CMS: f64 = 1e2;

/// 1 kg in g.
pub const KG_TO_G: f64 = 1e3;

/// 1 m² in cm².
pub const M2_TO_CM2: f64 = 1e4;

/// 1 GeV/c² in g.
pub const GEV_TO_G: f64 = 1.782_661_92e-24;

/// 1 eV in erg.
pub const EV_TO_ERG: f64 = 1.602_176_634e-12;

/// 1 atomic mass unit in g.
pub const AMU_TO_G: f64 = 1.660_539_066_6e-24;

/// 1 day in s.
pub const DAY_TO_S: f64 = 86_400.0;

/// 1 Julian year in s.
pub const YEAR_TO_S: f64 = 365.25 * DAY_TO_S;

/// Local dark-matter mass density [g/cm³]. 0.3 GeV/cm³.
pub const DEFAULT_DM_DENSITY: f64 = 0.3 * GEV_TO_G;

/// Velocity dispersion `a` of the Maxwellian halo [cm/s]. This is the circular
/// speed divided by sqrt(2), i.e. the one-dimensional dispersion.
pub const DEFAULT_VELOCITY_DISPERSION: f64 = 220.0 * KMS_TO_CMS * FRAC_1_SQRT_2;

/// Galactocentric escape speed at the Sun [cm/s].
pub const DEFAULT_GALACTIC_ESCAPE_SPEED: f64 = 550.0 * KMS_TO_CMS;

/// Galactocentric circular speed at the Sun [cm/s].
pub const DEFAULT_CIRCULAR_SPEED: f64 = 220.0 * KMS_TO_CMS;

/// Energy to produce one ion pair in air [erg]. 34 eV.
pub const DEFAULT_IONISATION_ENERGY: f64 = 34.0 * EV_TO_ERG;

/// The ionised line density a channel needs to seed a leader [cm⁻¹].
pub const DEFAULT_IONISED_LINE_DENSITY: f64 = 3.0e14;

/// The Poisson mean excluded at 90% confidence when no events are observed,
/// i.e. -ln(0.1).
pub const ZERO_EVENTS_90_CL: f64 = 2.302_585_092_994_046;

/// The default confidence level of exclusion curves.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.9;

/// Solar escape speed at 1 AU [cm/s].
pub const SOLAR_ESCAPE_AT_EARTH: f64 = 42.1 * KMS_TO_CMS;

/// Earth's surface escape speed [cm/s].
pub const EARTH_ESCAPE_SPEED: f64 = 11.186 * KMS_TO_CMS;

/// Earth's mean radius [cm].
pub const EARTH_RADIUS: f64 = 6.371e8;

/// Air number density at thunderstorm charge-layer altitudes (~6 km) [cm⁻³].
pub const EARTH_STORM_NUMBER_DENSITY: f64 = 1.3e19;

/// Mean molecular mass of air [g].
pub const EARTH_MOLECULAR_MASS: f64 = 28.97 * AMU_TO_G;

/// Stepped-leader propagation speed in terrestrial lightning [cm/s].
pub const EARTH_LEADER_SPEED: f64 = 2.0e7;

/// Solar escape speed at Jupiter's orbit (5.2 AU) [cm/s].
pub const SOLAR_ESCAPE_AT_JUPITER: f64 = 18.5 * KMS_TO_CMS;

/// Jupiter's escape speed at the 1 bar level [cm/s].
pub const JUPITER_ESCAPE_SPEED: f64 = 59.5 * KMS_TO_CMS;

/// Jupiter's equatorial radius [cm].
pub const JUPITER_RADIUS: f64 = 7.1492e9;

/// H₂/He number density in Jupiter's water-cloud layer (~5 bar, 270 K)
/// [cm⁻³].
pub const JUPITER_STORM_NUMBER_DENSITY: f64 = 1.3e20;

/// Mean molecular mass of the Jovian atmosphere [g].
pub const JUPITER_MOLECULAR_MASS: f64 = 2.22 * AMU_TO_G;

/// Leader propagation speed assumed for Jovian lightning [cm/s].
pub const JUPITER_LEADER_SPEED: f64 = 2.0e7;

/// Exposure of terrestrial lightning surveys without a macro-like strike [s].
pub const EARTH_EXPOSURE: f64 = 10.0 * YEAR_TO_S;

/// Exposure of Jovian lightning surveys without a macro-like strike [s].
pub const JUPITER_EXPOSURE: f64 = YEAR_TO_S;
