// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Physical parameters used by every calculation. They are validated once and
//! then only ever shared by reference.

use std::{fs::File, io::Read, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::ParameterError;
use crate::{constants::*, physics::escape::compound_vesc};

/// A planet with lightning observations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Earth,
    Jupiter,
}

/// What it takes for an ionised channel to seed a leader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedingParameters {
    /// Energy to create one ion pair [erg].
    pub ionisation_energy: f64,

    /// Ion pairs per unit length the channel must contain [cm⁻¹].
    pub ionised_line_density: f64,
}

impl Default for SeedingParameters {
    fn default() -> Self {
        Self {
            ionisation_energy: DEFAULT_IONISATION_ENERGY,
            ionised_line_density: DEFAULT_IONISED_LINE_DENSITY,
        }
    }
}

impl SeedingParameters {
    /// The energy a macro must deposit per unit path length [erg/cm].
    pub fn energy_per_length(&self) -> f64 {
        self.ionisation_energy * self.ionised_line_density
    }
}

/// The local dark-matter halo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HaloParameters {
    /// Local dark-matter mass density [g/cm³].
    pub density: f64,

    /// Velocity dispersion `a` of the Maxwellian [cm/s].
    pub dispersion: f64,

    /// Galactocentric escape speed [cm/s].
    pub escape_speed: f64,

    /// Galactocentric circular speed [cm/s].
    pub circular_speed: f64,
}

impl Default for HaloParameters {
    fn default() -> Self {
        Self {
            density: DEFAULT_DM_DENSITY,
            dispersion: DEFAULT_VELOCITY_DISPERSION,
            escape_speed: DEFAULT_GALACTIC_ESCAPE_SPEED,
            circular_speed: DEFAULT_CIRCULAR_SPEED,
        }
    }
}

impl HaloParameters {
    /// The largest speed a bound macro can have relative to the Solar System
    /// [cm/s].
    pub fn max_speed(&self) -> f64 {
        self.escape_speed + self.circular_speed
    }
}

/// Atmospheric, gravitational and observational parameters of one planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanetParameters {
    /// Number density of the atmosphere at the storm layer [cm⁻³].
    pub number_density: f64,

    /// Mean molecular mass of the atmosphere [g].
    pub molecular_mass: f64,

    /// Leader propagation speed [cm/s]. Macros slower than this don't lay
    /// down a straight channel.
    pub leader_speed: f64,

    /// Escape speed from the planet [cm/s].
    pub escape_speed: f64,

    /// Escape speed from the Sun at the planet's orbit [cm/s].
    pub solar_escape_speed: f64,

    /// Planetary radius [cm].
    pub radius: f64,

    /// Fraction of the planetary disc monitored for lightning.
    pub coverage: f64,

    /// Time the planet has been monitored [s].
    pub exposure: f64,

    /// Number of macro-like lightning strikes observed.
    pub observed_events: u32,
}

impl PlanetParameters {
    pub fn earth() -> Self {
        Self {
            number_density: EARTH_STORM_NUMBER_DENSITY,
            molecular_mass: EARTH_MOLECULAR_MASS,
            leader_speed: EARTH_LEADER_SPEED,
            escape_speed: EARTH_ESCAPE_SPEED,
            solar_escape_speed: SOLAR_ESCAPE_AT_EARTH,
            radius: EARTH_RADIUS,
            coverage: 1.0,
            exposure: EARTH_EXPOSURE,
            observed_events: 0,
        }
    }

    pub fn jupiter() -> Self {
        Self {
            number_density: JUPITER_STORM_NUMBER_DENSITY,
            molecular_mass: JUPITER_MOLECULAR_MASS,
            leader_speed: JUPITER_LEADER_SPEED,
            escape_speed: JUPITER_ESCAPE_SPEED,
            solar_escape_speed: SOLAR_ESCAPE_AT_JUPITER,
            radius: JUPITER_RADIUS,
            coverage: 1.0,
            exposure: JUPITER_EXPOSURE,
            observed_events: 0,
        }
    }

    /// Mass density of the atmosphere at the storm layer [g/cm³].
    pub fn mass_density(&self) -> f64 {
        self.number_density * self.molecular_mass
    }

    /// The monitored cross-sectional area [cm²].
    pub fn target_area(&self) -> f64 {
        self.coverage * PI * self.radius * self.radius
    }

    /// The speed every macro has at least on arrival: the compound escape
    /// speed of the planet and the Sun (circular orbit) [cm/s].
    pub fn infall_speed(&self) -> f64 {
        compound_vesc(self.escape_speed, self.solar_escape_speed, None)
    }
}

/// Every physical quantity the calculations need. Missing tables in a
/// parameter file fall back to the defaults; a planet table that is present
/// must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicalParameters {
    /// Confidence level of exclusions, e.g. 0.9.
    pub confidence_level: f64,

    pub seeding: SeedingParameters,

    pub halo: HaloParameters,

    pub earth: PlanetParameters,

    pub jupiter: PlanetParameters,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            seeding: SeedingParameters::default(),
            halo: HaloParameters::default(),
            earth: PlanetParameters::earth(),
            jupiter: PlanetParameters::jupiter(),
        }
    }
}

impl PhysicalParameters {
    pub fn planet(&self, planet: Planet) -> &PlanetParameters {
        match planet {
            Planet::Earth => &self.earth,
            Planet::Jupiter => &self.jupiter,
        }
    }

    /// Read parameters from a toml or json file, chosen by the file's
    /// extension. The result is validated.
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, ParameterError> {
        let path = path.as_ref();
        debug!("Attempting to parse physical parameters from {}", path.display());

        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        let params: PhysicalParameters = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("toml") => toml::from_str(&contents)?,
            Some("json") => serde_json::from_str(&contents)?,
            _ => return Err(ParameterError::UnknownExtension(path.display().to_string())),
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every parameter is positive and finite, and that the
    /// parameters are mutually sensible.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ParameterError::ConfidenceLevel(self.confidence_level));
        }

        let SeedingParameters {
            ionisation_energy,
            ionised_line_density,
        } = self.seeding;
        check_positive("seeding.ionisation_energy", ionisation_energy)?;
        check_positive("seeding.ionised_line_density", ionised_line_density)?;

        let HaloParameters {
            density,
            dispersion,
            escape_speed,
            circular_speed,
        } = self.halo;
        check_positive("halo.density", density)?;
        check_positive("halo.dispersion", dispersion)?;
        check_positive("halo.escape_speed", escape_speed)?;
        check_positive("halo.circular_speed", circular_speed)?;

        for (planet, p) in [(Planet::Earth, &self.earth), (Planet::Jupiter, &self.jupiter)] {
            // Expose all the struct fields to ensure they're all checked.
            let PlanetParameters {
                number_density,
                molecular_mass,
                leader_speed,
                escape_speed,
                solar_escape_speed,
                radius,
                coverage,
                exposure,
                observed_events: _,
            } = *p;
            for (name, value) in [
                ("number_density", number_density),
                ("molecular_mass", molecular_mass),
                ("leader_speed", leader_speed),
                ("escape_speed", escape_speed),
                ("solar_escape_speed", solar_escape_speed),
                ("radius", radius),
                ("exposure", exposure),
            ] {
                check_positive(&format!("{planet}.{name}"), value)?;
            }
            if !(coverage > 0.0 && coverage <= 1.0) {
                return Err(ParameterError::Coverage {
                    planet,
                    value: coverage,
                });
            }

            let max_arrival = self.halo.max_speed().hypot(p.infall_speed());
            if leader_speed >= max_arrival {
                return Err(ParameterError::LeaderTooFast {
                    planet,
                    leader: leader_speed,
                    max: max_arrival,
                });
            }
        }

        Ok(())
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive {
            name: name.to_string(),
            value,
        })
    }
}
