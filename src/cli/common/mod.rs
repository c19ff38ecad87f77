// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. e.g. the `rate` and
//! `constraints` subcommands both need physical parameters and planets, so
//! the same arguments are shared between them.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use vec1::Vec1;

use crate::{
    math::{log_space, MathError},
    params::{OutputType, ParameterError, PhysicalParameters, Planet},
    unit_parsing::{parse_mass, parse_time, UnitParseError},
};

/// The default mass sweep [g].
pub(super) const DEFAULT_MASS_MIN: f64 = 1e1;
pub(super) const DEFAULT_MASS_MAX: f64 = 1e25;
pub(super) const DEFAULT_NUM_MASSES: usize = 50;

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Physical parameters may be given in a [physics] table. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref PLANETS_COMMA_SEPARATED: String = Planet::iter().join(", ");

    pub(super) static ref PLANETS_HELP: String =
        format!("The planets to use. Default: all. Supported planets: {}", *PLANETS_COMMA_SEPARATED);

    pub(super) static ref OUTPUT_TYPES_COMMA_SEPARATED: String = OutputType::iter().join(", ");

    pub(super) static ref OUTPUT_HELP: String =
        format!("The file to write results to; its extension determines the format. If not given, tab-separated values are printed. Supported formats: {}", *OUTPUT_TYPES_COMMA_SEPARATED);

    pub(super) static ref MASS_MIN_HELP: String =
        format!("The smallest mass of the sweep. Units may be given (e.g. 1e3kg). Default: {DEFAULT_MASS_MIN:e} g");

    pub(super) static ref MASS_MAX_HELP: String =
        format!("The largest mass of the sweep. Units may be given (e.g. 1e3kg). Default: {DEFAULT_MASS_MAX:e} g");

    pub(super) static ref NUM_MASSES_HELP: String =
        format!("The number of logarithmically-spaced masses in the sweep. Default: {DEFAULT_NUM_MASSES}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(MacroLightningError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(MacroLightningError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(MacroLightningError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Physical parameters and the planets to use them on.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PhysicsArgs {
    /// Path to a toml or json file of physical parameters. Anything not in
    /// the file takes its default value. Takes precedence over a [physics]
    /// table in an argument file.
    #[clap(long, parse(from_os_str), help_heading = "PHYSICS")]
    pub(super) params: Option<PathBuf>,

    #[clap(short, long, multiple_values(true), help = PLANETS_HELP.as_str(), help_heading = "PHYSICS")]
    pub(super) planets: Option<Vec<String>>,

    /// Override the time each planet has been monitored. Units may be given
    /// (e.g. 10yr). Default: per planet (Earth 10 yr, Jupiter 1 yr).
    #[clap(long, help_heading = "PHYSICS")]
    pub(super) exposure: Option<String>,

    /// Override the confidence level of exclusions. Default: 0.9
    #[clap(long, help_heading = "PHYSICS")]
    pub(super) confidence_level: Option<f64>,

    /// Physical parameters from an argument file.
    #[clap(skip)]
    #[serde(default)]
    pub(super) physics: Option<PhysicalParameters>,
}

/// [PhysicsArgs] after parsing.
#[derive(Debug)]
pub(super) struct PhysicsSelection {
    pub(super) physics: PhysicalParameters,
    pub(super) planets: Vec1<Planet>,
    pub(super) exposure: Option<f64>,
}

impl PhysicsArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            params: self.params.or(other.params),
            planets: self.planets.or(other.planets),
            exposure: self.exposure.or(other.exposure),
            confidence_level: self.confidence_level.or(other.confidence_level),
            physics: self.physics.or(other.physics),
        }
    }

    pub(super) fn parse(self) -> Result<PhysicsSelection, PhysicsArgsError> {
        let Self {
            params,
            planets,
            exposure,
            confidence_level,
            physics,
        } = self;

        let mut printer = InfoPrinter::new("Physical parameters".into());

        let mut physics = match (params, physics) {
            (Some(file), _) => {
                printer.push_line(format!("From file: {}", file.display()).into());
                PhysicalParameters::from_file(file)?
            }
            (None, Some(physics)) => {
                printer.push_line("From the argument file".into());
                physics
            }
            (None, None) => {
                printer.push_line("Defaults".into());
                PhysicalParameters::default()
            }
        };
        if let Some(cl) = confidence_level {
            physics.confidence_level = cl;
        }
        physics.validate()?;
        printer.push_line(format!("Confidence level: {}", physics.confidence_level).into());

        let planets = match planets {
            None => Vec1::try_from_vec(Planet::iter().collect()).map_err(|_| PhysicsArgsError::NoPlanets)?,
            Some(planets) => {
                let planets = planets
                    .iter()
                    .map(|p| {
                        Planet::from_str(p.trim()).map_err(|_| PhysicsArgsError::UnknownPlanet(p.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .unique()
                    .collect();
                Vec1::try_from_vec(planets).map_err(|_| PhysicsArgsError::NoPlanets)?
            }
        };
        debug!("Using planets {planets:?}");
        printer.push_line(format!("Planets: {}", planets.iter().join(", ")).into());

        let exposure = exposure.as_deref().map(parse_time).transpose()?;
        if let Some(exposure) = exposure {
            if !(exposure.is_finite() && exposure > 0.0) {
                return Err(PhysicsArgsError::Exposure(exposure));
            }
            printer.push_line(format!("Exposure override: {exposure:e} s").into());
        }

        printer.display();

        Ok(PhysicsSelection {
            physics,
            planets,
            exposure,
        })
    }
}

/// Arguments for a logarithmic mass sweep.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct MassSweepArgs {
    #[clap(long, help = MASS_MIN_HELP.as_str(), help_heading = "MASSES")]
    pub(super) mass_min: Option<String>,

    #[clap(long, help = MASS_MAX_HELP.as_str(), help_heading = "MASSES")]
    pub(super) mass_max: Option<String>,

    #[clap(short, long, help = NUM_MASSES_HELP.as_str(), help_heading = "MASSES")]
    pub(super) num_masses: Option<usize>,
}

impl MassSweepArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            mass_min: self.mass_min.or(other.mass_min),
            mass_max: self.mass_max.or(other.mass_max),
            num_masses: self.num_masses.or(other.num_masses),
        }
    }

    pub(super) fn parse(self) -> Result<Vec1<f64>, PhysicsArgsError> {
        let min = self
            .mass_min
            .as_deref()
            .map(parse_mass)
            .transpose()?
            .unwrap_or(DEFAULT_MASS_MIN);
        let max = self
            .mass_max
            .as_deref()
            .map(parse_mass)
            .transpose()?
            .unwrap_or(DEFAULT_MASS_MAX);
        if min > max {
            return Err(PhysicsArgsError::MassRange { min, max });
        }
        let num = self.num_masses.unwrap_or(DEFAULT_NUM_MASSES);
        let masses = log_space(min, max, num)?;
        debug!("{num} masses from {min:e} g to {max:e} g");
        Vec1::try_from_vec(masses).map_err(|_| PhysicsArgsError::NoMasses)
    }
}

/// Work out the output type of an optional output path.
pub(super) fn parse_output(
    output: Option<PathBuf>,
) -> Result<Option<(PathBuf, OutputType)>, PhysicsArgsError> {
    match output {
        None => Ok(None),
        Some(path) => match OutputType::from_path(&path) {
            Some(t) => Ok(Some((path, t))),
            None => Err(PhysicsArgsError::OutputType(path.display().to_string())),
        },
    }
}

#[derive(Error, Debug)]
pub(super) enum PhysicsArgsError {
    #[error("Unknown planet '{0}'. Supported planets: {}", *PLANETS_COMMA_SEPARATED)]
    UnknownPlanet(String),

    #[error("No planets were specified")]
    NoPlanets,

    #[error("The exposure must be positive, but got {0} s")]
    Exposure(f64),

    #[error("The smallest mass ({min:e} g) is bigger than the largest ({max:e} g)")]
    MassRange { min: f64, max: f64 },

    #[error("The mass sweep is empty")]
    NoMasses,

    #[error("Output file '{0}' doesn't have a recognised file extension! Supported formats: {}", *OUTPUT_TYPES_COMMA_SEPARATED)]
    OutputType(String),

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    UnitParse(#[from] UnitParseError),

    #[error("Invalid mass sweep: {0}")]
    Math(#[from] MathError),
}
