// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.
//! Everything is converted to CGS; a naked number is taken to be CGS already.

mod error;
#[cfg(test)]
mod tests;

pub use error::*;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::constants::{DAY_TO_S, KG_TO_G, KMS_TO_CMS, M2_TO_CM2, MS_TO_CMS, YEAR_TO_S};

/// A unit that can follow a number.
pub(crate) trait Unit: IntoEnumIterator + Into<&'static str> + Copy {
    /// What this unit measures, for error messages.
    const QUANTITY: &'static str;

    /// The size of this unit in CGS.
    fn to_cgs(self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MassUnit {
    /// Grams
    G,

    /// Kilograms
    Kg,
}

impl Unit for MassUnit {
    const QUANTITY: &'static str = "mass";

    fn to_cgs(self) -> f64 {
        match self {
            MassUnit::G => 1.0,
            MassUnit::Kg => KG_TO_G,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum AreaUnit {
    /// Square centimetres
    Cm2,

    /// Square metres
    M2,
}

impl Unit for AreaUnit {
    const QUANTITY: &'static str = "cross-section";

    fn to_cgs(self) -> f64 {
        match self {
            AreaUnit::Cm2 => 1.0,
            AreaUnit::M2 => M2_TO_CM2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
pub enum SpeedUnit {
    #[strum(serialize = "cm/s")]
    CmPerS,

    #[strum(serialize = "m/s")]
    MPerS,

    #[strum(serialize = "km/s")]
    KmPerS,
}

impl Unit for SpeedUnit {
    const QUANTITY: &'static str = "speed";

    fn to_cgs(self) -> f64 {
        match self {
            SpeedUnit::CmPerS => 1.0,
            SpeedUnit::MPerS => MS_TO_CMS,
            SpeedUnit::KmPerS => KMS_TO_CMS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    /// Seconds
    S,

    /// Days
    Day,

    /// Julian years
    Yr,
}

impl Unit for TimeUnit {
    const QUANTITY: &'static str = "time";

    fn to_cgs(self) -> f64 {
        match self {
            TimeUnit::S => 1.0,
            TimeUnit::Day => DAY_TO_S,
            TimeUnit::Yr => YEAR_TO_S,
        }
    }
}

/// Parse a string that may have a unit `U` attached to it, returning the value
/// in CGS.
pub(crate) fn parse_quantity<U: Unit>(s: &str) -> Result<f64, UnitParseError> {
    let trimmed = s.trim();

    // Try to parse a naked number.
    if let Ok(number) = trimmed.parse::<f64>() {
        return Ok(number);
    }

    // That didn't work; let's search over our supported units. Longer units
    // are tried first, otherwise "km/s" would be read as "k" + "m/s".
    let lower = trimmed.to_lowercase();
    let mut units: Vec<(U, &'static str)> = U::iter().map(|u| (u, u.into())).collect();
    units.sort_by_key(|(_, name)| std::cmp::Reverse(name.len()));
    for (unit, unit_str) in units {
        if let Some(prefix) = lower.strip_suffix(unit_str) {
            let number: f64 = match prefix.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    return Err(UnitParseError::GotUnitButCantParse {
                        input: s.to_string(),
                        unit: unit_str,
                    })
                }
            };
            return Ok(number * unit.to_cgs());
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: U::QUANTITY,
    })
}

/// Parse a mass, e.g. "1e5", "3kg". Grams if no unit is given.
pub fn parse_mass(s: &str) -> Result<f64, UnitParseError> {
    parse_quantity::<MassUnit>(s)
}

/// Parse a cross-section, e.g. "1e-8", "1e-12 m2". cm² if no unit is given.
pub fn parse_area(s: &str) -> Result<f64, UnitParseError> {
    parse_quantity::<AreaUnit>(s)
}

/// Parse a speed, e.g. "2e7", "200km/s". cm/s if no unit is given.
pub fn parse_speed(s: &str) -> Result<f64, UnitParseError> {
    parse_quantity::<SpeedUnit>(s)
}

/// Parse a duration, e.g. "3.15e7", "10 yr". Seconds if no unit is given.
pub fn parse_time(s: &str) -> Result<f64, UnitParseError> {
    parse_quantity::<TimeUnit>(s)
}
