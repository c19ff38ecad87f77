// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::Planet;

#[derive(Error, Debug)]
pub enum ParameterError {
    #[error("Physical parameter '{name}' must be positive and finite, but got {value}")]
    NotPositive { name: String, value: f64 },

    #[error("The monitored fraction of {planet} must be in (0, 1], but got {value}")]
    Coverage { planet: Planet, value: f64 },

    #[error("The confidence level must be in (0, 1), but got {0}")]
    ConfidenceLevel(f64),

    #[error("The {planet} leader speed ({leader:e} cm/s) is not below the fastest macro arrival speed ({max:e} cm/s); no macro could ever seed a straight leader")]
    LeaderTooFast { planet: Planet, leader: f64, max: f64 },

    #[error("Parameter file '{0}' doesn't have a recognised file extension! Valid extensions are: toml, json")]
    UnknownExtension(String),

    #[error("Couldn't decode toml structure: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Couldn't decode json structure: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
