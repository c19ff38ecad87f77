// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::debug;

use crate::{
    constants::KMS_TO_CMS,
    physics::escape::{multibody_vesc, multibody_vesc_accumulate},
    unit_parsing::parse_speed,
    MacroLightningError,
};

/// Print the escape speed of a nested system of bodies, e.g. the Earth, the
/// Sun and the Galaxy. Results are in km/s.
#[derive(Parser, Debug, Default)]
pub struct EscapeArgs {
    /// The escape speed of each body, innermost first. Units may be given
    /// (e.g. 11.186km/s); cm/s otherwise.
    #[clap(required = true, multiple_values(true))]
    escape_speeds: Vec<String>,

    /// The orbital speed of each body around the next one out, one fewer than
    /// the escape speeds. Default: circular orbits.
    #[clap(long, multiple_values(true))]
    orbital_speeds: Option<Vec<String>>,

    /// Print the escape speed of each successively larger system.
    #[clap(short, long)]
    accumulate: bool,
}

impl EscapeArgs {
    pub(super) fn run(self) -> Result<(), MacroLightningError> {
        let vescs = self
            .escape_speeds
            .iter()
            .map(|s| parse_speed(s))
            .collect::<Result<Vec<_>, _>>()?;
        let vo = self
            .orbital_speeds
            .map(|v| v.iter().map(|s| parse_speed(s)).collect::<Result<Vec<_>, _>>())
            .transpose()?;
        debug!("Escape speeds: {vescs:?} cm/s; orbital speeds: {vo:?} cm/s");

        if self.accumulate {
            println!("bodies\tescape_speed_km_s");
            for (i, v) in multibody_vesc_accumulate(&vescs, vo.as_deref())?
                .into_iter()
                .enumerate()
            {
                println!("{}\t{}", i + 1, v / KMS_TO_CMS);
            }
        } else {
            let v = multibody_vesc(&vescs, vo.as_deref())?;
            println!("escape_speed_km_s\t{}", v / KMS_TO_CMS);
        }
        Ok(())
    }
}
