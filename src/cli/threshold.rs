// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::debug;

use super::common::{display_warnings, PhysicsArgs, PhysicsSelection, Warn};
use crate::{
    params::Planet,
    physics::threshold::{
        max_arrival_speed, saturation_cross_section, seeding_threshold, threshold_cross_section,
    },
    unit_parsing::parse_speed,
    MacroLightningError,
};

/// Print the cross-sections a macro needs to seed lightning on each planet.
#[derive(Parser, Debug, Default)]
pub struct ThresholdArgs {
    /// Also print the threshold cross-section at this arrival speed. Units may
    /// be given (e.g. 250km/s); cm/s otherwise.
    #[clap(long)]
    speed: Option<String>,

    /// Override the number density [cm⁻³] of the atmosphere at the storm
    /// layer of every planet.
    #[clap(long)]
    number_density: Option<f64>,

    #[clap(flatten)]
    physics_args: PhysicsArgs,
}

impl ThresholdArgs {
    pub(super) fn run(self) -> Result<(), MacroLightningError> {
        debug!("{:#?}", self);
        let speed = self.speed.as_deref().map(parse_speed).transpose()?;
        let PhysicsSelection {
            mut physics,
            planets,
            exposure,
        } = self.physics_args.parse()?;
        if let Some(n) = self.number_density {
            for &planet in &planets {
                match planet {
                    Planet::Earth => physics.earth.number_density = n,
                    Planet::Jupiter => physics.jupiter.number_density = n,
                }
            }
            physics.validate()?;
        }
        if exposure.is_some() {
            "--exposure has no effect on thresholds".warn();
        }
        display_warnings();

        let mut header = vec![
            "planet",
            "seeding_threshold_cm2",
            "saturation_cm2",
            "max_arrival_cm_s",
            "infall_cm_s",
        ];
        if speed.is_some() {
            header.push("threshold_at_speed_cm2");
        }
        println!("{}", header.join("\t"));

        for planet in planets {
            let p = physics.planet(planet);
            let sigma_min = seeding_threshold(&physics, planet)?;
            let sigma_sat = saturation_cross_section(&physics, planet)?;
            let mut row = format!(
                "{planet}\t{sigma_min:e}\t{sigma_sat:e}\t{:e}\t{:e}",
                max_arrival_speed(&physics, planet),
                p.infall_speed()
            );
            if let Some(speed) = speed {
                let sigma = threshold_cross_section(
                    p.number_density,
                    p.molecular_mass,
                    physics.seeding.energy_per_length(),
                    speed,
                )?;
                row.push_str(&format!("\t{sigma:e}"));
            }
            println!("{row}");
        }

        Ok(())
    }
}
