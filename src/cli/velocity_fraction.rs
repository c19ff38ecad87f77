// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::debug;

use super::common::{InfoPrinter, Warn};
use crate::{
    constants::DEFAULT_VELOCITY_DISPERSION,
    physics::{flux_speed, velocity_fraction, BinnedHalo},
    unit_parsing::parse_speed,
    MacroLightningError,
};

lazy_static::lazy_static! {
    static ref DISPERSION_HELP: String =
        format!("The velocity dispersion of the halo. Units may be given (e.g. 155km/s). Default: {DEFAULT_VELOCITY_DISPERSION:e} cm/s");
}

/// The number of dispersions either side of zero a binned grid spans by
/// default.
const DEFAULT_GRID_HALF_WIDTH: f64 = 6.0;

/// Print the fraction of a Maxwellian halo faster than some speed, and the
/// flux speed of those macros.
#[derive(Parser, Debug)]
pub struct VelocityFractionArgs {
    /// The threshold speed. Units may be given (e.g. 300km/s); cm/s otherwise.
    #[clap(long, allow_hyphen_values = true)]
    v_min: String,

    #[clap(short, long, help = DISPERSION_HELP.as_str())]
    dispersion: Option<String>,

    /// Integrate numerically on a 3D grid with this many velocities per axis,
    /// rather than using the closed forms.
    #[clap(long, help_heading = "BINNED")]
    binned: Option<usize>,

    /// The grid spans this speed either side of zero. Default: 6 dispersions.
    #[clap(long, help_heading = "BINNED")]
    grid_half_width: Option<String>,

    /// Drop grid cells faster than this (halo frame).
    #[clap(long, help_heading = "BINNED")]
    escape_speed: Option<String>,

    /// The observer moves through the halo at this speed.
    #[clap(long, help_heading = "BINNED")]
    circular_speed: Option<String>,

    /// Added in quadrature to every relative speed.
    #[clap(long, help_heading = "BINNED")]
    infall_speed: Option<String>,
}

impl VelocityFractionArgs {
    pub(super) fn run(&self) -> Result<(), MacroLightningError> {
        let v_min = parse_speed(&self.v_min)?;
        let dispersion = self
            .dispersion
            .as_deref()
            .map(parse_speed)
            .transpose()?
            .unwrap_or(DEFAULT_VELOCITY_DISPERSION);

        let mut printer = InfoPrinter::new("Velocity fraction".into());
        printer.push_block(vec![
            format!("v_min:      {v_min:e} cm/s").into(),
            format!("dispersion: {dispersion:e} cm/s").into(),
        ]);

        let (fraction, flux) = match self.binned {
            None => {
                let binned_only = [
                    &self.grid_half_width,
                    &self.escape_speed,
                    &self.circular_speed,
                    &self.infall_speed,
                ];
                if binned_only.iter().any(|a| a.is_some()) {
                    "Grid options are ignored without --binned".warn();
                }
                printer.push_line("Closed form".into());
                (
                    velocity_fraction(v_min, dispersion)?,
                    flux_speed(v_min, dispersion)?,
                )
            }

            Some(num) => {
                let half_width = self
                    .grid_half_width
                    .as_deref()
                    .map(parse_speed)
                    .transpose()?
                    .unwrap_or(DEFAULT_GRID_HALF_WIDTH * dispersion);
                let mut halo = BinnedHalo::symmetric(half_width, num, dispersion)?;
                if let Some(s) = self.escape_speed.as_deref() {
                    halo = halo.with_escape_speed(parse_speed(s)?)?;
                }
                if let Some(s) = self.circular_speed.as_deref() {
                    halo = halo.with_circular_speed(parse_speed(s)?)?;
                }
                if let Some(s) = self.infall_speed.as_deref() {
                    halo = halo.with_infall_speed(parse_speed(s)?)?;
                }
                debug!("{halo:?}");
                printer.push_line(format!("Binned: {} cells", halo.num_cells()).into());
                (halo.velocity_fraction(v_min)?, halo.flux_speed(v_min)?)
            }
        };
        printer.display();
        super::common::display_warnings();

        println!("velocity_fraction\t{fraction}");
        println!("flux_speed_cm_s\t{flux:e}");
        Ok(())
    }
}
