// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use thiserror::Error;
use vec1::Vec1;

use super::{
    output::{write_output, OutputType, WriteError},
    PhysicalParameters, Planet,
};
use crate::{
    physics::{ConstraintCurve, PhysicsError, RateCalculator},
    PROGRESS_BARS,
};

/// Sweep masses to find the exclusion boundary of each planet.
pub(crate) struct ConstraintsParams {
    pub(crate) physics: PhysicalParameters,
    pub(crate) planets: Vec1<Planet>,

    /// Masses [g], in ascending order.
    pub(crate) masses: Vec1<f64>,

    /// Overrides the planets' exposure times [s].
    pub(crate) exposure: Option<f64>,

    /// If not given, curves go to stdout as tab-separated values.
    pub(crate) output: Option<(PathBuf, OutputType)>,
}

impl ConstraintsParams {
    pub(crate) fn run(&self) -> Result<Vec<ConstraintCurve>, ConstraintsError> {
        let calcs = self
            .planets
            .iter()
            .map(|&planet| {
                let calc = RateCalculator::new(&self.physics, planet)?;
                match self.exposure {
                    Some(exposure) => calc.with_exposure(exposure),
                    None => Ok(calc),
                }
            })
            .collect::<Result<Vec<_>, PhysicsError>>()?;

        // Progress bars.
        let multi_progress = MultiProgress::with_draw_target(if PROGRESS_BARS.load() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        });
        let progress_bars = calcs
            .iter()
            .map(|calc| {
                let pb = ProgressBar::new(self.masses.len() as _)
                    .with_style(
                        ProgressStyle::default_bar()
                            .template("{msg:17}: [{wide_bar:.blue}] {pos:2}/{len:2} masses ({elapsed_precise}<{eta_precise})")
                            .unwrap_or_else(|_| ProgressStyle::default_bar())
                            .progress_chars("=> "),
                    )
                    .with_position(0)
                    .with_message(format!("Sweeping {}", calc.planet()));
                multi_progress.add(pb)
            })
            .collect::<Vec<_>>();

        info!("Finding the exclusion boundary over {} masses", self.masses.len());
        let mut curves = Vec::with_capacity(calcs.len());
        for (calc, pb) in calcs.iter().zip(progress_bars.iter()) {
            let curve = calc.constraint_curve_with_progress(&self.masses, pb)?;
            match (curve.points.first(), curve.points.last()) {
                (Some(first), Some(last)) => info!(
                    "{}: excluded from {:e} g to {:e} g (σ ≥ {:e} cm² at the lightest mass)",
                    curve.planet, first.mass, last.mass, first.cross_section
                ),
                _ => info!("{}: no mass in the sweep is excluded", curve.planet),
            }
            curves.push(curve);
        }

        match &self.output {
            Some((path, output_type)) => {
                write_output(&curves, path, *output_type, |f| write_curves_tsv(&curves, f))?;
                info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                write_curves_tsv(&curves, &mut out).map_err(WriteError::from)?;
                out.flush().map_err(WriteError::from)?;
            }
        }

        Ok(curves)
    }
}

/// Curves are separated by a blank line.
fn write_curves_tsv<W: Write>(curves: &[ConstraintCurve], mut w: W) -> std::io::Result<()> {
    for (i, curve) in curves.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        curve.write_tsv(&mut w)?;
    }
    Ok(())
}

#[derive(Error, Debug)]
pub(crate) enum ConstraintsError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
