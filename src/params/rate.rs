// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use log::info;
use thiserror::Error;
use vec1::Vec1;

use super::{
    output::{write_output, OutputType, WriteError},
    PhysicalParameters, Planet,
};
use crate::physics::{EventRate, PhysicsError, RateCalculator};

/// Evaluate every (mass, cross-section) pair on each planet.
pub(crate) struct RateParams {
    pub(crate) physics: PhysicalParameters,
    pub(crate) planets: Vec1<Planet>,
    pub(crate) masses: Vec1<f64>,
    pub(crate) cross_sections: Vec1<f64>,

    /// Overrides the planets' exposure times [s].
    pub(crate) exposure: Option<f64>,

    /// If not given, results go to stdout as tab-separated values.
    pub(crate) output: Option<(PathBuf, OutputType)>,
}

impl RateParams {
    pub(crate) fn run(&self) -> Result<Vec<EventRate>, RateError> {
        let mut rates = Vec::with_capacity(
            self.planets.len() * self.masses.len() * self.cross_sections.len(),
        );
        for &planet in &self.planets {
            let mut calc = RateCalculator::new(&self.physics, planet)?;
            if let Some(exposure) = self.exposure {
                calc = calc.with_exposure(exposure)?;
            }
            rates.extend(
                calc.evaluate_all(self.masses.as_slice(), self.cross_sections.as_slice())?,
            );
        }
        let num_excluded = rates.iter().filter(|r| r.excluded).count();
        info!("{num_excluded} of {} points are excluded", rates.len());

        match &self.output {
            Some((path, output_type)) => {
                write_output(&rates, path, *output_type, |f| write_rates_tsv(&rates, f))?;
                info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut out = BufWriter::new(stdout.lock());
                write_rates_tsv(&rates, &mut out).map_err(WriteError::from)?;
                out.flush().map_err(WriteError::from)?;
            }
        }

        Ok(rates)
    }
}

fn write_rates_tsv<W: Write>(rates: &[EventRate], mut w: W) -> std::io::Result<()> {
    writeln!(
        w,
        "planet\tmass_g\tcross_section_cm2\texpected_events\tseeds_leader\texcluded"
    )?;
    for r in rates {
        writeln!(
            w,
            "{}\t{:e}\t{:e}\t{:e}\t{}\t{}",
            r.planet,
            r.point.mass,
            r.point.cross_section,
            r.expected_events,
            r.seeds_leader,
            r.excluded
        )?;
    }
    Ok(())
}

#[derive(Error, Debug)]
pub(crate) enum RateError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

#[cfg(test)]
mod tests {
    use vec1::vec1;

    use super::*;

    #[test]
    fn test_rate_params_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.tsv");
        let params = RateParams {
            physics: PhysicalParameters::default(),
            planets: vec1![Planet::Earth, Planet::Jupiter],
            masses: vec1![1e3, 1e20],
            cross_sections: vec1![1e-12, 1e-4],
            exposure: None,
            output: Some((path.clone(), OutputType::Tsv)),
        };
        let rates = params.run().unwrap();
        assert_eq!(rates.len(), 8);
        assert_eq!(rates[0].planet, Planet::Earth);
        assert_eq!(rates[7].planet, Planet::Jupiter);
        // Far below any seeding threshold.
        assert_eq!(rates[0].expected_events, 0.0);
        // Light macros with a big cross-section are plentiful.
        assert!(rates[1].excluded);
        // Heavy macros are too rare.
        assert!(!rates[3].excluded);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 9);
        assert!(written.starts_with("planet\tmass_g"));
    }

    #[test]
    fn test_rate_params_exposure() {
        let dir = tempfile::tempdir().unwrap();
        let make = |exposure| RateParams {
            physics: PhysicalParameters::default(),
            planets: vec1![Planet::Earth],
            masses: vec1![1e10],
            cross_sections: vec1![1e-4],
            exposure,
            output: Some((dir.path().join("rates.json"), OutputType::Json)),
        };
        let short = make(Some(1.0)).run().unwrap();
        let long = make(Some(2.0)).run().unwrap();
        assert!(long[0].expected_events > short[0].expected_events);
        assert!(make(Some(-1.0)).run().is_err());
    }
}
