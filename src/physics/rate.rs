// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Expected lightning-strike counts and the exclusion boundary they imply.
//!
//! A macro seeds a straight leader when it arrives faster than both the
//! leader speed and its own seeding speed. Far from the planet, that arrival
//! speed corresponds to a slower speed (the infall speed is subtracted in
//! quadrature), so the number of events in the exposure time is
//!
//! N = (ρ_DM / M) πR² flux_speed(v∞_thr, a) T.

use std::io::Write;

use indicatif::ProgressBar;
use log::{debug, trace};
use ndarray::{prelude::*, Zip};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    finite, flux_speed, positive,
    threshold::{saturation_cross_section, seeding_speed, seeding_threshold},
    PhysicsError,
};
use crate::{
    math::{bisect, poisson_upper_limit},
    params::{PhysicalParameters, Planet},
};

/// Bisection tolerance on log10(σ).
const LOG_SIGMA_TOLERANCE: f64 = 1e-10;

const MAX_BISECTION_ITERATIONS: usize = 200;

/// A dark-matter mass [g] and cross-section [cm²].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidatePoint {
    pub mass: f64,
    pub cross_section: f64,
}

impl CandidatePoint {
    pub fn new(mass: f64, cross_section: f64) -> Result<CandidatePoint, PhysicsError> {
        Ok(CandidatePoint {
            mass: positive("mass", mass)?,
            cross_section: positive("cross-section", cross_section)?,
        })
    }
}

/// What a planet's lightning record says about one [CandidatePoint].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRate {
    pub point: CandidatePoint,

    pub planet: Planet,

    /// The expected number of macro-induced strikes in the exposure time.
    pub expected_events: f64,

    /// Can a macro with this cross-section seed a leader at all?
    pub seeds_leader: bool,

    /// Is this point ruled out at the configured confidence level?
    pub excluded: bool,
}

/// The lower edge of the excluded region for one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintCurve {
    pub planet: Planet,

    pub confidence_level: f64,

    /// Points with at least this many expected events are excluded.
    pub event_threshold: f64,

    /// Ordered by mass. Masses that can't be excluded have no point.
    pub points: Vec<CandidatePoint>,
}

impl ConstraintCurve {
    /// Write the curve as tab-separated values, with the metadata in comment
    /// lines.
    pub fn write_tsv<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "# planet: {}", self.planet)?;
        writeln!(w, "# confidence_level: {}", self.confidence_level)?;
        writeln!(w, "# event_threshold: {}", self.event_threshold)?;
        writeln!(w, "mass_g\tcross_section_cm2")?;
        for p in &self.points {
            writeln!(w, "{:e}\t{:e}", p.mass, p.cross_section)?;
        }
        Ok(())
    }
}

/// Evaluates expected event counts for one planet. Everything that doesn't
/// depend on the candidate point is computed once on creation.
#[derive(Debug, Clone)]
pub struct RateCalculator {
    planet: Planet,

    /// Local dark-matter density [g/cm³].
    dm_density: f64,

    /// Halo velocity dispersion [cm/s].
    dispersion: f64,

    number_density: f64,
    molecular_mass: f64,
    energy_per_length: f64,
    leader_speed: f64,
    infall_speed: f64,
    target_area: f64,
    exposure: f64,

    confidence_level: f64,
    event_threshold: f64,
    sigma_min: f64,
    sigma_sat: f64,
}

impl RateCalculator {
    pub fn new(params: &PhysicalParameters, planet: Planet) -> Result<RateCalculator, PhysicsError> {
        params.validate()?;
        let p = params.planet(planet);

        let sigma_min = seeding_threshold(params, planet)?;
        let sigma_sat = saturation_cross_section(params, planet)?;
        let event_threshold = poisson_upper_limit(p.observed_events, params.confidence_level)?;
        debug!(
            "{planet}: σ_min = {sigma_min:e} cm², σ_sat = {sigma_sat:e} cm², exclusion at {event_threshold} events"
        );

        Ok(RateCalculator {
            planet,
            dm_density: params.halo.density,
            dispersion: params.halo.dispersion,
            number_density: p.number_density,
            molecular_mass: p.molecular_mass,
            energy_per_length: params.seeding.energy_per_length(),
            leader_speed: p.leader_speed,
            infall_speed: p.infall_speed(),
            target_area: p.target_area(),
            exposure: p.exposure,
            confidence_level: params.confidence_level,
            event_threshold,
            sigma_min,
            sigma_sat,
        })
    }

    /// Use a different exposure time [s].
    pub fn with_exposure(self, exposure: f64) -> Result<RateCalculator, PhysicsError> {
        Ok(RateCalculator {
            exposure: positive("exposure", exposure)?,
            ..self
        })
    }

    pub fn planet(&self) -> Planet {
        self.planet
    }

    /// The seeding threshold σ_min [cm²].
    pub fn sigma_min(&self) -> f64 {
        self.sigma_min
    }

    /// The saturation cross-section σ_sat [cm²].
    pub fn sigma_sat(&self) -> f64 {
        self.sigma_sat
    }

    /// The Poisson upper limit that expected counts are compared against.
    pub fn event_threshold(&self) -> f64 {
        self.event_threshold
    }

    /// The expected number of events for `point`.
    pub fn expected_events(&self, point: CandidatePoint) -> Result<f64, PhysicsError> {
        let CandidatePoint {
            mass,
            cross_section,
        } = CandidatePoint::new(point.mass, point.cross_section)?;
        if cross_section < self.sigma_min {
            return Ok(0.0);
        }

        let v_seed = seeding_speed(
            cross_section,
            self.number_density,
            self.molecular_mass,
            self.energy_per_length,
        )?;
        let v_thr = self.leader_speed.max(v_seed);
        let v_inf = (v_thr * v_thr - self.infall_speed * self.infall_speed)
            .max(0.0)
            .sqrt();
        let flux = flux_speed(v_inf, self.dispersion)?;
        trace!("M = {mass:e} g, σ = {cross_section:e} cm²: v_thr = {v_thr:e} cm/s, v∞ = {v_inf:e} cm/s");

        let number_density = finite("macro number density", self.dm_density / mass)?;
        finite(
            "expected event count",
            number_density * self.target_area * flux * self.exposure,
        )
    }

    /// Evaluate `point` in full.
    pub fn evaluate(&self, point: CandidatePoint) -> Result<EventRate, PhysicsError> {
        let expected_events = self.expected_events(point)?;
        Ok(EventRate {
            point,
            planet: self.planet,
            expected_events,
            seeds_leader: point.cross_section >= self.sigma_min,
            excluded: expected_events >= self.event_threshold,
        })
    }

    /// The smallest excluded cross-section [cm²] at `mass` [g], or `None` if no
    /// cross-section is excluded.
    pub fn boundary_cross_section(&self, mass: f64) -> Result<Option<f64>, PhysicsError> {
        let mass = positive("mass", mass)?;
        let events_at = |sigma: f64| self.expected_events(CandidatePoint {
            mass,
            cross_section: sigma,
        });

        if events_at(self.sigma_min)? >= self.event_threshold {
            return Ok(Some(self.sigma_min));
        }
        // Above σ_sat the count doesn't grow any more.
        if events_at(self.sigma_sat)? < self.event_threshold {
            return Ok(None);
        }

        // The count is only evaluated at points between two that were just
        // evaluated successfully, so it can't fail here. Map any failure to
        // NaN anyway; bisect won't converge on it.
        let log_sigma = bisect(
            |log_sigma| {
                events_at(10f64.powf(log_sigma))
                    .map(|n| n - self.event_threshold)
                    .unwrap_or(f64::NAN)
            },
            self.sigma_min.log10(),
            self.sigma_sat.log10(),
            LOG_SIGMA_TOLERANCE,
            MAX_BISECTION_ITERATIONS,
        )?;

        // Bisection returns the middle of the final bracket. Nudge up to the
        // upper edge so the returned point is excluded.
        let sigma = 10f64.powf(log_sigma + LOG_SIGMA_TOLERANCE);
        Ok(Some(sigma.min(self.sigma_sat)))
    }

    /// The constraint curve over `masses` [g].
    pub fn constraint_curve(&self, masses: &[f64]) -> Result<ConstraintCurve, PhysicsError> {
        self.constraint_curve_with_progress(masses, &ProgressBar::hidden())
    }

    /// As [RateCalculator::constraint_curve], ticking `progress` once per mass.
    /// Masses are evaluated in parallel; the curve keeps their order.
    pub fn constraint_curve_with_progress(
        &self,
        masses: &[f64],
        progress: &ProgressBar,
    ) -> Result<ConstraintCurve, PhysicsError> {
        if masses.is_empty() {
            return Err(PhysicsError::NoMasses);
        }

        let boundaries = masses
            .par_iter()
            .map(|&mass| {
                let boundary = self.boundary_cross_section(mass);
                progress.inc(1);
                boundary.map(|b| b.map(|cross_section| CandidatePoint {
                    mass,
                    cross_section,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        progress.abandon_with_message(format!("Finished {}", self.planet));

        let points: Vec<CandidatePoint> = boundaries.into_iter().flatten().collect();
        debug!(
            "{}: {} of {} masses are excludable",
            self.planet,
            points.len(),
            masses.len()
        );

        Ok(ConstraintCurve {
            planet: self.planet,
            confidence_level: self.confidence_level,
            event_threshold: self.event_threshold,
            points,
        })
    }

    /// Expected event counts on the full grid of `masses` [g] (rows) and
    /// `cross_sections` [cm²] (columns).
    pub fn evaluate_grid(
        &self,
        masses: &[f64],
        cross_sections: &[f64],
    ) -> Result<Array2<f64>, PhysicsError> {
        let mut events = Array2::zeros((masses.len(), cross_sections.len()));
        let mut results: Array2<Result<(), PhysicsError>> =
            Array2::from_shape_simple_fn(events.dim(), || Ok(()));

        Zip::indexed(&mut events)
            .and(&mut results)
            .par_for_each(|(i_mass, i_sigma), n, result| {
                match CandidatePoint::new(masses[i_mass], cross_sections[i_sigma])
                    .and_then(|p| self.expected_events(p))
                {
                    Ok(value) => *n = value,
                    Err(e) => *result = Err(e),
                }
            });

        // Report the first failure in row-major order.
        for result in results.iter_mut() {
            std::mem::replace(result, Ok(()))?;
        }
        Ok(events)
    }

    /// [RateCalculator::evaluate] on every pair of `masses` [g] and
    /// `cross_sections` [cm²], mass-major.
    pub fn evaluate_all(
        &self,
        masses: &[f64],
        cross_sections: &[f64],
    ) -> Result<Vec<EventRate>, PhysicsError> {
        let events = self.evaluate_grid(masses, cross_sections)?;
        Ok(events
            .indexed_iter()
            .map(|((i_mass, i_sigma), &expected_events)| EventRate {
                point: CandidatePoint {
                    mass: masses[i_mass],
                    cross_section: cross_sections[i_sigma],
                },
                planet: self.planet,
                expected_events,
                seeds_leader: cross_sections[i_sigma] >= self.sigma_min,
                excluded: expected_events >= self.event_threshold,
            })
            .collect())
    }
}
