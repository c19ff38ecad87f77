// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integrals over the Maxwellian speed distribution of the dark-matter halo.
//!
//! The 3D Maxwell-Boltzmann speed distribution with dispersion `a` is
//!
//! f(v) = sqrt(2/π) v² / a³ exp(-v² / 2a²),
//!
//! so the fraction of macros faster than `v_min` is the regularised upper
//! incomplete gamma function Q(3/2, (v_min/a)² / 2).

use std::f64::consts::PI;

use log::debug;
use rayon::prelude::*;

use super::{finite, positive, PhysicsError};
use crate::math::gamma_q;

/// The fraction of a Maxwellian with dispersion `a` [cm/s] that is faster than
/// `v_min` [cm/s]. Always in [0, 1].
pub fn velocity_fraction(v_min: f64, a: f64) -> Result<f64, PhysicsError> {
    let v_min = positive("v_min", v_min)?;
    let a = positive("velocity dispersion", a)?;

    let u = 0.5 * (v_min / a).powi(2);
    if u.is_infinite() {
        // Nothing is this fast.
        return Ok(0.0);
    }
    Ok(gamma_q(1.5, u)?.clamp(0.0, 1.0))
}

/// The partial first moment ∫ v f(v) dv from `v_min` [cm/s] to infinity, i.e.
/// [velocity_fraction] multiplied by the mean speed of the macros faster than
/// `v_min`. This is the speed that multiplies a number density to give the
/// flux of macros above threshold.
///
/// Unlike [velocity_fraction], `v_min` may be zero, in which case this is the
/// [mean_speed].
pub fn flux_speed(v_min: f64, a: f64) -> Result<f64, PhysicsError> {
    if !(v_min.is_finite() && v_min >= 0.0) {
        return Err(PhysicsError::Domain {
            name: "v_min",
            value: v_min,
        });
    }
    let a = positive("velocity dispersion", a)?;

    let u = 0.5 * (v_min / a).powi(2);
    if u.is_infinite() {
        return Ok(0.0);
    }
    finite(
        "flux speed",
        2.0 * a * (2.0 / PI).sqrt() * (1.0 + u) * (-u).exp(),
    )
}

/// The mean speed of a Maxwellian with dispersion `a` [cm/s].
pub fn mean_speed(a: f64) -> Result<f64, PhysicsError> {
    flux_speed(0.0, a)
}

/// A Maxwellian halo integrated numerically on an evenly-spaced 3D grid of
/// velocities. Unlike the closed forms, this can truncate the distribution at
/// the galactic escape speed, boost it into the frame of a planet moving at
/// the circular speed, and add an infall speed in quadrature.
///
/// Each grid cell with velocity `v` carries the weight
/// (Δv / v_vir)³ π^{-3/2} exp(-(|v| / v_vir)²), where v_vir = sqrt(2) a.
#[derive(Debug, Clone)]
pub struct BinnedHalo {
    /// Velocities along one Cartesian axis [cm/s]. Evenly spaced.
    velocities: Vec<f64>,

    /// The grid step [cm/s].
    step: f64,

    /// The velocity dispersion `a` [cm/s].
    dispersion: f64,

    /// Cells faster than this (in the halo frame) are dropped [cm/s].
    escape_speed: Option<f64>,

    /// The planet moves at this speed along the second axis [cm/s].
    circular_speed: f64,

    /// Added in quadrature to every relative speed [cm/s].
    infall_speed: f64,

    num_cells: usize,
}

/// The number of cells of a cubic grid with `num` values per axis.
fn grid_cells(num: usize) -> Result<usize, PhysicsError> {
    num.checked_pow(3).ok_or(PhysicsError::GridTooLarge(num))
}

impl BinnedHalo {
    /// Create a binned halo on the grid `velocities` (used along all three
    /// axes), which must be evenly spaced.
    pub fn new(velocities: Vec<f64>, dispersion: f64) -> Result<BinnedHalo, PhysicsError> {
        let dispersion = positive("velocity dispersion", dispersion)?;
        if velocities.len() < 2 {
            return Err(PhysicsError::GridTooSmall(velocities.len()));
        }
        let num_cells = grid_cells(velocities.len())?;
        if let Some(&v) = velocities.iter().find(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFinite {
                quantity: "grid velocity",
                value: v,
            });
        }

        let first_step = velocities[1] - velocities[0];
        let all_close = velocities
            .windows(2)
            .map(|w| w[1] - w[0])
            .all(|s| (s - first_step).abs() <= 1e-8 + 1e-5 * first_step.abs());
        if !all_close || first_step == 0.0 {
            return Err(PhysicsError::UnevenGrid);
        }

        Ok(BinnedHalo {
            velocities,
            step: first_step.abs(),
            dispersion,
            escape_speed: None,
            circular_speed: 0.0,
            infall_speed: 0.0,
            num_cells,
        })
    }

    /// A grid of `num` velocities spanning ±`half_width` [cm/s].
    pub fn symmetric(half_width: f64, num: usize, dispersion: f64) -> Result<BinnedHalo, PhysicsError> {
        let half_width = positive("grid half width", half_width)?;
        if num < 2 {
            return Err(PhysicsError::GridTooSmall(num));
        }
        grid_cells(num)?;
        let step = 2.0 * half_width / (num - 1) as f64;
        let velocities = (0..num).map(|i| -half_width + step * i as f64).collect();
        BinnedHalo::new(velocities, dispersion)
    }

    /// Drop cells faster than `escape_speed` [cm/s] in the halo frame.
    pub fn with_escape_speed(self, escape_speed: f64) -> Result<BinnedHalo, PhysicsError> {
        Ok(BinnedHalo {
            escape_speed: Some(positive("escape speed", escape_speed)?),
            ..self
        })
    }

    /// Boost the halo by `circular_speed` [cm/s] along the second axis.
    pub fn with_circular_speed(self, circular_speed: f64) -> Result<BinnedHalo, PhysicsError> {
        Ok(BinnedHalo {
            circular_speed: positive("circular speed", circular_speed)?,
            ..self
        })
    }

    /// Add `infall_speed` [cm/s] in quadrature to every relative speed.
    pub fn with_infall_speed(self, infall_speed: f64) -> Result<BinnedHalo, PhysicsError> {
        Ok(BinnedHalo {
            infall_speed: positive("infall speed", infall_speed)?,
            ..self
        })
    }

    /// The number of cells integrated over.
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Sum `f(relative speed) * weight` and the weights over every cell inside
    /// the escape speed.
    fn integrate<F>(&self, f: F) -> (f64, f64)
    where
        F: Fn(f64) -> f64 + Sync,
    {
        let v_vir = std::f64::consts::SQRT_2 * self.dispersion;
        let norm = (self.step / v_vir).powi(3) / PI.powf(1.5);
        let vs = &self.velocities;

        vs.par_iter()
            .map(|&vx| {
                let mut sum = 0.0;
                let mut weights = 0.0;
                for &vy in vs {
                    for &vz in vs {
                        let speed_sq = vx * vx + vy * vy + vz * vz;
                        if let Some(v_esc) = self.escape_speed {
                            if speed_sq > v_esc * v_esc {
                                continue;
                            }
                        }
                        let weight = norm * (-speed_sq / (v_vir * v_vir)).exp();
                        let vy_rel = vy - self.circular_speed;
                        let v_rel = (self.infall_speed * self.infall_speed
                            + vx * vx
                            + vy_rel * vy_rel
                            + vz * vz)
                            .sqrt();
                        sum += weight * f(v_rel);
                        weights += weight;
                    }
                }
                (sum, weights)
            })
            .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1))
    }

    /// The fraction of macros whose relative speed is at least `v_min` [cm/s].
    /// The binned distribution is normalised over the cells kept.
    pub fn velocity_fraction(&self, v_min: f64) -> Result<f64, PhysicsError> {
        let v_min = positive("v_min", v_min)?;
        debug!(
            "Integrating the velocity fraction over {} cells",
            self.num_cells()
        );
        let (sum, weights) = self.integrate(|v| if v >= v_min { 1.0 } else { 0.0 });
        let weights = positive("total grid weight", weights)?;
        Ok((sum / weights).clamp(0.0, 1.0))
    }

    /// The flux speed (see [flux_speed]) of macros whose relative speed is at
    /// least `v_min` [cm/s].
    pub fn flux_speed(&self, v_min: f64) -> Result<f64, PhysicsError> {
        if !(v_min.is_finite() && v_min >= 0.0) {
            return Err(PhysicsError::Domain {
                name: "v_min",
                value: v_min,
            });
        }
        let (sum, weights) = self.integrate(|v| if v >= v_min { v } else { 0.0 });
        let weights = positive("total grid weight", weights)?;
        finite("binned flux speed", sum / weights)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::constants::{DEFAULT_VELOCITY_DISPERSION, SQRT_2};

    const CANONICAL_FRACTION: f64 = 0.5724067044708798;

    #[test]
    fn test_canonical_fraction() {
        for a in [1e-3, 1.0, 156.0, DEFAULT_VELOCITY_DISPERSION, 3e10] {
            let fraction = velocity_fraction(SQRT_2 * a, a).unwrap();
            assert_abs_diff_eq!(fraction, CANONICAL_FRACTION, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fraction_is_monotonic_and_bounded() {
        let a = DEFAULT_VELOCITY_DISPERSION;
        let mut previous = 1.0;
        for i in 1..400 {
            let v_min = a * 0.025 * i as f64;
            let fraction = velocity_fraction(v_min, a).unwrap();
            assert!((0.0..=1.0).contains(&fraction));
            assert!(fraction <= previous, "{fraction} > {previous} at {v_min}");
            previous = fraction;
        }
    }

    #[test]
    fn test_fraction_limits() {
        let a = 1.0;
        assert_abs_diff_eq!(velocity_fraction(1e-8, a).unwrap(), 1.0, epsilon = 1e-12);
        assert!(velocity_fraction(50.0, a).unwrap() < 1e-300);
        assert_eq!(velocity_fraction(1e200, a).unwrap(), 0.0);
    }

    #[test]
    fn test_fraction_domain_errors() {
        assert!(matches!(
            velocity_fraction(1.0, -1.0),
            Err(PhysicsError::Domain {
                name: "velocity dispersion",
                ..
            })
        ));
        assert!(matches!(
            velocity_fraction(0.0, 1.0),
            Err(PhysicsError::Domain { name: "v_min", .. })
        ));
        assert!(velocity_fraction(f64::NAN, 1.0).is_err());
        assert!(velocity_fraction(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_fraction_is_idempotent() {
        let a = DEFAULT_VELOCITY_DISPERSION;
        let first = velocity_fraction(1.3 * a, a).unwrap();
        let second = velocity_fraction(1.3 * a, a).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_flux_speed() {
        let a = 2.0;
        // The mean of a Maxwellian is 2a sqrt(2/π).
        assert_relative_eq!(mean_speed(a).unwrap(), 2.0 * a * (2.0 / PI).sqrt());
        // The flux speed is the fraction times the mean speed above threshold,
        // so it can never exceed the mean speed and falls with the threshold.
        let mut previous = mean_speed(a).unwrap();
        for i in 1..50 {
            let v_min = 0.2 * i as f64;
            let flux = flux_speed(v_min, a).unwrap();
            let fraction = velocity_fraction(v_min, a).unwrap();
            assert!(flux <= previous);
            // Everything counted moves at least at v_min.
            assert!(flux >= v_min * fraction * (1.0 - 1e-12));
            previous = flux;
        }
        assert!(flux_speed(-1.0, a).is_err());
    }

    #[test]
    fn test_binned_matches_closed_form() {
        let a = 1.0;
        let halo = BinnedHalo::symmetric(6.0 * a, 81, a).unwrap();
        for v_min in [0.5, SQRT_2, 2.5] {
            assert_abs_diff_eq!(
                halo.velocity_fraction(v_min).unwrap(),
                velocity_fraction(v_min, a).unwrap(),
                epsilon = 1e-2
            );
            assert_relative_eq!(
                halo.flux_speed(v_min).unwrap(),
                flux_speed(v_min, a).unwrap(),
                max_relative = 2e-2
            );
        }
    }

    #[test]
    fn test_binned_truncation_and_boost() {
        let a = 1.0;
        let halo = BinnedHalo::symmetric(4.0, 41, a).unwrap();
        let truncated = halo.clone().with_escape_speed(1.5).unwrap();
        // Truncating removes the fast tail.
        assert!(truncated.velocity_fraction(1.2).unwrap() < halo.velocity_fraction(1.2).unwrap());
        assert_eq!(truncated.velocity_fraction(2.0).unwrap(), 0.0);

        // Boosting and adding infall make macros faster.
        let boosted = halo
            .clone()
            .with_circular_speed(1.0)
            .unwrap()
            .with_infall_speed(0.5)
            .unwrap();
        assert!(boosted.flux_speed(0.0).unwrap() > halo.flux_speed(0.0).unwrap());
        assert_abs_diff_eq!(boosted.velocity_fraction(0.4).unwrap(), 1.0);
    }

    #[test]
    fn test_binned_grid_errors() {
        assert!(matches!(
            BinnedHalo::new(vec![0.0, 1.0, 3.0], 1.0),
            Err(PhysicsError::UnevenGrid)
        ));
        assert!(matches!(
            BinnedHalo::new(vec![1.0], 1.0),
            Err(PhysicsError::GridTooSmall(1))
        ));
        assert!(matches!(
            BinnedHalo::new(vec![1.0, 1.0], 1.0),
            Err(PhysicsError::UnevenGrid)
        ));
        assert!(BinnedHalo::new(vec![0.0, 1.0], -1.0).is_err());
    }

    #[test]
    fn test_binned_grid_cell_count() {
        let halo = BinnedHalo::symmetric(4.0, 41, 1.0).unwrap();
        assert_eq!(halo.num_cells(), 41 * 41 * 41);

        // The cube of this overflows usize; nothing is allocated.
        let num = 1 << 22;
        assert!(matches!(
            BinnedHalo::symmetric(1.0, num, 1.0),
            Err(PhysicsError::GridTooLarge(n)) if n == num
        ));
    }
}
