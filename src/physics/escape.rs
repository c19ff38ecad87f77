// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Escape speeds of compound systems.

A body leaving a planet at the planet's escape speed is still bound to the
Sun. Having escaped the planet, it keeps the planet's orbital speed `vo`
around the Sun, so it only needs the excess `ve2 - vo` to escape the Sun as
well. The total escape speed is then

  v_te = sqrt(ve1² + (ve2 - vo)²) = sqrt(ve1² + (k ve2)²),

where k = 1 - 1/sqrt(2) ≈ 0.2929 for circular orbits. Run backwards, this is
the smallest speed a macro falling in from outside the Solar System has on
arrival at a planet.
 */

use super::{finite, non_negative, positive, PhysicsError};
use crate::constants::FRAC_1_SQRT_2;

/// Two-body escape speed. `ve1` is the escape speed of the inner body, `ve2`
/// the escape speed of the outer body at the inner body's orbit, and `vo` the
/// orbital speed of the inner body around the outer one. If `vo` is `None`,
/// the orbit is circular (`vo = ve2 / sqrt(2)`).
///
/// # Examples
///
/// Escaping the Solar System from the Earth's surface takes 16.65 km/s.
///
/// ```
/// # use approx::assert_abs_diff_eq;
/// use macro_lightning::physics::escape::twobody_vesc;
///
/// let v = twobody_vesc(11.186, 42.1, None).unwrap();
/// assert_abs_diff_eq!(v, 16.6485836, epsilon = 1e-6);
/// ```
pub fn twobody_vesc(ve1: f64, ve2: f64, vo: Option<f64>) -> Result<f64, PhysicsError> {
    let ve1 = positive("escape speed", ve1)?;
    let ve2 = positive("escape speed", ve2)?;
    let vo = vo.map(|vo| non_negative("orbital speed", vo)).transpose()?;
    finite("escape speed", compound_vesc(ve1, ve2, vo))
}

/// [twobody_vesc] without checking its inputs. Callers must have validated
/// the speeds.
pub(crate) fn compound_vesc(ve1: f64, ve2: f64, vo: Option<f64>) -> f64 {
    let vo = vo.unwrap_or(ve2 * FRAC_1_SQRT_2);
    ve1.hypot(ve2 - vo)
}

/// Multi-body escape speed. `vescs` are ordered from the innermost to the
/// outermost body. `vo`, if supplied, holds the orbital speed of each body
/// around the next one out (one fewer than `vescs`); otherwise all orbits are
/// circular.
///
/// # Examples
///
/// Escaping the Galaxy from the Earth's surface takes 162 km/s.
///
/// ```
/// # use approx::assert_abs_diff_eq;
/// use macro_lightning::physics::escape::multibody_vesc;
///
/// let v = multibody_vesc(&[11.186, 42.1, 550.0], None).unwrap();
/// assert_abs_diff_eq!(v, 161.94929058, epsilon = 1e-6);
/// ```
pub fn multibody_vesc(vescs: &[f64], vo: Option<&[f64]>) -> Result<f64, PhysicsError> {
    Ok(multibody_vesc_accumulate(vescs, vo)?
        .last()
        .copied()
        .unwrap_or(0.0))
}

/// Like [multibody_vesc], but the escape speed of each successively larger
/// system is returned, e.g. for [Earth, Sun, Galaxy] the escape speeds from
/// the Earth, the Earth-Sun system and the Earth-Sun-Galaxy system.
pub fn multibody_vesc_accumulate(
    vescs: &[f64],
    vo: Option<&[f64]>,
) -> Result<Vec<f64>, PhysicsError> {
    let (first, rest) = match vescs.split_first() {
        Some(s) => s,
        None => return Ok(vec![]),
    };
    for &ve in vescs {
        positive("escape speed", ve)?;
    }

    let excesses: Vec<f64> = match vo {
        Some(vo) => {
            if vo.len() != rest.len() {
                return Err(PhysicsError::OrbitalSpeedCount {
                    expected: rest.len(),
                    got: vo.len(),
                });
            }
            let mut excesses = Vec::with_capacity(vo.len());
            for (ve, &vo) in rest.iter().zip(vo) {
                excesses.push(ve - non_negative("orbital speed", vo)?);
            }
            excesses
        }
        None => rest.iter().map(|ve| ve * (1.0 - FRAC_1_SQRT_2)).collect(),
    };

    let mut total = *first;
    let mut out = Vec::with_capacity(vescs.len());
    out.push(total);
    for excess in excesses {
        total = finite("escape speed", total.hypot(excess))?;
        out.push(total);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_twobody_explicit_orbit() {
        // A body at rest relative to the outer body needs the full escape
        // speed of both.
        assert_abs_diff_eq!(twobody_vesc(3.0, 4.0, Some(0.0)).unwrap(), 5.0);
        // Orbiting at the outer escape speed leaves only the inner one.
        assert_abs_diff_eq!(twobody_vesc(3.0, 4.0, Some(4.0)).unwrap(), 3.0);
    }

    #[test]
    fn test_multibody_matches_twobody() {
        let two = twobody_vesc(11.186, 42.1, None).unwrap();
        let multi = multibody_vesc(&[11.186, 42.1], None).unwrap();
        assert_abs_diff_eq!(two, multi, epsilon = 1e-12);
    }

    #[test]
    fn test_multibody_accumulate() {
        let acc = multibody_vesc_accumulate(&[11.186, 42.1, 550.0], None).unwrap();
        assert_eq!(acc.len(), 3);
        assert_abs_diff_eq!(acc[0], 11.186);
        assert_abs_diff_eq!(acc[1], 16.6485836, epsilon = 1e-6);
        assert_abs_diff_eq!(acc[2], 161.94929058, epsilon = 1e-6);
    }

    #[test]
    fn test_multibody_orbital_speeds() {
        let v = multibody_vesc(&[3.0, 10.0], Some(&[6.0])).unwrap();
        assert_abs_diff_eq!(v, 5.0);

        assert!(matches!(
            multibody_vesc(&[3.0, 10.0, 20.0], Some(&[6.0])),
            Err(PhysicsError::OrbitalSpeedCount {
                expected: 2,
                got: 1
            })
        ));
        assert_eq!(multibody_vesc(&[], None).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_speeds() {
        for bad in [f64::NAN, f64::INFINITY, -1.0, 0.0] {
            assert!(matches!(
                twobody_vesc(bad, 42.1, None),
                Err(PhysicsError::Domain {
                    name: "escape speed",
                    ..
                })
            ));
            assert!(twobody_vesc(11.186, bad, None).is_err());
            assert!(multibody_vesc(&[11.186, bad], None).is_err());
            assert!(multibody_vesc_accumulate(&[bad], None).is_err());
        }
        for bad in [f64::NAN, f64::NEG_INFINITY, -1.0] {
            assert!(matches!(
                twobody_vesc(3.0, 4.0, Some(bad)),
                Err(PhysicsError::Negative {
                    name: "orbital speed",
                    ..
                })
            ));
            assert!(multibody_vesc(&[3.0, 10.0], Some(&[bad])).is_err());
        }
    }

    #[test]
    fn test_overflowing_speeds() {
        assert!(matches!(
            twobody_vesc(f64::MAX, f64::MAX, Some(0.0)),
            Err(PhysicsError::NonFinite { .. })
        ));
        assert!(matches!(
            multibody_vesc(&[f64::MAX, f64::MAX], Some(&[0.0])),
            Err(PhysicsError::NonFinite { .. })
        ));
    }
}
