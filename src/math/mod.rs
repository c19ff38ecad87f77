// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics: the log-gamma and regularised incomplete gamma
//! functions, a bisection root finder, and sweep helpers.

mod error;

pub use error::MathError;

use log::trace;

/// Relative precision targeted by the incomplete gamma evaluations.
const GAMMA_EPS: f64 = 1e-15;

/// Anything smaller than this is treated as zero in the continued fraction.
const FPMIN: f64 = f64::MIN_POSITIVE / f64::EPSILON;

/// The most terms a series or continued fraction is allowed to use.
const MAX_ITERATIONS: usize = 1000;

/// Lanczos coefficients for g = 7, n = 9.
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural logarithm of the gamma function, for `x > 0`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(ln_gamma(0.5), 0.5 * PI.ln());`
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        return (std::f64::consts::PI / (std::f64::consts::PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let sum = LANCZOS_COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS_COEFFS[0], |acc, (i, c)| acc + c / (x + i as f64));
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Regularised lower incomplete gamma function P(s, x).
pub fn gamma_p(s: f64, x: f64) -> Result<f64, MathError> {
    check_gamma_args(s, x)?;
    if x == 0.0 {
        return Ok(0.0);
    }
    if x < s + 1.0 {
        gamma_series(s, x)
    } else {
        Ok(1.0 - gamma_continued_fraction(s, x)?)
    }
}

/// Regularised upper incomplete gamma function Q(s, x) = 1 - P(s, x).
///
/// Evaluating Q directly (rather than 1 - P) keeps precision in the tail.
pub fn gamma_q(s: f64, x: f64) -> Result<f64, MathError> {
    check_gamma_args(s, x)?;
    if x == 0.0 {
        return Ok(1.0);
    }
    if x < s + 1.0 {
        Ok(1.0 - gamma_series(s, x)?)
    } else {
        gamma_continued_fraction(s, x)
    }
}

fn check_gamma_args(s: f64, x: f64) -> Result<(), MathError> {
    if !(s.is_finite() && s > 0.0) {
        return Err(MathError::InvalidArgument {
            name: "s",
            value: s,
        });
    }
    if !(x.is_finite() && x >= 0.0) {
        return Err(MathError::InvalidArgument {
            name: "x",
            value: x,
        });
    }
    Ok(())
}

/// The prefactor x^s e^{-x} / Γ(s), computed in log space.
fn gamma_prefactor(s: f64, x: f64) -> f64 {
    (s * x.ln() - x - ln_gamma(s)).exp()
}

/// P(s, x) by its power series. Converges quickly for x < s + 1.
fn gamma_series(s: f64, x: f64) -> Result<f64, MathError> {
    let mut ap = s;
    let mut del = 1.0 / s;
    let mut sum = del;
    for _ in 0..MAX_ITERATIONS {
        ap += 1.0;
        del *= x / ap;
        sum += del;
        if del.abs() < sum.abs() * GAMMA_EPS {
            return Ok(sum * gamma_prefactor(s, x));
        }
    }

    Err(MathError::NoConvergence {
        routine: "incomplete gamma series",
        iterations: MAX_ITERATIONS,
    })
}

/// Q(s, x) by its continued fraction (modified Lentz). Converges quickly for
/// x > s + 1.
fn gamma_continued_fraction(s: f64, x: f64) -> Result<f64, MathError> {
    let mut b = x + 1.0 - s;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=MAX_ITERATIONS {
        let an = -(i as f64) * (i as f64 - s);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < GAMMA_EPS {
            return Ok(h * gamma_prefactor(s, x));
        }
    }

    Err(MathError::NoConvergence {
        routine: "incomplete gamma continued fraction",
        iterations: MAX_ITERATIONS,
    })
}

/// Find the root of a monotonic function `f` between `lo` and `hi` by
/// bisection. `f(lo)` and `f(hi)` must have different signs (or one of them
/// must be zero). Iteration stops when the bracket is narrower than `tol`.
pub fn bisect<F>(f: F, mut lo: f64, mut hi: f64, tol: f64, max_iter: usize) -> Result<f64, MathError>
where
    F: Fn(f64) -> f64,
{
    let mut f_lo = f(lo);
    let f_hi = f(hi);
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if !(f_lo.is_finite() && f_hi.is_finite()) || f_lo.signum() == f_hi.signum() {
        return Err(MathError::NoBracket { lo, hi });
    }

    for i in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        if (hi - lo).abs() < tol {
            trace!("bisection converged after {i} iterations");
            return Ok(mid);
        }
        let f_mid = f(mid);
        if f_mid == 0.0 {
            return Ok(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    Err(MathError::NoConvergence {
        routine: "bisection",
        iterations: max_iter,
    })
}

/// The upper limit on a Poisson mean at confidence level `cl`, given
/// `observed` events, i.e. the mean λ for which P(N ≤ observed | λ) = 1 - cl.
///
/// # Examples
///
/// `assert_abs_diff_eq!(poisson_upper_limit(0, 0.9)?, 10f64.ln());`
pub fn poisson_upper_limit(observed: u32, cl: f64) -> Result<f64, MathError> {
    if !(cl > 0.0 && cl < 1.0) {
        return Err(MathError::InvalidArgument {
            name: "confidence level",
            value: cl,
        });
    }

    // P(N ≤ n | λ) = Q(n + 1, λ), which falls monotonically from 1 at λ = 0.
    let s = f64::from(observed) + 1.0;
    let target = 1.0 - cl;
    let f = |lambda: f64| gamma_q(s, lambda).unwrap_or(f64::NAN) - target;

    let mut hi = s + 10.0;
    while f(hi) > 0.0 {
        hi *= 2.0;
        if !hi.is_finite() {
            return Err(MathError::NoBracket { lo: 0.0, hi });
        }
    }

    bisect(f, 0.0, hi, 1e-12, MAX_ITERATIONS)
}

/// `n` logarithmically spaced values from `start` to `stop` (inclusive). Both
/// ends must be positive.
pub fn log_space(start: f64, stop: f64, n: usize) -> Result<Vec<f64>, MathError> {
    if !(start.is_finite() && start > 0.0) {
        return Err(MathError::InvalidArgument {
            name: "start",
            value: start,
        });
    }
    if !(stop.is_finite() && stop > 0.0) {
        return Err(MathError::InvalidArgument {
            name: "stop",
            value: stop,
        });
    }

    let (log_start, log_stop) = (start.log10(), stop.log10());
    Ok(match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (log_stop - log_start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    // Land exactly on the end points.
                    if i == 0 {
                        start
                    } else if i == n - 1 {
                        stop
                    } else {
                        10f64.powf(log_start + step * i as f64)
                    }
                })
                .collect()
        }
    })
}
