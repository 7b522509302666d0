//! Rational approximation of real ratios by Stern–Brocot descent.
//!
//! Turns a frequency/period ratio such as `1.4983` into the simplest fraction
//! (`3/2`) within a relative tolerance band. Terms are exact integers; only the
//! band comparison uses floating-point division.

use serde::{Deserialize, Serialize};

/// Default relative tolerance (a little over 1%, roughly 19 cents).
pub const DEFAULT_TOLERANCE: f64 = 0.011;

/// Maximum number of mediant steps before giving up.
pub const MAX_ITERATIONS: usize = 1000;

/// Largest reciprocal a positive input may have; leaves headroom for the
/// mediant sums above the first denominator.
const MAX_DENOMINATOR: f64 = (i64::MAX / 2) as f64;

/// A numerator/denominator pair. Not necessarily in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// The inverse ratio, e.g. the period ratio for a frequency ratio.
    pub fn reciprocal(self) -> Self {
        Self::new(self.denominator, self.numerator)
    }

    fn negate(self) -> Self {
        Self::new(-self.numerator, self.denominator)
    }

    /// Componentwise sum, `None` on overflow.
    fn mediant(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.numerator.checked_add(other.numerator)?,
            self.denominator.checked_add(other.denominator)?,
        ))
    }

    /// `self + k·step` componentwise, `None` on overflow.
    fn advance(self, step: Self, k: i64) -> Option<Self> {
        Some(Self::new(
            self.numerator.checked_add(step.numerator.checked_mul(k)?)?,
            self.denominator.checked_add(step.denominator.checked_mul(k)?)?,
        ))
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Outcome of an approximation search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Approximation {
    /// The fraction lies inside the tolerance band.
    Converged(Fraction),
    /// The step budget ran out (or terms overflowed); best-effort mediant.
    NotConverged(Fraction),
}

impl Approximation {
    pub fn fraction(&self) -> Fraction {
        match self {
            Self::Converged(f) | Self::NotConverged(f) => *f,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }

    fn map(self, f: impl FnOnce(Fraction) -> Fraction) -> Self {
        match self {
            Self::Converged(x) => Self::Converged(f(x)),
            Self::NotConverged(x) => Self::NotConverged(f(x)),
        }
    }
}

/// Inputs the search cannot work with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    NonFinite(f64),
    /// Magnitude too large for integer terms.
    TooLarge(f64),
    /// Nonzero magnitude so small its denominator would not fit in integer terms.
    TooSmall(f64),
    /// Tolerance must lie in `[0, 1)`.
    InvalidTolerance(f64),
}

impl std::fmt::Display for RatioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite(x) => write!(f, "cannot approximate non-finite value {}", x),
            Self::TooLarge(x) => write!(f, "value {} too large to approximate", x),
            Self::TooSmall(x) => write!(f, "value {} too small to approximate", x),
            Self::InvalidTolerance(t) => write!(f, "tolerance {} outside [0, 1)", t),
        }
    }
}

impl std::error::Error for RatioError {}

/// Approximate `x` with [`DEFAULT_TOLERANCE`].
pub fn approximate_default(x: f64) -> Result<Approximation, RatioError> {
    approximate(x, DEFAULT_TOLERANCE)
}

/// Find the smallest-denominator fraction within `[x·(1-tol), x·(1+tol)]`.
pub fn approximate(x: f64, tolerance: f64) -> Result<Approximation, RatioError> {
    search(x, tolerance, MAX_ITERATIONS)
}

fn search(x: f64, tolerance: f64, budget: usize) -> Result<Approximation, RatioError> {
    if !x.is_finite() {
        return Err(RatioError::NonFinite(x));
    }
    if !(0.0..1.0).contains(&tolerance) {
        return Err(RatioError::InvalidTolerance(tolerance));
    }
    if x < 0.0 {
        return Ok(search(-x, tolerance, budget)?.map(Fraction::negate));
    }
    if x.floor() + 1.0 >= i64::MAX as f64 {
        return Err(RatioError::TooLarge(x));
    }
    if x > 0.0 && x.recip() >= MAX_DENOMINATOR {
        return Err(RatioError::TooSmall(x));
    }

    let lower = x * (1.0 - tolerance);
    let upper = x * (1.0 + tolerance);
    let in_band = |v: f64| lower <= v && v <= upper;

    let base = x.floor() as i64;
    let mut left = Fraction::new(base, 1);
    let mut right = Fraction::new(base + 1, 1);
    let mut mediant = Fraction::new(x.round() as i64, 1);
    let mut value = mediant.value();
    let mut steps = 0;

    while !in_band(value) {
        if steps == budget {
            return Ok(best_effort(mediant, right));
        }
        steps += 1;

        let next = if value < lower {
            left = mediant;
            // Skip the run of mediants that would all land above the band.
            let k = jump_count(
                right.numerator as f64 - upper * right.denominator as f64,
                upper * left.denominator as f64 - left.numerator as f64,
            );
            settle_jump(right, left, k, |v| v > upper).map(|r| {
                right = r;
            })
        } else {
            right = mediant;
            let k = jump_count(
                lower * left.denominator as f64 - left.numerator as f64,
                right.numerator as f64 - lower * right.denominator as f64,
            );
            settle_jump(left, right, k, |v| v < lower).map(|l| {
                left = l;
            })
        };

        match next.and_then(|_| left.mediant(right)) {
            Some(m) => mediant = m,
            None => return Ok(best_effort(mediant, right)),
        }
        value = mediant.value();
    }

    Ok(Approximation::Converged(mediant))
}

/// Non-converged result. The first mediant of an input below 1/2 is `0/1`;
/// the right bound is the nearest nonzero stand-in.
fn best_effort(mediant: Fraction, right: Fraction) -> Approximation {
    if mediant.numerator == 0 {
        Approximation::NotConverged(right)
    } else {
        Approximation::NotConverged(mediant)
    }
}

/// Largest `k >= 0` with `k < num / den`, or `None` when it does not fit in `i64`.
fn jump_count(num: f64, den: f64) -> Option<i64> {
    if num <= 0.0 || den <= 0.0 {
        return Some(0);
    }
    let k = (num / den).ceil() - 1.0;
    if k >= i64::MAX as f64 {
        None
    } else {
        Some(k.max(0.0) as i64)
    }
}

/// Advance `bound` by up to `k` steps of `step`. The float estimate of `k`
/// overshoots by a few ulps of `k` near the band edge, so back off by
/// doubling amounts until the advanced bound is still outside the band.
fn settle_jump(
    bound: Fraction,
    step: Fraction,
    k: Option<i64>,
    stays_outside: impl Fn(f64) -> bool,
) -> Option<Fraction> {
    let k = k?;
    let mut back = 0i64;
    while back < k {
        let candidate = bound.advance(step, k - back)?;
        if stays_outside(candidate.value()) {
            return Some(candidate);
        }
        back = if back == 0 { 1 } else { back.saturating_mul(2) };
    }
    Some(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(x: f64) -> Approximation {
        approximate_default(x).unwrap()
    }

    #[test]
    fn perfect_fifth_is_three_halves() {
        assert_eq!(approx(1.5), Approximation::Converged(Fraction::new(3, 2)));
    }

    #[test]
    fn one_third_is_exact() {
        assert_eq!(approx(1.0 / 3.0), Approximation::Converged(Fraction::new(1, 3)));
    }

    #[test]
    fn one_sixth_has_nonzero_numerator() {
        let f = approx(1.0 / 6.0).fraction();
        assert_ne!(f.numerator, 0);
        assert_eq!(f, Fraction::new(1, 6));
    }

    #[test]
    fn integers_come_back_over_one() {
        assert_eq!(approx(2.0).fraction(), Fraction::new(2, 1));
        assert_eq!(approx(7.0).fraction(), Fraction::new(7, 1));
    }

    #[test]
    fn equal_tempered_intervals_snap_to_just_ratios() {
        let et = |semitones: f64| 2.0_f64.powf(semitones / 12.0);
        assert_eq!(approx(et(7.0)).fraction(), Fraction::new(3, 2));
        assert_eq!(approx(et(5.0)).fraction(), Fraction::new(4, 3));
        assert_eq!(approx(et(4.0)).fraction(), Fraction::new(5, 4));
        assert_eq!(approx(et(12.0)).fraction(), Fraction::new(2, 1));
    }

    #[test]
    fn prefers_simpler_fraction_inside_band() {
        // 13/10 is exact, 9/7 is inside the band with a smaller denominator
        assert_eq!(approx(1.3).fraction(), Fraction::new(9, 7));
    }

    #[test]
    fn all_small_ratios_land_in_band() {
        for n in 1..=1000i64 {
            for d in 1..=1000i64 {
                let x = n as f64 / d as f64;
                let a = approx(x);
                assert!(a.is_converged(), "{}/{} did not converge", n, d);
                let f = a.fraction();
                assert_ne!(f.numerator, 0, "{}/{} gave zero numerator", n, d);
                let v = f.value();
                assert!(
                    v >= x * (1.0 - DEFAULT_TOLERANCE) && v <= x * (1.0 + DEFAULT_TOLERANCE),
                    "{}/{} approximated as {} out of band",
                    n,
                    d,
                    f
                );
            }
        }
    }

    #[test]
    fn tiny_ratios_converge_with_unit_numerator() {
        for e in 3..=18 {
            for scale in [1.0, 3.7] {
                let x = scale * 10f64.powi(-e);
                let a = approx(x);
                assert!(a.is_converged(), "{} did not converge", x);
                let f = a.fraction();
                assert_eq!(f.numerator, 1, "{} approximated as {}", x, f);
                let v = f.value();
                assert!(
                    v >= x * (1.0 - DEFAULT_TOLERANCE) && v <= x * (1.0 + DEFAULT_TOLERANCE),
                    "{} approximated as {} out of band",
                    x,
                    f
                );
            }
        }
    }

    #[test]
    fn ratios_beyond_integer_terms_are_too_small() {
        assert!(matches!(approximate_default(1e-19), Err(RatioError::TooSmall(_))));
        assert!(matches!(approximate_default(1e-20), Err(RatioError::TooSmall(_))));
        assert!(matches!(approximate_default(-1e-20), Err(RatioError::TooSmall(_))));
        assert!(matches!(approximate_default(f64::MIN_POSITIVE), Err(RatioError::TooSmall(_))));
    }

    #[test]
    fn non_converged_small_input_keeps_nonzero_numerator() {
        let a = search(0.3, DEFAULT_TOLERANCE, 0).unwrap();
        assert_eq!(a, Approximation::NotConverged(Fraction::new(1, 1)));
    }

    #[test]
    fn zero_tolerance_finds_exact_fraction() {
        assert_eq!(approximate(0.75, 0.0).unwrap().fraction(), Fraction::new(3, 4));
    }

    #[test]
    fn exhausted_budget_reports_non_convergence() {
        let a = search(1.3, DEFAULT_TOLERANCE, 1).unwrap();
        assert!(!a.is_converged());
        assert!(a.fraction().denominator > 0);
        assert!(search(1.3, DEFAULT_TOLERANCE, MAX_ITERATIONS).unwrap().is_converged());
    }

    #[test]
    fn negative_input_is_mirrored() {
        assert_eq!(approx(-1.5).fraction(), Fraction::new(-3, 2));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(approximate_default(f64::NAN), Err(RatioError::NonFinite(_))));
        assert!(matches!(approximate_default(f64::INFINITY), Err(RatioError::NonFinite(_))));
        assert!(matches!(approximate(1.5, 1.0), Err(RatioError::InvalidTolerance(_))));
        assert!(matches!(approximate(1.5, -0.1), Err(RatioError::InvalidTolerance(_))));
        assert!(matches!(approximate_default(1e19), Err(RatioError::TooLarge(_))));
    }

    #[test]
    fn reciprocal_swaps_terms() {
        assert_eq!(Fraction::new(3, 2).reciprocal(), Fraction::new(2, 3));
        assert_eq!(Fraction::new(3, 2).to_string(), "3/2");
    }
}
