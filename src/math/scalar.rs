//! Scalar helpers: sign, powers, square root, tolerant equality, sampling.

use super::consts::{EPSILON, EPSILON_F64};
use crate::config::MathConfig;
use crate::error::{MathError, Result};
use num_traits::{Float, One, Zero};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::fmt::Debug;
use std::ops::{Div, Mul, Neg};

/// Relative convergence bound on `|x² - y|` for [`sqrt`].
pub const SQRT_TOLERANCE: f64 = 1e-15;

/// Sign of `x`: `-1`, `0`, or `1`.
#[inline]
pub fn sign<T>(x: T) -> T
where
    T: Zero + One + Neg<Output = T> + PartialOrd,
{
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Absolute value of `x`.
#[inline]
pub fn abs<T>(x: T) -> T
where
    T: Zero + Neg<Output = T> + PartialOrd,
{
    if x < T::zero() {
        -x
    } else {
        x
    }
}

/// Raise `x` to an integer power by repeated squaring.
///
/// A negative exponent yields the reciprocal of the positive power, and
/// `pow(x, 0)` is always one.
pub fn pow<T>(x: T, n: i32) -> T
where
    T: Copy + One + Mul<Output = T> + Div<Output = T>,
{
    let mut exp = n.unsigned_abs();
    let mut base = x;
    let mut result = T::one();

    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base;
        }
        base = base * base;
        exp >>= 1;
    }

    if n < 0 {
        T::one() / result
    } else {
        result
    }
}

/// Square root by Newton–Raphson iteration.
///
/// Fails with [`MathError::NegativeSqrt`] for negative or NaN input.
pub fn sqrt<T: Float>(y: T) -> Result<T> {
    let value = y.to_f64().unwrap_or(f64::NAN);
    if value.is_nan() || value < 0.0 {
        return Err(MathError::NegativeSqrt(value));
    }
    T::from(newton_sqrt(value)).ok_or(MathError::NegativeSqrt(value))
}

/// Newton–Raphson square root of a non-negative value.
///
/// Takes one step from `x = y`, landing on `(y + 1) / 2`, which never lies
/// below the root. From there the iterates decrease monotonically, so the
/// loop stops once `|x² - y|` drops below [`SQRT_TOLERANCE`] scaled by
/// `max(y, 1)` or the iterate stops decreasing.
pub(crate) fn newton_sqrt(y: f64) -> f64 {
    if y == 0.0 || !y.is_finite() {
        return y;
    }

    let tolerance = SQRT_TOLERANCE * y.max(1.0);
    let mut x = 0.5 * (y + 1.0);
    while (x * x - y).abs() >= tolerance {
        let next = 0.5 * (x + y / x);
        if next >= x {
            break;
        }
        x = next;
    }
    x
}

/// Square root for `f32` values known to be non-negative (squared norms).
#[inline]
pub(crate) fn sqrt_f32(y: f32) -> f32 {
    newton_sqrt(y as f64) as f32
}

/// Tolerance-aware equality.
pub trait Epsilon: Copy {
    /// Whether `self` and `other` are equal within the type's tolerance.
    fn equal(self, other: Self) -> bool;
}

impl Epsilon for f32 {
    #[inline]
    fn equal(self, other: Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl Epsilon for f64 {
    #[inline]
    fn equal(self, other: Self) -> bool {
        (self - other).abs() < EPSILON_F64
    }
}

macro_rules! exact_epsilon {
    ($($t:ty),*) => {
        $(
            impl Epsilon for $t {
                #[inline]
                fn equal(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

exact_epsilon!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Compare two numbers: within epsilon for floats, exactly otherwise.
#[inline]
pub fn equal<T: Epsilon>(x: T, y: T) -> bool {
    x.equal(y)
}

/// Clamp `x` into `[lo, hi]`.
#[inline]
pub fn clamp<T: PartialOrd>(x: T, lo: T, hi: T) -> T {
    let x = if x < lo { lo } else { x };
    if x > hi {
        hi
    } else {
        x
    }
}

/// Types a [`Sampler`] can draw from.
pub trait Sampleable: SampleUniform + PartialOrd + Copy + Debug {
    /// Whether `[min, max)` is a non-empty range the generator can cover.
    fn valid_range(min: Self, max: Self) -> bool;
}

macro_rules! int_sampleable {
    ($($t:ty),*) => {
        $(
            impl Sampleable for $t {
                #[inline]
                fn valid_range(min: Self, max: Self) -> bool {
                    min < max
                }
            }
        )*
    };
}

int_sampleable!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_sampleable {
    ($($t:ty),*) => {
        $(
            impl Sampleable for $t {
                #[inline]
                fn valid_range(min: Self, max: Self) -> bool {
                    min < max && (max - min).is_finite()
                }
            }
        )*
    };
}

float_sampleable!(f32, f64);

/// Uniform random sampler over half-open ranges.
///
/// Owned by the caller; two samplers never share state.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler seeded from system entropy.
    pub fn unseeded() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible sampler from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        log::debug!("Seeding random sampler with {seed:#x}");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler seeded from configuration.
    pub fn from_config(config: &MathConfig) -> Self {
        Self::seeded(config.seed)
    }

    /// Draw a value uniformly from `[min, max)`.
    ///
    /// Fails on an empty range, and for floats on infinite bounds or a
    /// width that overflows.
    pub fn sample<T: Sampleable>(&mut self, min: T, max: T) -> Result<T> {
        if !T::valid_range(min, max) {
            return Err(MathError::InvalidArgument(format!(
                "invalid sampling range [{min:?}, {max:?})"
            )));
        }
        Ok(self.rng.gen_range(min..max))
    }
}

thread_local! {
    static UNSEEDED: RefCell<Sampler> = RefCell::new(Sampler::unseeded());
    static SEEDED: RefCell<Sampler> = RefCell::new(Sampler::from_config(&MathConfig::default()));
}

/// Sample from `[min, max)` using this thread's entropy-seeded sampler.
pub fn random<T: Sampleable>(min: T, max: T) -> Result<T> {
    UNSEEDED.with(|s| s.borrow_mut().sample(min, max))
}

/// Sample from `[min, max)` using this thread's sampler seeded with
/// [`crate::config::DEFAULT_SEED`]. The sequence is identical on every thread.
pub fn random_s<T: Sampleable>(min: T, max: T) -> Result<T> {
    SEEDED.with(|s| s.borrow_mut().sample(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(sign(-3.5_f32), -1.0);
        assert_eq!(sign(0.0_f64), 0.0);
        assert_eq!(sign(7_i32), 1);
        assert_eq!(sign(-7_i64), -1);
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(-2.5_f32), 2.5);
        assert_eq!(abs(4_i32), 4);
    }

    #[test]
    fn test_pow() {
        assert!(equal(pow(2.7_f64, 3), 19.683));
        assert!(equal(pow(2.7_f64, -3), 1.0 / 19.683));
        assert_eq!(pow(2.7_f64, 0), 1.0);
        assert_eq!(pow(2.0_f32, 10), 1024.0);
    }

    #[test]
    fn test_sqrt_matches_reference() {
        let values = [0.0, 1e-12, 0.25, 0.5, 1.0, 2.0, 3.0, 10.0, 12345.678, 1e6, 1e12];
        for &v in &values {
            let s = sqrt(v).unwrap();
            assert!((s - v.sqrt()).abs() < 1e-9 * v.sqrt().max(1.0), "sqrt({v}) = {s}");
        }
    }

    #[test]
    fn test_sqrt_small_values() {
        for &v in &[1e-16, 1e-20, 1e-30, 1e-300, f64::MIN_POSITIVE] {
            let s = sqrt(v).unwrap();
            assert!((s - v.sqrt()).abs() <= 1e-12 * v.sqrt(), "sqrt({v}) = {s}");
        }
        assert!((sqrt(1e-16_f64).unwrap() - 1e-8).abs() < 1e-9);
    }

    #[test]
    fn test_sqrt_large_values() {
        for &v in &[1e30, 1e300, f64::MAX] {
            let s = sqrt(v).unwrap();
            assert!((s - v.sqrt()).abs() <= 1e-12 * v.sqrt(), "sqrt({v}) = {s}");
        }
    }

    #[test]
    fn test_sqrt_f32() {
        let s = sqrt(16.0_f32).unwrap();
        assert_eq!(s, 4.0);
    }

    #[test]
    fn test_sqrt_negative() {
        assert!(matches!(sqrt(-1.0_f64), Err(MathError::NegativeSqrt(_))));
        assert!(sqrt(f64::NAN).is_err());
    }

    #[test]
    fn test_sqrt_infinity() {
        assert_eq!(sqrt(f64::INFINITY).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_equal() {
        assert!(equal(1.0_f32, 1.0 + 1e-7));
        assert!(!equal(1.0_f32, 1.001));
        assert!(equal(1.0_f64, 1.0 + 1e-12));
        assert!(!equal(1.0_f64, 1.0 + 1e-6));
        assert!(equal(3_u8, 3));
        assert!(!equal(3_i32, 4));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0_f32, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5, 0, 10), 0);
        assert_eq!(clamp(0.5_f64, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_sampler_range() {
        let mut sampler = Sampler::seeded(7);
        for _ in 0..1000 {
            let f = sampler.sample(-1.0_f32, 1.0).unwrap();
            assert!((-1.0..1.0).contains(&f));
            let i = sampler.sample(3_i32, 6).unwrap();
            assert!((3..6).contains(&i));
        }
    }

    #[test]
    fn test_sampler_empty_range() {
        let mut sampler = Sampler::unseeded();
        assert!(matches!(
            sampler.sample(1.0_f64, 1.0),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(random(5_u32, 2).is_err());
    }

    #[test]
    fn test_sampler_rejects_unbounded_float_range() {
        let mut sampler = Sampler::seeded(1);
        assert!(matches!(
            sampler.sample(0.0_f64, f64::INFINITY),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(sampler.sample(f32::NEG_INFINITY, 0.0).is_err());
        assert!(sampler.sample(-f64::MAX, f64::MAX).is_err());
        assert!(sampler.sample(f64::NAN, 1.0).is_err());
        assert!(random_s(-f32::MAX, f32::MAX).is_err());
        let v = sampler.sample(-1e300_f64, 1e300).unwrap();
        assert!((-1e300..1e300).contains(&v));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = Sampler::seeded(99);
        let mut b = Sampler::seeded(99);
        for _ in 0..16 {
            assert_eq!(a.sample(0_u64, 1_000_000).unwrap(), b.sample(0_u64, 1_000_000).unwrap());
        }
    }

    #[test]
    fn test_random_s_same_on_every_thread() {
        let first = std::thread::spawn(|| random_s(0.0_f64, 1.0).unwrap())
            .join()
            .unwrap();
        let second = std::thread::spawn(|| random_s(0.0_f64, 1.0).unwrap())
            .join()
            .unwrap();
        assert_eq!(first, second);
    }
}
