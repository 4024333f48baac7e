/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! A saturating, infinity-aware duration.
//!
//! Unlike the teacher crate's two-limb `(centuries: i16, nanoseconds: u64)`
//! representation, `Duration` here is a single `i128` nanosecond count. The
//! type still needs magnitude out to at least ±2^63 seconds, but it also
//! needs two reserved sentinel values for `+INFINITE`/`-INFINITE` that
//! saturate under every arithmetic operation rather than panic or wrap. A
//! flat `i128` gives us that: `i128::MAX`/`i128::MIN` are the sentinels, the
//! finite range is bounded far beneath them, and every operation is one
//! saturating scalar op instead of a two-limb carry/borrow dance.

mod ops;
mod parse;

use crate::timeunits::Unit;

/// Nanoseconds in the largest finite `Duration`, chosen to cover magnitudes
/// up to `i64::MAX` seconds while leaving the rest of the `i128` range free
/// for the `+INFINITE`/`-INFINITE` sentinels.
const MAX_FINITE_NANOS: i128 = 1_000_000_000i128 * (i64::MAX as i128);

/// A span of time, saturating at `±Duration::INFINITE` instead of
/// overflowing, with nanosecond resolution.
///
/// `Duration` forms a saturating abelian group under addition: it is
/// commutative and associative up to saturation, `ZERO` is the identity, and
/// every finite value has an additive inverse. `INFINITE` and `NEG_INFINITE`
/// are absorbing elements, with `INFINITE` dominant: `INFINITE +
/// NEG_INFINITE == INFINITE`.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Duration {
    nanos: i128,
}

impl Duration {
    /// The additive identity.
    pub const ZERO: Duration = Duration { nanos: 0 };
    /// The smallest representable nonzero magnitude.
    pub const EPSILON: Duration = Duration { nanos: 1 };
    /// The largest finite duration.
    pub const MAX: Duration = Duration {
        nanos: MAX_FINITE_NANOS,
    };
    /// The smallest (most negative) finite duration.
    pub const MIN: Duration = Duration {
        nanos: -MAX_FINITE_NANOS,
    };
    /// Positive infinity: the absorbing element, dominant over `NEG_INFINITE`.
    pub const INFINITE: Duration = Duration { nanos: i128::MAX };
    /// Negative infinity.
    pub const NEG_INFINITE: Duration = Duration { nanos: i128::MIN };

    pub(crate) const fn from_nanos_saturating(nanos: i128) -> Duration {
        if nanos > MAX_FINITE_NANOS {
            Duration::INFINITE
        } else if nanos < -MAX_FINITE_NANOS {
            Duration::NEG_INFINITE
        } else {
            Duration { nanos }
        }
    }

    /// Builds a `Duration` from a whole count of a [`Unit`], saturating on overflow.
    pub fn from_i64_units(count: i64, unit: Unit) -> Duration {
        match (count as i128).checked_mul(unit.nanoseconds()) {
            Some(nanos) => Duration::from_nanos_saturating(nanos),
            None => Duration::signed_infinite(count.signum() as i8),
        }
    }

    /// Builds a `Duration` from a fractional count of a [`Unit`], saturating on overflow.
    pub fn from_f64_units(count: f64, unit: Unit) -> Duration {
        if count.is_nan() {
            return Duration::ZERO;
        }
        let nanos_f = count * (unit.nanoseconds() as f64);
        Duration::from_f64_nanos_saturating(nanos_f)
    }

    fn from_f64_nanos_saturating(nanos_f: f64) -> Duration {
        if !nanos_f.is_finite() {
            return if nanos_f.is_sign_negative() {
                Duration::NEG_INFINITE
            } else {
                Duration::INFINITE
            };
        }
        // `as i128` on a float is a saturating cast since Rust 1.45, so this
        // lands on +-INFINITE automatically for anything past MAX_FINITE_NANOS.
        Duration::from_nanos_saturating(nanos_f.round() as i128)
    }

    pub(crate) const fn signed_infinite(sign: i8) -> Duration {
        if sign < 0 {
            Duration::NEG_INFINITE
        } else {
            Duration::INFINITE
        }
    }

    pub const fn from_seconds(seconds: i64) -> Duration {
        Duration::from_nanos_saturating(seconds as i128 * 1_000_000_000)
    }

    pub const fn from_nanos(nanos: i64) -> Duration {
        Duration::from_nanos_saturating(nanos as i128)
    }

    pub fn from_seconds_f64(seconds: f64) -> Duration {
        if seconds.is_nan() {
            return Duration::ZERO;
        }
        Duration::from_f64_nanos_saturating(seconds * 1.0e9)
    }

    /// Total nanoseconds as an `i128`, or `None` if this is an infinite value.
    pub const fn total_nanoseconds(&self) -> Option<i128> {
        if self.is_infinite() {
            None
        } else {
            Some(self.nanos)
        }
    }

    pub(crate) const fn raw_nanos(&self) -> i128 {
        self.nanos
    }

    /// Total seconds as an `f64`. Infinite durations map to `f64::INFINITY`/`NEG_INFINITY`.
    pub fn total_seconds_f64(&self) -> f64 {
        if self.nanos == i128::MAX {
            f64::INFINITY
        } else if self.nanos == i128::MIN {
            f64::NEG_INFINITY
        } else {
            (self.nanos as f64) / 1.0e9
        }
    }

    pub const fn is_infinite(&self) -> bool {
        self.nanos == i128::MAX || self.nanos == i128::MIN
    }

    pub const fn is_positive_infinite(&self) -> bool {
        self.nanos == i128::MAX
    }

    pub const fn is_negative_infinite(&self) -> bool {
        self.nanos == i128::MIN
    }

    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    /// -1, 0, or 1, matching the sign of the value (including infinities).
    pub const fn signum(&self) -> i8 {
        if self.nanos > 0 {
            1
        } else if self.nanos < 0 {
            -1
        } else {
            0
        }
    }

    pub fn abs(self) -> Duration {
        if self.nanos < 0 {
            -self
        } else {
            self
        }
    }

    pub fn min(self, other: Duration) -> Duration {
        if self <= other {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Duration) -> Duration {
        if self >= other {
            self
        } else {
            other
        }
    }

    /// Truncates towards zero to the nearest multiple of `unit`.
    ///
    /// Infinite values, and a zero or infinite `unit`, pass through unchanged.
    pub fn trunc(self, unit: Duration) -> Duration {
        if self.is_infinite() || unit.is_infinite() || unit.nanos == 0 {
            return self;
        }
        let q = self.nanos / unit.nanos;
        Duration::from_nanos_saturating(q * unit.nanos)
    }

    /// Rounds towards negative infinity to the nearest multiple of `unit`.
    pub fn floor(self, unit: Duration) -> Duration {
        if self.is_infinite() || unit.is_infinite() || unit.nanos == 0 {
            return self;
        }
        let u = unit.nanos.abs();
        Duration::from_nanos_saturating(self.nanos.div_euclid(u) * u)
    }

    /// Rounds towards positive infinity to the nearest multiple of `unit`.
    pub fn ceil(self, unit: Duration) -> Duration {
        if self.is_infinite() || unit.is_infinite() || unit.nanos == 0 {
            return self;
        }
        let floored = self.floor(unit);
        if floored == self {
            floored
        } else {
            floored + unit.abs()
        }
    }

    /// Truncated-toward-zero integer division: `self == quotient * den + remainder`,
    /// with `remainder` always taking the sign of `self` (or zero).
    ///
    /// An infinite operand, or division by a zero-length `den`, saturates the
    /// quotient to `i64::MAX`/`i64::MIN` by sign rather than panicking.
    pub fn idiv(self, den: Duration) -> (i64, Duration) {
        if den.nanos == 0 {
            let q = if self.nanos < 0 { i64::MIN } else { i64::MAX };
            return (q, self);
        }
        if den.is_infinite() {
            if self.is_infinite() {
                let sign = self.signum() as i32 * den.signum() as i32;
                let q = if sign < 0 { i64::MIN } else { i64::MAX };
                return (q, Duration::ZERO);
            }
            return (0, self);
        }
        if self.is_infinite() {
            let sign = self.signum() as i32 * den.nanos.signum() as i32;
            let q = if sign < 0 { i64::MIN } else { i64::MAX };
            return (q, self);
        }
        let q128 = self.nanos / den.nanos;
        let q = q128.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        let consumed = ops::mul_i128_saturating(q as i128, den.nanos);
        (q, self - consumed)
    }

    /// Computes `self * num / den`, rounding half away from zero and saturating
    /// at `±INFINITE`.
    ///
    /// Used by the smear/unsmear interpolation to keep the segment-fraction
    /// arithmetic exact rational math instead of introducing floating-point
    /// rounding into a bit-exactness contract.
    pub(crate) fn scaled(self, num: i64, den: i64) -> Duration {
        let result_sign = self.signum() as i32 * num.signum() as i32 * den.signum() as i32;
        if self.is_infinite() || den == 0 {
            return Duration::signed_infinite(if result_sign < 0 { -1 } else { 1 });
        }
        let den = den as i128;
        match self.nanos.checked_mul(num as i128) {
            Some(prod) => {
                let q = prod / den;
                let r = prod % den;
                let adj = if 2 * r.abs() >= den.abs() { r.signum() } else { 0 };
                Duration::from_nanos_saturating(q + adj)
            }
            None => Duration::signed_infinite(if result_sign < 0 { -1 } else { 1 }),
        }
    }

    /// Floating-point division: `self / den`, matching IEEE-754 semantics
    /// except that `INFINITE / INFINITE` yields a signed infinity (never `NaN`).
    pub fn fdiv(self, den: Duration) -> f64 {
        let num_inf = self.is_infinite();
        let den_inf = den.is_infinite();
        match (num_inf, den_inf) {
            (true, true) => {
                let sign = self.signum() as i32 * den.signum() as i32;
                if sign < 0 {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            (true, false) => {
                let den_sign = if den.nanos < 0 { -1 } else { 1 };
                let sign = self.signum() as i32 * den_sign;
                if sign < 0 {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            (false, true) => 0.0,
            (false, false) => {
                if den.nanos == 0 {
                    if self.nanos < 0 {
                        f64::NEG_INFINITY
                    } else {
                        f64::INFINITY
                    }
                } else {
                    (self.nanos as f64) / (den.nanos as f64)
                }
            }
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::ZERO
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Duration({self})")
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for Duration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "std")]
impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
