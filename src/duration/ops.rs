/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! Arithmetic trait impls for [`Duration`], all saturating instead of panicking.
//!
//! `INFINITE` is the dominant absorbing element: `INFINITE + NEG_INFINITE`
//! and `NEG_INFINITE + INFINITE` both evaluate to `INFINITE`, matching the
//! teacher crate's precedent of treating its own `Duration::MAX`/`MIN` as
//! saturating rather than wrapping bounds.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Rem, Sub, SubAssign};

use super::Duration;

pub(crate) fn mul_i128_saturating(a: i128, b: i128) -> Duration {
    match a.checked_mul(b) {
        Some(v) => Duration::from_nanos_saturating(v),
        None => {
            let sign = a.signum() * b.signum();
            Duration::signed_infinite(sign as i8)
        }
    }
}

impl Neg for Duration {
    type Output = Duration;
    fn neg(self) -> Duration {
        if self.is_positive_infinite() {
            Duration::NEG_INFINITE
        } else if self.is_negative_infinite() {
            Duration::INFINITE
        } else {
            Duration::from_nanos_saturating(-self.raw_nanos())
        }
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        if self.is_positive_infinite() || rhs.is_positive_infinite() {
            return Duration::INFINITE;
        }
        if self.is_negative_infinite() || rhs.is_negative_infinite() {
            return Duration::NEG_INFINITE;
        }
        // Both operands are bounded well inside i128's range, so this can
        // never overflow the primitive add; only the result can need clamping
        // back down to a finite Duration (or promoting to +-INFINITE).
        Duration::from_nanos_saturating(self.raw_nanos() + rhs.raw_nanos())
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        self + (-rhs)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;
    fn mul(self, rhs: i64) -> Duration {
        if rhs == 0 {
            return Duration::ZERO;
        }
        if self.is_infinite() {
            let sign = self.signum() as i32 * rhs.signum() as i32;
            return Duration::signed_infinite(if sign < 0 { -1 } else { 1 });
        }
        mul_i128_saturating(self.raw_nanos(), rhs as i128)
    }
}

impl Mul<Duration> for i64 {
    type Output = Duration;
    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;
    fn mul(self, rhs: f64) -> Duration {
        if rhs.is_nan() {
            return Duration::ZERO;
        }
        if self.is_infinite() {
            if rhs == 0.0 {
                return Duration::ZERO;
            }
            let sign = self.signum() as f64 * rhs.signum();
            return Duration::signed_infinite(if sign < 0.0 { -1 } else { 1 });
        }
        if !rhs.is_finite() {
            if self.is_zero() {
                return Duration::ZERO;
            }
            let sign = self.signum() as f64 * rhs.signum();
            return Duration::signed_infinite(if sign < 0.0 { -1 } else { 1 });
        }
        let nanos_f = (self.raw_nanos() as f64) * rhs;
        Duration::from_f64_nanos_saturating(nanos_f)
    }
}

impl Mul<Duration> for f64 {
    type Output = Duration;
    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}

impl Div<i64> for Duration {
    type Output = Duration;
    fn div(self, rhs: i64) -> Duration {
        if rhs == 0 {
            return if self.raw_nanos() < 0 {
                Duration::NEG_INFINITE
            } else {
                Duration::INFINITE
            };
        }
        if self.is_infinite() {
            let sign = self.signum() as i32 * rhs.signum() as i32;
            return Duration::signed_infinite(if sign < 0 { -1 } else { 1 });
        }
        Duration::from_nanos_saturating(self.raw_nanos() / rhs as i128)
    }
}

impl Div<f64> for Duration {
    type Output = Duration;
    fn div(self, rhs: f64) -> Duration {
        if rhs == 0.0 || rhs.is_nan() {
            return if self.raw_nanos() < 0 {
                Duration::NEG_INFINITE
            } else {
                Duration::INFINITE
            };
        }
        if self.is_infinite() {
            let sign = self.signum() as f64 * rhs.signum();
            return Duration::signed_infinite(if sign < 0.0 { -1 } else { 1 });
        }
        Duration::from_f64_nanos_saturating((self.raw_nanos() as f64) / rhs)
    }
}

impl Rem for Duration {
    type Output = Duration;
    fn rem(self, rhs: Duration) -> Duration {
        if rhs.is_infinite() {
            return self;
        }
        if self.is_infinite() {
            return self;
        }
        self.idiv(rhs).1
    }
}

#[cfg(test)]
mod ut_ops {
    use super::*;
    use crate::timeunits::TimeUnits;

    #[test]
    fn mul_div_roundtrip() {
        let d = 7i64.seconds();
        assert_eq!(d * 3, 21i64.seconds());
        assert_eq!((d * 3) / 3, d);
    }

    #[test]
    fn mul_huge_float_saturates() {
        let d = 1i64.seconds();
        assert_eq!(d * f64::MAX, Duration::INFINITE);
        assert_eq!(d * f64::MIN, Duration::NEG_INFINITE);
    }

    #[test]
    fn div_by_zero_follows_dividend_sign() {
        assert_eq!(5i64.seconds() / 0, Duration::INFINITE);
        assert_eq!((-5i64).seconds() / 0, Duration::NEG_INFINITE);
        assert_eq!(Duration::ZERO / 0, Duration::INFINITE);
    }

    #[test]
    fn rem_with_infinite_operand() {
        let d = 5i64.seconds();
        assert_eq!(d % Duration::INFINITE, d);
        assert_eq!(Duration::INFINITE % d, Duration::INFINITE);
    }
}
