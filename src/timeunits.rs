/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! Unit tags for building [`crate::duration::Duration`] values, e.g. `5.seconds()`.
//!
//! Mirrors the `Unit` / `TimeUnits` pair from this crate's nearest relative
//! (hifitime's `timeunits.rs`), trimmed to the units this domain actually
//! needs: `Duration` here has no notion of a "century" bucket, since it is a
//! flat nanosecond count rather than a (centuries, nanoseconds) pair.

use core::ops::Mul;

use crate::duration::Duration;

/// A unit of time, usable as `n * Unit::Second` or via the [`TimeUnits`] extension trait.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl Unit {
    /// The length of one of this unit, in nanoseconds.
    pub const fn nanoseconds(self) -> i128 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => 1_000,
            Unit::Millisecond => 1_000_000,
            Unit::Second => 1_000_000_000,
            Unit::Minute => 60 * 1_000_000_000,
            Unit::Hour => 3_600 * 1_000_000_000,
            Unit::Day => 86_400 * 1_000_000_000,
        }
    }
}

impl Mul<Unit> for i64 {
    type Output = Duration;
    fn mul(self, unit: Unit) -> Duration {
        Duration::from_i64_units(self, unit)
    }
}

impl Mul<i64> for Unit {
    type Output = Duration;
    fn mul(self, count: i64) -> Duration {
        Duration::from_i64_units(count, self)
    }
}

impl Mul<Unit> for f64 {
    type Output = Duration;
    fn mul(self, unit: Unit) -> Duration {
        Duration::from_f64_units(self, unit)
    }
}

impl Mul<f64> for Unit {
    type Output = Duration;
    fn mul(self, count: f64) -> Duration {
        Duration::from_f64_units(count, self)
    }
}

/// Extension trait so `5.seconds()` / `1.5.hours()` read naturally, as in the teacher crate.
pub trait TimeUnits: Copy {
    fn nanoseconds(self) -> Duration;
    fn microseconds(self) -> Duration;
    fn milliseconds(self) -> Duration;
    fn seconds(self) -> Duration;
    fn minutes(self) -> Duration;
    fn hours(self) -> Duration;
    fn days(self) -> Duration;
}

macro_rules! impl_time_units {
    ($t:ty, $ctor:ident) => {
        impl TimeUnits for $t {
            fn nanoseconds(self) -> Duration {
                Duration::$ctor(self, Unit::Nanosecond)
            }
            fn microseconds(self) -> Duration {
                Duration::$ctor(self, Unit::Microsecond)
            }
            fn milliseconds(self) -> Duration {
                Duration::$ctor(self, Unit::Millisecond)
            }
            fn seconds(self) -> Duration {
                Duration::$ctor(self, Unit::Second)
            }
            fn minutes(self) -> Duration {
                Duration::$ctor(self, Unit::Minute)
            }
            fn hours(self) -> Duration {
                Duration::$ctor(self, Unit::Hour)
            }
            fn days(self) -> Duration {
                Duration::$ctor(self, Unit::Day)
            }
        }
    };
}

impl_time_units!(i64, from_i64_units);
impl_time_units!(f64, from_f64_units);
