/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! Opaque timepoint types.
//!
//! Per the design notes this crate follows, timescales are kept distinct at
//! the type level by giving each one its own zero-sized marker and a shared
//! `Timepoint` trait, rather than parameterizing one generic `Instant<Scale>`
//! type the way the teacher crate's `Epoch` carries a runtime `TimeScale`
//! field. A runtime tag would let `TaiTime + GpsTime` type-check and fail (or
//! silently misbehave) at runtime; a marker type makes it a compile error.
//!
//! `TaiTime` and `GpsTime` are both plain wrappers around a [`Duration`]
//! offset from their own epoch. `UtcTime` is the third, non-monotonic member
//! of the family: it holds a smeared-UTC instant, expressed the same way,
//! anchored to the Unix epoch for compatibility with [`crate::julian`] and
//! [`crate::format`]. Unlike hifitime's `Epoch`, these types are never
//! directly arithmetically compatible with each other: converting between
//! them always goes through a [`crate::leap_table::LeapTable`].

use core::cmp::Ordering;
use core::ops::{Add, Sub};

use crate::duration::Duration;

/// Common behavior shared by every timepoint type in this crate.
pub trait Timepoint: Copy + Sized + PartialEq + PartialOrd {
    /// Offset of the timescale's zero instant, expressed in its own unit: always `Duration::ZERO`.
    const EPOCH: Self;
    /// The positive-infinite instant of this timescale.
    const INFINITE_FUTURE: Self;
    /// The negative-infinite instant of this timescale.
    const INFINITE_PAST: Self;

    /// Builds a timepoint from its offset since [`Timepoint::EPOCH`].
    fn from_offset(offset: Duration) -> Self;
    /// The offset of this instant since [`Timepoint::EPOCH`].
    fn offset(&self) -> Duration;

    fn is_infinite_future(&self) -> bool {
        self.offset().is_positive_infinite()
    }
    fn is_infinite_past(&self) -> bool {
        self.offset().is_negative_infinite()
    }
}

macro_rules! define_timepoint {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Eq, Hash)]
        pub struct $name {
            offset: Duration,
        }

        impl $name {
            pub const EPOCH: $name = $name {
                offset: Duration::ZERO,
            };
            pub const INFINITE_FUTURE: $name = $name {
                offset: Duration::INFINITE,
            };
            pub const INFINITE_PAST: $name = $name {
                offset: Duration::NEG_INFINITE,
            };

            pub const fn from_offset(offset: Duration) -> Self {
                $name { offset }
            }

            pub const fn offset(&self) -> Duration {
                self.offset
            }
        }

        impl Timepoint for $name {
            const EPOCH: Self = $name::EPOCH;
            const INFINITE_FUTURE: Self = $name::INFINITE_FUTURE;
            const INFINITE_PAST: Self = $name::INFINITE_PAST;

            fn from_offset(offset: Duration) -> Self {
                $name::from_offset(offset)
            }
            fn offset(&self) -> Duration {
                $name::offset(self)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.offset == other.offset
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                self.offset.partial_cmp(&other.offset)
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.offset.cmp(&other.offset)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.offset)
            }
        }

        /// Adding a `Duration` shifts the instant; adding a timepoint to a timepoint
        /// does not type-check, by design.
        impl Add<Duration> for $name {
            type Output = $name;
            fn add(self, rhs: Duration) -> $name {
                $name::from_offset(self.offset + rhs)
            }
        }

        impl Sub<Duration> for $name {
            type Output = $name;
            fn sub(self, rhs: Duration) -> $name {
                $name::from_offset(self.offset - rhs)
            }
        }

        /// The `Duration` elapsed between two instants of the same timescale.
        impl Sub<$name> for $name {
            type Output = Duration;
            fn sub(self, rhs: $name) -> Duration {
                self.offset - rhs.offset
            }
        }
    };
}

define_timepoint!(
    TaiTime,
    "An instant in International Atomic Time: SI seconds since 1958-01-01 00:00:00 TAI."
);
define_timepoint!(
    GpsTime,
    "An instant in GPS Time: SI seconds since 1980-01-06 00:00:00 GPST."
);
define_timepoint!(
    UtcTime,
    "A smeared-UTC instant: offset from the Unix epoch (1970-01-01 00:00:00), \
     with each leap second spread over the 24 hours around the month-end midnight \
     at which it would otherwise occur."
);

/// `TAI - GPST` for the same physical instant: GPST trails TAI by a fixed constant.
///
/// GPST epoch (1980-01-06 00:00:00 GPST) is `8040 * 86400 + 19` TAI seconds
/// after the TAI epoch (1958-01-01 00:00:00 TAI): 8040 days plus the 19
/// leap seconds accumulated between 1958 and 1980 (TAI ran 19 s ahead of UTC
/// by then, and GPST was defined to equal UTC, leap seconds included, at its
/// epoch).
pub const TAI_GPST_EPOCH_OFFSET_SECONDS: i64 = 8040 * 86_400 + 19;

pub fn gps_to_tai_offset() -> Duration {
    Duration::from_seconds(TAI_GPST_EPOCH_OFFSET_SECONDS)
}

impl TaiTime {
    pub fn to_gps(self) -> GpsTime {
        if self.is_infinite_future() {
            return GpsTime::INFINITE_FUTURE;
        }
        if self.is_infinite_past() {
            return GpsTime::INFINITE_PAST;
        }
        GpsTime::from_offset(self.offset() - gps_to_tai_offset())
    }
}

impl GpsTime {
    pub fn to_tai(self) -> TaiTime {
        if self.is_infinite_future() {
            return TaiTime::INFINITE_FUTURE;
        }
        if self.is_infinite_past() {
            return TaiTime::INFINITE_PAST;
        }
        TaiTime::from_offset(self.offset() + gps_to_tai_offset())
    }
}

/// A timescale that the leap table's smear engine can accept as input by
/// first converting it to TAI, the table's internal reference scale.
///
/// Implemented for [`TaiTime`] (identity) and [`GpsTime`] (via the fixed
/// constant offset), so [`crate::leap_table::LeapTable::smear`] can take
/// either without the table needing to know about GPST at all.
pub trait TaiConvertible: Timepoint {
    fn into_tai(self) -> TaiTime;
    fn from_tai(t: TaiTime) -> Self;
}

impl TaiConvertible for TaiTime {
    fn into_tai(self) -> TaiTime {
        self
    }
    fn from_tai(t: TaiTime) -> Self {
        t
    }
}

impl TaiConvertible for GpsTime {
    fn into_tai(self) -> TaiTime {
        self.to_tai()
    }
    fn from_tai(t: TaiTime) -> Self {
        t.to_gps()
    }
}

#[cfg(test)]
mod ut_timepoint {
    use super::*;
    use crate::timeunits::TimeUnits;

    #[test]
    fn tai_gps_roundtrip() {
        let t = TaiTime::from_offset(1_000_000i64.seconds());
        assert_eq!(t.to_gps().to_tai(), t);
    }

    #[test]
    fn tai_gps_constant_offset() {
        let a = TaiTime::from_offset(0i64.seconds());
        let b = TaiTime::from_offset(100i64.seconds());
        let da = a.to_gps();
        let db = b.to_gps();
        assert_eq!(db - da, 100i64.seconds());
    }

    #[test]
    fn infinities_propagate() {
        assert_eq!(TaiTime::INFINITE_FUTURE.to_gps(), GpsTime::INFINITE_FUTURE);
        assert_eq!(TaiTime::INFINITE_PAST.to_gps(), GpsTime::INFINITE_PAST);
    }

    #[test]
    fn ordering_matches_offset() {
        let a = TaiTime::from_offset(1i64.seconds());
        let b = TaiTime::from_offset(2i64.seconds());
        assert!(a < b);
    }
}
