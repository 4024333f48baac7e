/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod errors;
pub use errors::{DurationError, LeapTableError, OutOfRange};

mod timeunits;
pub use timeunits::{TimeUnits, Unit};

mod duration;
pub use duration::Duration;

mod timepoint;
pub use timepoint::{GpsTime, TaiConvertible, TaiTime, Timepoint, UtcTime};

pub mod julian;

pub mod leap_table;
pub use leap_table::{LeapCatalog, LeapTable};

/// Wall-clock string formatting. Gated on `std`: producing an owned
/// `String` needs an allocator, unlike the rest of this crate.
#[cfg(feature = "std")]
pub mod format;
#[cfg(feature = "std")]
pub use format::{format_time, format_time_default, Formattable};

pub mod prelude {
    pub use crate::duration::Duration;
    pub use crate::errors::{DurationError, LeapTableError, OutOfRange};
    #[cfg(feature = "std")]
    pub use crate::format::{format_time, format_time_default, Formattable};
    pub use crate::leap_table::{LeapCatalog, LeapTable};
    pub use crate::timepoint::{GpsTime, TaiConvertible, TaiTime, Timepoint, UtcTime};
    pub use crate::timeunits::{TimeUnits, Unit};
}

#[cfg(test)]
mod ut_lib {
    use crate::prelude::*;

    fn assert_send_sync<T: Send + Sync>() {}

    /// Every public timepoint/duration/table type is a plain immutable
    /// value with no interior mutability, so all of them are `Send + Sync`
    /// with no `unsafe` required to get there.
    #[test]
    fn public_types_are_send_and_sync() {
        assert_send_sync::<Duration>();
        assert_send_sync::<TaiTime>();
        assert_send_sync::<GpsTime>();
        assert_send_sync::<UtcTime>();
        assert_send_sync::<LeapTable>();
        assert_send_sync::<LeapCatalog>();
    }
}
