/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! Wall-clock formatting for `TaiTime`/`GpsTime`, in the spirit of the
//! teacher crate's `efmt` module but trimmed to the handful of tokens this
//! domain needs (`%Y %m %d %H %M %S %f %Z %%`) and without a locale-aware
//! weekday/month-name table — formatting here is explicitly a diagnostic
//! convenience, not a general-purpose calendar formatter (see the ambient
//! stack notes on what stays out of scope).
//!
//! `FormatTime` performs a deliberate "abuse": a `TaiTime`/`GpsTime` offset
//! is fed straight into the same Julian-day broken-down-time computation
//! [`crate::julian`] uses for smeared UTC, as if it were a count of seconds
//! since the Unix epoch. The result isn't a physically meaningful calendar
//! date for TAI or GPST (neither timescale has leap seconds to smear, and
//! neither shares the Unix epoch), but it gives every timepoint type an
//! unambiguous, collision-free string as long as the `%Z`/timescale label is
//! kept attached.

use core::fmt::Write as _;

use crate::duration::Duration;
use crate::julian::{self, CivilDate};
use crate::timepoint::{GpsTime, TaiTime, Timepoint};
use crate::timeunits::TimeUnits;

/// A timepoint type `FormatTime` knows how to label.
pub trait Formattable: Timepoint {
    /// The `%Z` timescale label, e.g. `"TAI"`.
    const LABEL: &'static str;
    const INFINITE_FUTURE_STR: &'static str;
    const INFINITE_PAST_STR: &'static str;
}

impl Formattable for TaiTime {
    const LABEL: &'static str = "TAI";
    const INFINITE_FUTURE_STR: &'static str = "tai-infinite-future";
    const INFINITE_PAST_STR: &'static str = "tai-infinite-past";
}

impl Formattable for GpsTime {
    const LABEL: &'static str = "GPST";
    const INFINITE_FUTURE_STR: &'static str = "gpst-infinite-future";
    const INFINITE_PAST_STR: &'static str = "gpst-infinite-past";
}

/// The default format: `"YYYY-MM-DD HH:MM:SS[.fff...] <ZONE>"`.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S.%f %Z";

struct BrokenDown {
    date: CivilDate,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
}

/// Decomposes a Unix-epoch-relative offset into civil date and time of day,
/// via the same JDN machinery [`crate::julian`] uses for smeared UTC.
fn break_down(offset: Duration) -> BrokenDown {
    let jdn = julian::unix_offset_to_jdn(offset);
    let day_start = offset.floor(1i64.days());
    let time_of_day = offset - day_start;
    let (hour, rem) = time_of_day.idiv(1i64.hours());
    let (minute, rem) = rem.idiv(1i64.minutes());
    let (second, rem) = rem.idiv(1i64.seconds());
    let nanos = rem.total_nanoseconds().unwrap_or(0).clamp(0, 999_999_999) as u32;
    BrokenDown {
        date: julian::civil_from_jdn(jdn),
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        nanos,
    }
}

fn write_trimmed_frac(out: &mut String, mut nanos: u32) {
    let mut width = 9usize;
    while width > 0 && nanos % 10 == 0 {
        nanos /= 10;
        width -= 1;
    }
    if width > 0 {
        let _ = write!(out, ".{nanos:0width$}");
    }
}

/// `FormatTime(t)`: the fixed default rendering, or one of the four
/// infinity sentinel strings.
pub fn format_time_default<T: Formattable>(t: T) -> String {
    if t.is_infinite_future() {
        return T::INFINITE_FUTURE_STR.to_string();
    }
    if t.is_infinite_past() {
        return T::INFINITE_PAST_STR.to_string();
    }
    let bd = break_down(t.offset());
    let mut out = String::new();
    let _ = write!(
        out,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        bd.date.year, bd.date.month, bd.date.day, bd.hour, bd.minute, bd.second
    );
    write_trimmed_frac(&mut out, bd.nanos);
    let _ = write!(out, " {}", T::LABEL);
    out
}

/// `FormatTime(t, format)`: a user-supplied `strftime`-style format string.
/// `%Z` expands to the timescale label; `%%` is a literal `%` (so `%%Z`
/// renders as the literal text `%Z`, never expanding). Unrecognized tokens
/// pass through verbatim, `%` included.
pub fn format_time<T: Formattable>(t: T, format: &str) -> String {
    if t.is_infinite_future() {
        return T::INFINITE_FUTURE_STR.to_string();
    }
    if t.is_infinite_past() {
        return T::INFINITE_PAST_STR.to_string();
    }
    let bd = break_down(t.offset());
    let mut out = String::new();
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('Y') => {
                let _ = write!(out, "{:04}", bd.date.year);
            }
            Some('m') => {
                let _ = write!(out, "{:02}", bd.date.month);
            }
            Some('d') => {
                let _ = write!(out, "{:02}", bd.date.day);
            }
            Some('H') => {
                let _ = write!(out, "{:02}", bd.hour);
            }
            Some('M') => {
                let _ = write!(out, "{:02}", bd.minute);
            }
            Some('S') => {
                let _ = write!(out, "{:02}", bd.second);
            }
            Some('f') => {
                let _ = write!(out, "{:09}", bd.nanos);
            }
            Some('Z') => out.push_str(T::LABEL),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod ut_format {
    use super::*;

    #[test]
    fn infinities_use_fixed_strings() {
        assert_eq!(format_time_default(TaiTime::INFINITE_FUTURE), "tai-infinite-future");
        assert_eq!(format_time_default(TaiTime::INFINITE_PAST), "tai-infinite-past");
        assert_eq!(format_time_default(GpsTime::INFINITE_FUTURE), "gpst-infinite-future");
    }

    #[test]
    fn default_format_matches_known_instant() {
        // TAI offset corresponding to the Unix-epoch abuse: day 1 at noon.
        let t = TaiTime::from_offset(1i64.days() + 12i64.hours());
        assert_eq!(format_time_default(t), "1970-01-02 12:00:00 TAI");
    }

    #[test]
    fn percent_percent_z_is_preserved_literally() {
        let t = TaiTime::from_offset(0i64.seconds());
        assert_eq!(format_time(t, "%%Z"), "%Z");
        assert_eq!(format_time(t, "%Z"), "TAI");
    }

    #[test]
    fn custom_format_string() {
        let t = TaiTime::from_offset(0i64.seconds());
        assert_eq!(format_time(t, "%Y/%m/%d"), "1970/01/01");
    }

    #[test]
    fn fractional_seconds_are_trimmed() {
        let t = TaiTime::from_offset(500_000_000i64.nanoseconds());
        assert_eq!(format_time_default(t), "1970-01-01 00:00:00.5 TAI");
    }
}
