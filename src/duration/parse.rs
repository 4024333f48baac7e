/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! `Display` and `FromStr` for [`Duration`], following the teacher crate's
//! `duration/parse.rs` token-scanning style but restricted to the six units
//! this domain actually formats with: `h`, `m`, `s`, `ms`, `us`, `ns`.

use core::fmt;
use core::str::FromStr;

use crate::errors::{DurationError, EmptyInputSnafu, InvalidNumberSnafu, TrailingInputSnafu, UnknownUnitSnafu};

use super::Duration;

const UNITS: &[(&str, i128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Writes `.{frac}` with trailing zeros trimmed from a `width`-digit fraction,
/// without requiring `alloc`.
fn write_frac(f: &mut fmt::Formatter<'_>, mut frac: i128, mut width: usize) -> fmt::Result {
    while width > 0 && frac % 10 == 0 {
        frac /= 10;
        width -= 1;
    }
    if width == 0 {
        Ok(())
    } else {
        write!(f, ".{frac:0width$}")
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive_infinite() {
            return write!(f, "inf");
        }
        if self.is_negative_infinite() {
            return write!(f, "-inf");
        }
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut nanos = self.raw_nanos();
        if nanos < 0 {
            write!(f, "-")?;
            nanos = -nanos;
        }

        const ONE_SECOND: i128 = UNITS[3].1;
        if nanos < ONE_SECOND {
            // Sub-second magnitudes print as a single ns/us/ms token, never
            // as a fractional-second string.
            let (unit_nanos, suffix, width) = if nanos < UNITS[1].1 {
                (UNITS[0].1, "ns", 0)
            } else if nanos < UNITS[2].1 {
                (UNITS[1].1, "us", 3)
            } else {
                (UNITS[2].1, "ms", 6)
            };
            let whole = nanos / unit_nanos;
            let frac = nanos % unit_nanos;
            write!(f, "{whole}")?;
            write_frac(f, frac, width)?;
            return write!(f, "{suffix}");
        }

        let hours = nanos / UNITS[5].1;
        nanos %= UNITS[5].1;
        let minutes = nanos / UNITS[4].1;
        nanos %= UNITS[4].1;
        let secs = nanos / ONE_SECOND;
        let sub_sec_nanos = nanos % ONE_SECOND;

        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{secs}")?;
        write_frac(f, sub_sec_nanos, 9)?;
        write!(f, "s")
    }
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // No whitespace is accepted anywhere in the grammar (per the format
        // this mirrors); any whitespace falls through to a digit/unit
        // mismatch below and fails the parse, same as any other stray
        // character would.
        if s.is_empty() {
            return EmptyInputSnafu.fail();
        }
        let (neg, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if rest == "inf" {
            return Ok(if neg {
                Duration::NEG_INFINITE
            } else {
                Duration::INFINITE
            });
        }
        if rest == "0" {
            return Ok(Duration::ZERO);
        }

        let mut total: i128 = 0;
        let mut remaining = rest;
        while !remaining.is_empty() {
            let digits_end = remaining
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(remaining.len());
            if digits_end == 0 {
                return TrailingInputSnafu.fail();
            }
            let (number_str, after_number) = remaining.split_at(digits_end);
            let value: f64 = lexical_core::parse(number_str.as_bytes()).map_err(|_| {
                InvalidNumberSnafu {
                    details: "could not parse decimal value",
                }
                .build()
            })?;

            let unit_end = after_number
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(after_number.len());
            let (unit_str, rest_after_unit) = after_number.split_at(unit_end);
            let unit_nanos = UNITS
                .iter()
                .find(|(name, _)| *name == unit_str)
                .map(|(_, nanos)| *nanos)
                .ok_or_else(|| {
                    UnknownUnitSnafu {
                        details: "recognized units are ns, us, ms, s, m, h",
                    }
                    .build()
                })?;

            total += (value * unit_nanos as f64).round() as i128;
            remaining = rest_after_unit;
        }

        let signed = if neg { -total } else { total };
        Ok(Duration::from_nanos_saturating(signed))
    }
}

#[cfg(test)]
mod ut_parse {
    use super::*;

    #[test]
    fn display_roundtrips_common_values() {
        for text in ["0", "1ns", "1h3m0.5s", "inf", "-inf"] {
            let d: Duration = text.parse().unwrap();
            assert_eq!(d.to_string(), text);
        }
    }

    #[test]
    fn parse_rejects_empty() {
        assert!("".parse::<Duration>().is_err());
    }

    #[test]
    fn parse_rejects_unknown_unit() {
        assert!("5fortnights".parse::<Duration>().is_err());
    }

    #[test]
    fn parse_rejects_whitespace() {
        assert!(" 5s".parse::<Duration>().is_err());
        assert!("5s ".parse::<Duration>().is_err());
        assert!("5 s".parse::<Duration>().is_err());
        assert!(" ".parse::<Duration>().is_err());
    }
}
