/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! Error types for every fallible operation in this crate.
//!
//! Following the precedent set by this workspace's nearest relative
//! (hifitime), every error is a `snafu`-derived enum with a human-readable
//! `Display` impl, never a panic or a bare `&str`.

use core::fmt;
use snafu::Snafu;

/// Errors raised while parsing a [`crate::duration::Duration`] from text.
#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum DurationError {
    /// The input was empty or contained only whitespace.
    #[snafu(display("cannot parse a Duration from an empty string"))]
    EmptyInput,
    /// A numeric component could not be parsed as a decimal value.
    #[snafu(display("invalid numeric component in duration string: {details}"))]
    InvalidNumber { details: &'static str },
    /// A token was missing its unit suffix, or the suffix was not recognized.
    #[snafu(display("unknown or missing unit in duration string: {details}"))]
    UnknownUnit { details: &'static str },
    /// Trailing characters remained after the last recognized token.
    #[snafu(display("unexpected trailing characters in duration string"))]
    TrailingInput,
}

/// Why a [`crate::leap_table::LeapCatalog`] failed to turn into a [`crate::leap_table::LeapTable`].
#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum LeapTableError {
    /// `end_jdn` fell outside the sane [1972-01-31, 9999-12-31] noon range.
    #[snafu(display("end_jdn {end_jdn} is outside the supported range"))]
    EndJdnOutOfRange { end_jdn: i32 },
    /// The day after `end_jdn` is not the first of a month.
    #[snafu(display("the day after end_jdn {end_jdn} is not the first of a month"))]
    EndJdnNotMonthBoundary { end_jdn: i32 },
    /// A leap JDN fell outside the table's overall JDN range.
    #[snafu(display("leap jdn {jdn} is outside the supported range"))]
    LeapJdnOutOfRange { jdn: i32 },
    /// A leap JDN is later than, or equal to, `end_jdn`. Equality is also
    /// rejected: the settled boundary of a leap at `end_jdn` would fall
    /// exactly on the forced expiration anchor, which always carries
    /// `smear == 0` and so cannot represent it.
    #[snafu(display("leap jdn {jdn} is later than or equal to end_jdn {end_jdn}"))]
    LeapJdnAfterEnd { jdn: i32, end_jdn: i32 },
    /// The same JDN appears twice in one list, or in both lists.
    #[snafu(display("leap jdn {jdn} is duplicated or appears in both leap lists"))]
    DuplicateLeapJdn { jdn: i32 },
    /// A leap JDN's calendar day is not the last day of its month.
    #[snafu(display("leap jdn {jdn} is not the last day of its month"))]
    LeapJdnNotMonthEnd { jdn: i32 },
    /// Internal consistency check failed after construction (defensive; should be unreachable).
    #[snafu(display("internal leap table invariant violated: {details}"))]
    InvariantViolated { details: &'static str },
}

/// Why a [`crate::leap_table::LeapTable`] query could not produce an exact result.
///
/// The exact query methods themselves (e.g.
/// [`crate::leap_table::LeapTable::unsmear`]) stay `Option`-returning on
/// out-of-range input; this type is the error half of the `checked_*`
/// siblings (`checked_unsmear`, `checked_unsmear_to_gps`, `checked_smear`)
/// offered alongside them for callers that want a [`fmt::Display`]able cause
/// to log rather than a bare `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange;

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested instant is outside the leap table's exactly-convertible range"
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}
