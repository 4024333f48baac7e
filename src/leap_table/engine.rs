/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! The smear/unsmear conversion engine: exact queries against the in-table
//! segment list, and the future-proof widening algorithm for instants past
//! the table's expiration.
//!
//! All interpolation goes through exact `i128` rational arithmetic
//! ([`crate::duration::Duration::scaled`]) rather than floating point. A
//! smeared segment maps 86400 s of UTC onto `86400 ± 1` s of TAI, which is a
//! non-power-of-two ratio that floats cannot represent exactly; keeping the
//! math rational is what gives the sampled round-trip property in the
//! testable-properties list its best chance of actually holding.

use crate::duration::Duration;
use crate::errors::OutOfRange;
use crate::julian::{self, CivilDate};
use crate::timepoint::{GpsTime, TaiConvertible, TaiTime, Timepoint, UtcTime};

use super::{Entry, LeapTable};

/// `Unsmear`: maps the segment's upper entry and a query instant within that
/// segment to the corresponding TAI instant.
///
/// Used both for in-table segments (`e` is a real table entry) and for the
/// synthetic boundary entries the future-proof widening algorithm builds.
pub(crate) fn unsmear_in_segment(e: &Entry, utc: UtcTime) -> TaiTime {
    let delta_utc = e.utc - utc;
    if e.smear == 0 {
        e.tai - delta_utc
    } else {
        let correction = delta_utc.scaled(86_400 + e.smear as i64, 86_400);
        e.tai - correction
    }
}

/// `Smear`: the inverse of [`unsmear_in_segment`], mapping a TAI instant
/// within the segment back to UTC.
pub(crate) fn smear_in_segment(e: &Entry, tai: TaiTime) -> UtcTime {
    let delta_tai = e.tai - tai;
    if e.smear == 0 {
        e.utc - delta_tai
    } else {
        let correction = delta_tai.scaled(86_400, 86_400 + e.smear as i64);
        e.utc - correction
    }
}

/// Largest `i` such that `entries[i].utc >= utc`, or `None` if `utc` is
/// earlier than every entry (before the modern epoch) or later than every
/// entry (past expiration).
fn locate_by_utc(entries: &[Entry], utc: UtcTime) -> Option<usize> {
    let mut found = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.utc >= utc {
            found = Some(i);
        } else {
            break;
        }
    }
    found
}

/// Largest `i` such that `entries[i].tai >= tai`, or `None` on either side
/// of the table's TAI range. Entries are also monotonically descending in
/// `tai`, since a smear segment only ever perturbs the rate by one part in
/// 86400.
fn locate_by_tai(entries: &[Entry], tai: TaiTime) -> Option<usize> {
    let mut found = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.tai >= tai {
            found = Some(i);
        } else {
            break;
        }
    }
    found
}

/// One point on the hypothetical continuation of the table past expiration:
/// the calendar boundary nearest the query instant, how many month-ends
/// separate it from expiration, and whether it actually falls inside a
/// hypothetical 24h smear window.
struct HypotheticalBoundary {
    utc: UtcTime,
    delta_months: i64,
    in_window: bool,
}

fn month_index(year: i32, month: u8) -> i64 {
    year as i64 * 12 + month as i64
}

/// Inverse of [`month_index`]: the `(year, month)` `idx` months after
/// `month_index(0, 0)`.
fn month_at_index(idx: i64) -> (i32, u8) {
    let zero_based = idx - 1;
    let year = zero_based.div_euclid(12) as i32;
    let month = (zero_based.rem_euclid(12) + 1) as u8;
    (year, month)
}

/// The `k`-th hypothetical smear window after `expiration`: the 24 h
/// starting at noon on the first of the month `k` months after
/// `expiration`'s own month (`k == 0` is the 24 h immediately following
/// `expiration` itself, since `expiration` is always a first-of-month noon).
fn hypothetical_window(exp_year: i32, exp_month: u8, k: i64) -> (UtcTime, UtcTime) {
    let (year, month) = month_at_index(month_index(exp_year, exp_month) + k);
    let start_jdn = julian::jdn_from_civil(CivilDate { year, month, day: 1 });
    (
        UtcTime::from_offset(julian::jdn_to_unix_offset(start_jdn)),
        UtcTime::from_offset(julian::jdn_to_unix_offset(start_jdn + 1)),
    )
}

/// Locates the single calendar boundary that brackets `t`, counting
/// hypothetical smear windows since `expiration_utc` along the way.
///
/// The table's expiration is itself always a first-of-month noon, so the
/// first candidate window for "the next possible leap" is the 24 h
/// immediately following expiration; each subsequent candidate window is
/// one calendar month further on from there. This mirrors the construction
/// rule for real entries (a nonzero-smear entry is always a first-of-month
/// noon 24 h above the entry below it) applied hypothetically past the
/// point where the table stops making claims.
///
/// `t` must already be in the UTC domain (callers converting from TAI first
/// normalize using the table's constant post-expiration offset).
fn compute_hypothetical_boundary(expiration_utc: UtcTime, t: UtcTime) -> HypotheticalBoundary {
    let exp_date = julian::civil_from_jdn(julian::unix_offset_to_jdn(expiration_utc.offset()));

    let mut k = 0i64;
    loop {
        let (_, window_end) = hypothetical_window(exp_date.year, exp_date.month, k);
        if t < window_end {
            return HypotheticalBoundary {
                utc: window_end,
                delta_months: k + 1,
                in_window: true,
            };
        }
        let (next_window_start, _) = hypothetical_window(exp_date.year, exp_date.month, k + 1);
        if t < next_window_start {
            let day_after_jdn = julian::unix_offset_to_jdn(t.offset()) + 1;
            return HypotheticalBoundary {
                utc: UtcTime::from_offset(julian::jdn_to_unix_offset(day_after_jdn)),
                delta_months: k + 1,
                in_window: false,
            };
        }
        k += 1;
    }
}

/// Builds the two hypothetical (all-negative-leaps, all-positive-leaps)
/// boundary entries that bracket the true answer for an out-of-table query.
fn build_hypothetical_entries(expiration: &Entry, boundary: &HypotheticalBoundary) -> (Entry, Entry) {
    let base_tai = expiration.tai + (boundary.utc - expiration.utc);
    let months_adj = Duration::from_seconds(boundary.delta_months);
    let neg_smear = if boundary.in_window { -1 } else { 0 };
    let pos_smear = if boundary.in_window { 1 } else { 0 };
    (
        Entry {
            utc: boundary.utc,
            tai: base_tai - months_adj,
            smear: neg_smear,
        },
        Entry {
            utc: boundary.utc,
            tai: base_tai + months_adj,
            smear: pos_smear,
        },
    )
}

impl LeapTable {
    /// `TaiTime` for the fixed GPST epoch (1980-01-06 00:00:00 GPST), used
    /// to bound [`LeapTable::unsmear_to_gps`].
    fn gps_epoch_tai() -> TaiTime {
        TaiTime::from_offset(crate::timepoint::gps_to_tai_offset())
    }

    /// Converts a smeared-UTC instant to TAI.
    ///
    /// Returns `None` if `utc` is earlier than the modern UTC epoch
    /// (1972-01-01) or later than the table's expiration; use
    /// [`LeapTable::future_proof_unsmear`] for the latter.
    pub fn unsmear(&self, utc: UtcTime) -> Option<TaiTime> {
        if utc.is_infinite_future() {
            return Some(TaiTime::INFINITE_FUTURE);
        }
        if utc.is_infinite_past() {
            return Some(TaiTime::INFINITE_PAST);
        }
        let idx = locate_by_utc(self.entries(), utc)?;
        Some(unsmear_in_segment(&self.entries()[idx], utc))
    }

    /// As [`LeapTable::unsmear`], but for callers that want a `Display`able
    /// cause instead of a bare `None` (diagnostics, logging).
    pub fn checked_unsmear(&self, utc: UtcTime) -> Result<TaiTime, OutOfRange> {
        self.unsmear(utc).ok_or(OutOfRange)
    }

    /// As [`LeapTable::unsmear`], then converts to GPST. Additionally
    /// returns `None` if the result would be earlier than the GPST epoch.
    pub fn unsmear_to_gps(&self, utc: UtcTime) -> Option<GpsTime> {
        let tai = self.unsmear(utc)?;
        if !tai.is_infinite_past() && tai < Self::gps_epoch_tai() {
            return None;
        }
        Some(tai.to_gps())
    }

    /// As [`LeapTable::unsmear_to_gps`], but for callers that want a
    /// `Display`able cause instead of a bare `None` (diagnostics, logging).
    pub fn checked_unsmear_to_gps(&self, utc: UtcTime) -> Result<GpsTime, OutOfRange> {
        self.unsmear_to_gps(utc).ok_or(OutOfRange)
    }

    /// Converts a TAI or GPST instant to smeared UTC.
    ///
    /// Returns `None` if the instant is earlier than the modern UTC epoch
    /// or later than the table's expiration; use
    /// [`LeapTable::future_proof_smear`] for the latter.
    pub fn smear<T: TaiConvertible>(&self, t: T) -> Option<UtcTime> {
        let tai = t.into_tai();
        if tai.is_infinite_future() {
            return Some(UtcTime::INFINITE_FUTURE);
        }
        if tai.is_infinite_past() {
            return Some(UtcTime::INFINITE_PAST);
        }
        let idx = locate_by_tai(self.entries(), tai)?;
        Some(smear_in_segment(&self.entries()[idx], tai))
    }

    /// As [`LeapTable::smear`], but for callers that want a `Display`able
    /// cause instead of a bare `None` (diagnostics, logging).
    pub fn checked_smear<T: TaiConvertible>(&self, t: T) -> Result<UtcTime, OutOfRange> {
        self.smear(t).ok_or(OutOfRange)
    }

    /// Widened `Unsmear`: never fails on a finite input. Within the exact
    /// range this degenerates to `(x, x)`; before the modern epoch it
    /// returns the universal interval; after expiration it returns the
    /// bracket produced by assuming every elapsed month-end was either an
    /// all-negative or all-positive leap.
    pub fn future_proof_unsmear(&self, t: UtcTime) -> (TaiTime, TaiTime) {
        if t.is_infinite_future() {
            return (TaiTime::INFINITE_FUTURE, TaiTime::INFINITE_FUTURE);
        }
        if t.is_infinite_past() {
            return (TaiTime::INFINITE_PAST, TaiTime::INFINITE_PAST);
        }
        if let Some(tai) = self.unsmear(t) {
            return (tai, tai);
        }
        if t < self.modern_epoch().utc {
            return (TaiTime::INFINITE_PAST, TaiTime::INFINITE_FUTURE);
        }
        let expiration = self.expiration();
        let boundary = compute_hypothetical_boundary(expiration.utc, t);
        let (neg, pos) = build_hypothetical_entries(expiration, &boundary);
        let lo = unsmear_in_segment(&neg, t);
        let hi = unsmear_in_segment(&pos, t);
        if lo <= hi {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }

    /// As [`LeapTable::future_proof_unsmear`], converted to GPST. Collapses
    /// to the universal GPST interval if the lower bound would precede the
    /// GPST epoch.
    pub fn future_proof_unsmear_to_gps(&self, t: UtcTime) -> (GpsTime, GpsTime) {
        if t.is_infinite_future() {
            return (GpsTime::INFINITE_FUTURE, GpsTime::INFINITE_FUTURE);
        }
        if t.is_infinite_past() {
            return (GpsTime::INFINITE_PAST, GpsTime::INFINITE_PAST);
        }
        let (lo, hi) = self.future_proof_unsmear(t);
        if lo.is_infinite_past() && hi.is_infinite_future() {
            return (GpsTime::INFINITE_PAST, GpsTime::INFINITE_FUTURE);
        }
        if lo < Self::gps_epoch_tai() {
            return (GpsTime::INFINITE_PAST, GpsTime::INFINITE_FUTURE);
        }
        (lo.to_gps(), hi.to_gps())
    }

    /// Widened `Smear`: never fails on a finite input, mirroring
    /// [`LeapTable::future_proof_unsmear`].
    ///
    /// The input is first normalized to the hypothetical-UTC domain using
    /// the table's constant post-expiration offset, purely so the
    /// month-boundary walk (an inherently calendar-based computation) has
    /// something to walk; the actual interpolation at the end always uses
    /// the caller's real TAI/GPST value.
    pub fn future_proof_smear<T: TaiConvertible>(&self, t: T) -> (UtcTime, UtcTime) {
        let tai = t.into_tai();
        if tai.is_infinite_future() {
            return (UtcTime::INFINITE_FUTURE, UtcTime::INFINITE_FUTURE);
        }
        if tai.is_infinite_past() {
            return (UtcTime::INFINITE_PAST, UtcTime::INFINITE_PAST);
        }
        if let Some(utc) = self.smear(t) {
            return (utc, utc);
        }
        if tai < self.modern_epoch().tai {
            return (UtcTime::INFINITE_PAST, UtcTime::INFINITE_FUTURE);
        }
        let expiration = self.expiration();
        let hypothetical_utc = expiration.utc - (expiration.tai - tai);
        let boundary = compute_hypothetical_boundary(expiration.utc, hypothetical_utc);
        let (neg, pos) = build_hypothetical_entries(expiration, &boundary);
        let lo = smear_in_segment(&neg, tai);
        let hi = smear_in_segment(&pos, tai);
        if lo <= hi {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }
}

#[cfg(test)]
mod ut_engine {
    use super::*;
    use crate::leap_table::LeapCatalog;
    use crate::timeunits::TimeUnits;

    fn sample_table() -> LeapTable {
        // A positive leap at the end of June 1972 (the historical first
        // IERS leap second), expiring end of 1972.
        let catalog = LeapCatalog {
            positive_leaps: vec![julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 6,
                day: 30,
            })],
            negative_leaps: vec![],
            end_jdn: julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 12,
                day: 31,
            }),
        };
        LeapTable::from_catalog(&catalog).unwrap()
    }

    #[test]
    fn modern_epoch_offset_is_ten_seconds() {
        let table = sample_table();
        let epoch = table.modern_epoch();
        assert_eq!(epoch.tai - TaiTime::from_offset(epoch.utc.offset()), 10i64.seconds());
    }

    #[test]
    fn unsmear_smear_roundtrip_outside_smear_window() {
        let table = sample_table();
        let utc = UtcTime::from_offset(
            julian::jdn_to_unix_offset(julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 3,
                day: 15,
            })) + 1i64.hours(),
        );
        let tai = table.unsmear(utc).unwrap();
        assert_eq!(table.smear(tai).unwrap(), utc);
    }

    #[test]
    fn unsmear_smear_roundtrip_inside_smear_window() {
        let table = sample_table();
        let onset = julian::jdn_to_unix_offset(julian::jdn_from_civil(CivilDate {
            year: 1972,
            month: 6,
            day: 30,
        }));
        for step in [0i64, 10, 43_200, 86_390] {
            let utc = UtcTime::from_offset(onset + step.seconds());
            let tai = table.unsmear(utc).unwrap();
            let back = table.smear(tai).unwrap();
            assert_eq!(back, utc, "roundtrip failed at step {step}");
        }
    }

    #[test]
    fn smear_window_adds_exactly_one_second_across_the_leap() {
        let table = sample_table();
        let onset = julian::jdn_to_unix_offset(julian::jdn_from_civil(CivilDate {
            year: 1972,
            month: 6,
            day: 30,
        }));
        let before = UtcTime::from_offset(onset);
        let after = UtcTime::from_offset(onset + 24i64.hours());
        let dt_tai = table.unsmear(after).unwrap() - table.unsmear(before).unwrap();
        assert_eq!(dt_tai, 86_401i64.seconds());
    }

    #[test]
    fn before_modern_epoch_is_out_of_range() {
        let table = sample_table();
        let too_early = UtcTime::from_offset(0i64.seconds());
        assert_eq!(table.unsmear(too_early), None);
        assert_eq!(table.checked_unsmear(too_early), Err(OutOfRange));
        assert_eq!(table.future_proof_unsmear(too_early), (TaiTime::INFINITE_PAST, TaiTime::INFINITE_FUTURE));
    }

    #[test]
    fn checked_variants_agree_with_their_option_counterparts() {
        let table = sample_table();
        let in_range = table.modern_epoch().utc + 1i64.hours();
        assert_eq!(table.checked_unsmear(in_range), Ok(table.unsmear(in_range).unwrap()));
        let out_of_range = table.expiration().utc + 1i64.hours();
        assert_eq!(table.unsmear(out_of_range), None);
        assert_eq!(table.checked_unsmear(out_of_range), Err(OutOfRange));
    }

    #[test]
    fn future_proof_unsmear_matches_exact_within_table() {
        let table = sample_table();
        let utc = table.modern_epoch().utc + 1i64.hours();
        let (lo, hi) = table.future_proof_unsmear(utc);
        assert_eq!(lo, hi);
        assert_eq!(Some(lo), table.unsmear(utc));
    }

    #[test]
    fn future_proof_unsmear_widens_past_expiration() {
        let table = sample_table();
        let past_expiration = table.expiration().utc + 40i64.days();
        let (lo, hi) = table.future_proof_unsmear(past_expiration);
        assert!(lo < hi);
        assert_eq!(table.unsmear(past_expiration), None);
    }

    #[test]
    fn future_proof_smear_is_consistent_with_unsmear_direction() {
        let table = sample_table();
        let past_expiration_utc = table.expiration().utc + 100i64.days();
        let (tai_lo, tai_hi) = table.future_proof_unsmear(past_expiration_utc);
        let (utc_lo, _utc_hi) = table.future_proof_smear(tai_lo);
        // unsmear(utc) picked tai_lo as one endpoint of its bracket; smearing
        // that same tai_lo back should reproduce a utc within a day of the
        // original query (loose bound: the two directions walk the calendar
        // independently once outside the table).
        let diff = (utc_lo - past_expiration_utc).abs();
        assert!(diff < 2i64.days(), "diff was {diff}");
    }

    #[test]
    fn to_catalog_roundtrips_through_from_catalog() {
        let table = sample_table();
        let catalog = table.to_catalog();
        let rebuilt = LeapTable::from_catalog(&catalog).unwrap();
        assert_eq!(table, rebuilt);
    }

    #[test]
    fn rejects_duplicate_jdn_across_lists() {
        let jdn = julian::jdn_from_civil(CivilDate {
            year: 1972,
            month: 6,
            day: 30,
        });
        let catalog = LeapCatalog {
            positive_leaps: vec![jdn],
            negative_leaps: vec![jdn],
            end_jdn: julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 12,
                day: 31,
            }),
        };
        assert!(LeapTable::from_catalog(&catalog).is_err());
    }

    #[test]
    fn rejects_leap_jdn_not_month_end() {
        let jdn = julian::jdn_from_civil(CivilDate {
            year: 1972,
            month: 6,
            day: 29,
        });
        let catalog = LeapCatalog {
            positive_leaps: vec![jdn],
            negative_leaps: vec![],
            end_jdn: julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 12,
                day: 31,
            }),
        };
        assert!(LeapTable::from_catalog(&catalog).is_err());
    }

    #[test]
    fn rejects_end_jdn_not_month_boundary() {
        let catalog = LeapCatalog {
            positive_leaps: vec![],
            negative_leaps: vec![],
            end_jdn: julian::jdn_from_civil(CivilDate {
                year: 1972,
                month: 12,
                day: 30,
            }),
        };
        assert!(LeapTable::from_catalog(&catalog).is_err());
    }
}
