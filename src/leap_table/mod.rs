/*
 * leapsmear
 * Bit-exact smeared-UTC / TAI / GPST conversion core.
 */

//! The validated leap-second table and the smear/unsmear conversion engine
//! built on top of it.
//!
//! This is the part of the crate with the most surface area, playing the
//! role the teacher crate splits across `leap_seconds.rs` (a flat table of
//! historical leap seconds, `LeapSecond { timestamp_tai_s, delta_at,
//! announced_by_iers }`) and `leap_seconds_file.rs` (loading/validating an
//! IERS leap-seconds file into that table). Here the table isn't a flat list
//! of step changes, it's a segment list whose entries also describe the
//! 24-hour smoothing windows around each month-end, so construction carries
//! its own validation pass rather than just parsing a trusted file.

mod engine;

use crate::errors::{
    DuplicateLeapJdnSnafu, EndJdnNotMonthBoundarySnafu, EndJdnOutOfRangeSnafu, InvariantViolatedSnafu,
    LeapJdnAfterEndSnafu, LeapJdnNotMonthEndSnafu, LeapJdnOutOfRangeSnafu, LeapTableError,
};
use crate::julian::{self, CivilDate};
use crate::timepoint::{TaiTime, Timepoint, UtcTime};
use crate::timeunits::TimeUnits;

/// `JDN(1972-01-31 noon)`: the earliest `end_jdn` a table may declare, one
/// day before the first month boundary the smear engine ever has to reason
/// about (the modern UTC epoch, 1972-01-01).
fn min_supported_jdn() -> i32 {
    julian::jdn_from_civil(CivilDate {
        year: 1972,
        month: 1,
        day: 31,
    })
}

/// `JDN(9999-12-31 noon)`: the latest JDN this crate's calendar and
/// timescale machinery promises to handle without surprises.
fn max_supported_jdn() -> i32 {
    julian::jdn_from_civil(CivilDate {
        year: 9999,
        month: 12,
        day: 31,
    })
}

/// `1972-01-01 00:00:00`, the instant at which the modern (IERS) leap-second
/// era begins and `TAI - UTC` was exactly 10 s.
fn modern_epoch_utc() -> UtcTime {
    let noon_jdn = julian::jdn_from_civil(CivilDate {
        year: 1972,
        month: 1,
        day: 1,
    });
    UtcTime::from_offset(julian::jdn_to_unix_offset(noon_jdn) - 12i64.hours())
}

/// An unvalidated description of a leap table: the set of calendar days on
/// which a positive or negative leap second falls, plus the JDN past which
/// the table makes no further claims.
///
/// This is the wire-level shape (see the external catalog schema in the
/// design notes); [`LeapTable::from_catalog`] is the only way to turn it
/// into something the smear engine will trust.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapCatalog {
    /// JDNs of days after which UTC gained a second.
    pub positive_leaps: Vec<i32>,
    /// JDNs of days after which UTC lost a second.
    pub negative_leaps: Vec<i32>,
    /// JDN of the last day this catalog makes any claim about.
    pub end_jdn: i32,
}

/// One boundary instant in the segment list: a `(utc, tai)` pair that are
/// known to refer to the same physical instant, plus the smear direction of
/// the segment immediately *below* it (i.e. spanning `[previous.utc,
/// self.utc]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
    pub utc: UtcTime,
    pub tai: TaiTime,
    /// -1, 0, or +1. Nonzero only when `utc` is a first-of-month noon and the
    /// entry immediately below is exactly 24 h earlier.
    pub smear: i8,
}

/// A validated, immutable leap-second table.
///
/// Entries are stored newest-first (`entries[0]` is the expiration
/// boundary, `entries.last()` is the modern UTC epoch), which is also the
/// order the construction and query algorithms want to walk them in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeapTable {
    entries: Vec<Entry>,
}

impl LeapTable {
    /// Validates `catalog` against every rule in the construction contract
    /// and, if it passes, builds the segment list.
    pub fn from_catalog(catalog: &LeapCatalog) -> Result<LeapTable, LeapTableError> {
        validate_catalog(catalog)?;

        let expiration_jdn = catalog.end_jdn + 1;
        let expiration_utc = UtcTime::from_offset(julian::jdn_to_unix_offset(expiration_jdn));
        let epoch_utc = modern_epoch_utc();

        let mut raw: Vec<(UtcTime, i8, bool)> = Vec::new();
        raw.push((expiration_utc, 0, true)); // forced: E0
        raw.push((epoch_utc, 0, true)); // forced: E_{n-1}

        for &jdn in &catalog.positive_leaps {
            push_leap_pair(&mut raw, jdn, 1);
        }
        for &jdn in &catalog.negative_leaps {
            push_leap_pair(&mut raw, jdn, -1);
        }

        // Dedupe by instant. `validate_catalog` already rejects any leap
        // JDN at or after `end_jdn`, so the only remaining collision is
        // between the two forced anchors themselves (when the catalog has
        // no history at all, `expiration_utc` can coincide with
        // `epoch_utc`); the anchor always wins and keeps smear == 0.
        raw.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        let mut entries: Vec<Entry> = Vec::with_capacity(raw.len());
        for (utc, smear, forced) in raw {
            if let Some(last) = entries.last_mut() {
                if last.utc == utc {
                    if forced {
                        last.smear = 0;
                    }
                    continue;
                }
            }
            entries.push(Entry {
                utc,
                tai: TaiTime::EPOCH,
                smear,
            });
        }

        let n = entries.len();
        entries[n - 1].tai = TaiTime::from_offset(epoch_utc.offset() + 10i64.seconds());
        for i in (0..n - 1).rev() {
            let dt_utc = entries[i].utc - entries[i + 1].utc;
            let smear_adj = (entries[i].smear as i64).seconds();
            entries[i].tai = entries[i + 1].tai + dt_utc + smear_adj;
        }

        let table = LeapTable { entries };
        table.check_invariants()?;
        Ok(table)
    }

    fn check_invariants(&self) -> Result<(), LeapTableError> {
        let n = self.entries.len();
        if self.entries[0].smear != 0 {
            return InvariantViolatedSnafu {
                details: "expiration entry must carry smear == 0",
            }
            .fail();
        }
        if self.entries[n - 1].smear != 0 {
            return InvariantViolatedSnafu {
                details: "modern-epoch entry must carry smear == 0",
            }
            .fail();
        }
        for i in 0..n {
            if i + 1 < n && self.entries[i].utc <= self.entries[i + 1].utc {
                return InvariantViolatedSnafu {
                    details: "entries are not strictly descending by utc",
                }
                .fail();
            }
            if self.entries[i].smear != 0 {
                let date = julian::civil_from_jdn(julian::unix_offset_to_jdn(self.entries[i].utc.offset()));
                if !julian::is_first_day_of_month(date) {
                    return InvariantViolatedSnafu {
                        details: "nonzero-smear entry is not a first-of-month noon",
                    }
                    .fail();
                }
                if i + 1 >= n {
                    return InvariantViolatedSnafu {
                        details: "nonzero-smear entry has nothing below it",
                    }
                    .fail();
                }
                let gap = self.entries[i].utc - self.entries[i + 1].utc;
                if gap != 24i64.hours() {
                    return InvariantViolatedSnafu {
                        details: "nonzero-smear entry is not exactly 24h above the one below it",
                    }
                    .fail();
                }
            }
        }
        Ok(())
    }

    pub(crate) fn expiration(&self) -> &Entry {
        &self.entries[0]
    }

    pub(crate) fn modern_epoch(&self) -> &Entry {
        self.entries.last().expect("a LeapTable always has at least two entries")
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Emits the `(positive_leaps, negative_leaps, end_jdn)` catalog that
    /// reconstructs this exact table via [`LeapTable::from_catalog`].
    pub fn to_catalog(&self) -> LeapCatalog {
        let mut positive_leaps = Vec::new();
        let mut negative_leaps = Vec::new();
        for entry in self.entries.iter().rev() {
            if entry.smear != 0 {
                let jdn = julian::unix_offset_to_jdn(entry.utc.offset()) - 1;
                if entry.smear > 0 {
                    positive_leaps.push(jdn);
                } else {
                    negative_leaps.push(jdn);
                }
            }
        }
        let end_jdn = julian::unix_offset_to_jdn(self.entries[0].utc.offset()) - 1;
        LeapCatalog {
            positive_leaps,
            negative_leaps,
            end_jdn,
        }
    }

    /// A human-readable dump of the table for diagnostics: expiration date,
    /// then every entry newest-to-oldest with its running `TAI - UTC`
    /// seconds count (10 at the modern epoch, stepping by each entry's
    /// smear as it accumulates forward).
    #[cfg(feature = "std")]
    pub fn debug_string(&self) -> String {
        use core::fmt::Write;
        let n = self.entries.len();
        let mut offsets = vec![0i64; n];
        offsets[n - 1] = 10;
        for i in (0..n - 1).rev() {
            offsets[i] = offsets[i + 1] + self.entries[i].smear as i64;
        }

        let mut s = String::new();
        let _ = writeln!(s, "expiration: {:?}", self.entries[0].utc);
        for (i, entry) in self.entries.iter().enumerate() {
            let _ = writeln!(
                s,
                "  utc={:?} tai={:?} smear={:+} tai-utc={}s",
                entry.utc, entry.tai, entry.smear, offsets[i]
            );
        }
        s
    }
}

/// Inserts the `(noon of jdn, smear 0)` / `(noon of jdn+1, smear sign)` pair
/// for one leap day.
fn push_leap_pair(raw: &mut Vec<(UtcTime, i8, bool)>, jdn: i32, sign: i8) {
    let onset = UtcTime::from_offset(julian::jdn_to_unix_offset(jdn));
    let settled = UtcTime::from_offset(julian::jdn_to_unix_offset(jdn + 1));
    raw.push((onset, 0, false));
    raw.push((settled, sign, false));
}

fn validate_catalog(catalog: &LeapCatalog) -> Result<(), LeapTableError> {
    let lo = min_supported_jdn();
    let hi = max_supported_jdn();

    if catalog.end_jdn < lo || catalog.end_jdn > hi {
        return EndJdnOutOfRangeSnafu {
            end_jdn: catalog.end_jdn,
        }
        .fail();
    }
    let day_after_end = julian::civil_from_jdn(catalog.end_jdn + 1);
    if !julian::is_first_day_of_month(day_after_end) {
        return EndJdnNotMonthBoundarySnafu {
            end_jdn: catalog.end_jdn,
        }
        .fail();
    }

    let mut seen: Vec<i32> = Vec::with_capacity(catalog.positive_leaps.len() + catalog.negative_leaps.len());
    for &jdn in catalog.positive_leaps.iter().chain(catalog.negative_leaps.iter()) {
        if jdn < lo || jdn > hi {
            return LeapJdnOutOfRangeSnafu { jdn }.fail();
        }
        if jdn >= catalog.end_jdn {
            return LeapJdnAfterEndSnafu {
                jdn,
                end_jdn: catalog.end_jdn,
            }
            .fail();
        }
        if seen.contains(&jdn) {
            return DuplicateLeapJdnSnafu { jdn }.fail();
        }
        seen.push(jdn);
        if !julian::is_last_day_of_month(julian::civil_from_jdn(jdn)) {
            return LeapJdnNotMonthEndSnafu { jdn }.fail();
        }
    }

    Ok(())
}
