//! Integration tests built directly from the worked scenarios in the design
//! notes: a positive leap at the end of June 1972, queried at a distant
//! in-table instant, across its own smear window, and past expiration.

use leapsmear::julian::{self, CivilDate};
use leapsmear::{Duration, GpsTime, LeapCatalog, LeapTable, TaiTime, TimeUnits, Timepoint, UtcTime};

fn jdn(year: i32, month: u8, day: u8) -> i32 {
    julian::jdn_from_civil(CivilDate { year, month, day })
}

fn utc_at(year: i32, month: u8, day: u8, hour: i64) -> UtcTime {
    UtcTime::from_offset(julian::jdn_to_unix_offset(jdn(year, month, day)) + hour.hours())
}

/// A positive leap on JDN 2441499 (1972-06-30), smear window
/// 1972-06-30 noon -> 1972-07-01 noon, expiring end of 2017.
fn scenario_table() -> LeapTable {
    let leap_jdn = jdn(1972, 6, 30);
    assert_eq!(leap_jdn, 2_441_499);
    let catalog = LeapCatalog {
        positive_leaps: vec![leap_jdn],
        negative_leaps: vec![],
        end_jdn: jdn(2017, 12, 31),
    };
    LeapTable::from_catalog(&catalog).unwrap()
}

/// Scenario 1: an ordinary far-future in-table instant unsmears and smears
/// back to itself.
#[test]
fn scenario_1_distant_instant_roundtrips() {
    let table = scenario_table();
    let utc = utc_at(2017, 1, 15, 10);
    let tai = table.unsmear(utc).expect("2017-01-15 is well inside the table");
    assert_eq!(table.smear(tai).unwrap(), utc);
}

/// Scenario 3: at the midpoint of a smear window, the UTC-to-TAI map
/// advances by exactly `12h * 86399/86400` relative to the window's onset,
/// for a window carrying a negative leap (`smear == -1`).
#[test]
fn scenario_3_negative_smear_midpoint_rate() {
    let catalog = LeapCatalog {
        positive_leaps: vec![],
        negative_leaps: vec![jdn(1972, 6, 30)],
        end_jdn: jdn(2000, 12, 31),
    };
    let table = LeapTable::from_catalog(&catalog).unwrap();
    let onset = utc_at(1972, 6, 30, 0);
    let midpoint = onset + 12i64.hours();

    let tai_onset = table.unsmear(onset).unwrap();
    let tai_mid = table.unsmear(midpoint).unwrap();

    // 12h * 86399/86400 s, exactly: 43199.5 s.
    let expected_rate = Duration::from_nanos(43_199_500_000_000);
    assert_eq!(tai_mid - tai_onset, expected_rate);
}

/// Scenario 4: the modern UTC epoch cannot be converted to GPST (it precedes
/// the GPS epoch by eight years), but its future-proof counterpart collapses
/// to the universal GPST interval rather than failing.
#[test]
fn scenario_4_modern_epoch_predates_gps() {
    let table = scenario_table();
    let modern_epoch = UtcTime::from_offset(julian::jdn_to_unix_offset(jdn(1972, 1, 1)) - 12i64.hours());

    assert_eq!(table.unsmear_to_gps(modern_epoch), None);
    assert_eq!(
        table.future_proof_unsmear_to_gps(modern_epoch),
        (GpsTime::INFINITE_PAST, GpsTime::INFINITE_FUTURE)
    );
}

/// Scenario 6: duration formatting and parsing, both directions.
#[test]
fn scenario_6_duration_format_and_parse() {
    let d = 72i64.hours() + 3i64.minutes() + 500_000_000i64.nanoseconds();
    assert_eq!(d.to_string(), "72h3m0.5s");

    let parsed: Duration = "2h3m4s5ms6us7ns".parse().unwrap();
    let expected =
        2i64.hours() + 3i64.minutes() + 4i64.seconds() + 5i64.milliseconds() + 6i64.microseconds() + 7i64.nanoseconds();
    assert_eq!(parsed, expected);
}

/// Scenario 5: the widening ramp begins immediately at expiration itself —
/// the 24h immediately following expiration is the first hypothetical smear
/// window — climbing 250ms per 6h step to +-1s at +24h.
#[test]
fn scenario_5_future_proof_unsmear_ramps_from_expiration() {
    let table = scenario_table();
    // scenario_table()'s expiration is noon 2018-01-01 (one day after its
    // end_jdn of 2017-12-31).
    let expiration = utc_at(2018, 1, 1, 0);

    for (hours_after_expiration, expected_half_width_ms) in [(0i64, 0i64), (6, 250), (12, 500), (18, 750), (24, 1000)]
    {
        let t = expiration + hours_after_expiration.hours();
        let (lo, hi) = table.future_proof_unsmear(t);
        let half_width = (hi - lo).total_nanoseconds().unwrap() / 2 / 1_000_000;
        assert_eq!(half_width, expected_half_width_ms as i128, "at +{hours_after_expiration}h");
    }
}

/// Scenario 2: once the first hypothetical smear window has fully closed
/// (here, `expiration + 48h`, a full day past the +24h window edge) the
/// bracket is flat at +-1s until the next hypothetical month-end comes into
/// reach.
#[test]
fn scenario_2_future_proof_unsmear_past_first_window() {
    let table = scenario_table();
    let expiration = utc_at(2018, 1, 1, 0);
    let t = expiration + 48i64.hours();

    let exact_tai = table.unsmear(t);
    assert_eq!(exact_tai, None, "t is past expiration, so the exact API must refuse it");

    let (lo, hi) = table.future_proof_unsmear(t);
    assert_eq!(hi - lo, Duration::from_seconds(2));

    // Stays flat at +-1s for the rest of that month, until the next
    // hypothetical window (one calendar month after expiration) opens.
    let still_flat = expiration + 20i64.days();
    let (lo2, hi2) = table.future_proof_unsmear(still_flat);
    assert_eq!(hi2 - lo2, Duration::from_seconds(2));
}

#[cfg(feature = "std")]
#[test]
fn format_time_appends_timescale_label() {
    let tai = TaiTime::from_offset(0i64.seconds());
    assert_eq!(leapsmear::format_time_default(tai), "1970-01-01 00:00:00 TAI");
    assert_eq!(leapsmear::format_time(tai, "%Y%%Z"), "1970%Z");
}
