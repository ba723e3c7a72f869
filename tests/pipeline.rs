use chrono::{TimeZone, Utc};

use sabbats::ephemeris::{Ephemeris, LowPrecisionSun, TabulatedEphemeris, normalize_degrees};
use sabbats::ical::Calendar;
use sabbats::sabbat::{SUPPORTED_YEARS, SabbatOptions, sabbats_for_year, wheel_of_year};
use sabbats::time_scales::Tt;
use sabbats::{Date, EphemerisError, SabbatError, SabbatEvent};

const EXPECTED_2024: [(&str, &str); 8] = [
    ("2024-03-20", "Ostara (Spring Equinox)"),
    ("2024-05-05", "Beltane"),
    ("2024-06-20", "Litha (Summer Solstice)"),
    ("2024-08-05", "Imbolc"),
    ("2024-08-06", "Lughnasadh"),
    ("2024-09-22", "Mabon (Autumn Equinox)"),
    ("2024-11-06", "Samhain"),
    ("2024-12-21", "Yule (Winter Solstice)"),
];

const EXPECTED_2000: [(&str, &str); 8] = [
    ("2000-03-20", "Ostara (Spring Equinox)"),
    ("2000-05-05", "Beltane"),
    ("2000-06-21", "Litha (Summer Solstice)"),
    ("2000-08-05", "Imbolc"),
    ("2000-08-06", "Lughnasadh"),
    ("2000-09-22", "Mabon (Autumn Equinox)"),
    ("2000-11-06", "Samhain"),
    ("2000-12-21", "Yule (Winter Solstice)"),
];

fn start_of_year(year: i32) -> f64 {
    Date::from_gregorian(year, 1, 1).unwrap().jdn() as f64 - 0.5
}

fn summary(events: &[SabbatEvent]) -> Vec<(String, String)> {
    events
        .iter()
        .map(|e| (e.date.iso_gregorian(), e.title.clone()))
        .collect()
}

fn expected(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|&(d, t)| (d.to_owned(), t.to_owned()))
        .collect()
}

/// Longitude growing linearly from `start_deg` at `origin`.
struct Sweep {
    origin: f64,
    start_deg: f64,
    deg_per_day: f64,
}

impl Ephemeris for Sweep {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        Ok(normalize_degrees(
            self.start_deg + self.deg_per_day * (t.0 - self.origin),
        ))
    }
    fn coverage(&self) -> (Tt, Tt) {
        (Tt(self.origin - 30.0), Tt(self.origin + 400.0))
    }
}

/// The analytic model, restricted to a shorter coverage.
struct Truncated {
    end: f64,
}

impl Ephemeris for Truncated {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        LowPrecisionSun.solar_longitude(t)
    }
    fn coverage(&self) -> (Tt, Tt) {
        (LowPrecisionSun.coverage().0, Tt(self.end))
    }
}

/// The analytic model, producing garbage after `broken_from`.
struct Corrupted {
    broken_from: f64,
}

impl Ephemeris for Corrupted {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        if t.0 >= self.broken_from {
            return Ok(f64::NAN);
        }
        LowPrecisionSun.solar_longitude(t)
    }
    fn coverage(&self) -> (Tt, Tt) {
        LowPrecisionSun.coverage()
    }
}

#[test]
fn known_years() {
    let options = SabbatOptions::default();
    for (year, table) in [(2024, &EXPECTED_2024), (2000, &EXPECTED_2000)] {
        let events = sabbats_for_year(&LowPrecisionSun, year, &options).unwrap();
        assert_eq!(expected(table), summary(&events), "year {year}");
    }
}

#[test]
fn uids() {
    let events = sabbats_for_year(&LowPrecisionSun, 2024, &SabbatOptions::default()).unwrap();
    assert_eq!("Ostara (Spring Equinox)-2024-03-20@wiccan-sabbats", events[0].uid);
    assert_eq!("Imbolc-2024-08-05@wiccan-sabbats", events[3].uid);
    assert_eq!(
        "Yule (Winter Solstice)-2024-12-21@wiccan-sabbats",
        events[7].uid
    );
}

#[test]
fn every_supported_year_is_well_formed() {
    let options = SabbatOptions::default();
    for year in SUPPORTED_YEARS {
        let wheel = wheel_of_year(&LowPrecisionSun, year, &options).unwrap();

        for q in &wheel.quarters {
            assert_eq!(year, q.date.year(), "{} {year}", q.quarter);
        }
        for pair in wheel.quarters.windows(2) {
            assert!(pair[0].instant < pair[1].instant, "{year}");
        }
        // each cross-quarter lies strictly between the two quarters it is
        // the midpoint of; Yule and Ostara are both this year's
        for (i, c) in wheel.cross_quarters.iter().enumerate() {
            assert_eq!(year, c.date.year(), "{} {year}", c.cross_quarter);
            let a = wheel.quarters[i].date;
            let b = wheel.quarters[(i + 1) % 4].date;
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            assert!(lo < c.date && c.date < hi, "{} {year}", c.cross_quarter);
        }

        let events = wheel.events(&options);
        assert_eq!(8, events.len());
        for pair in events.windows(2) {
            assert!(pair[0].date < pair[1].date, "{year}: {pair:?}");
        }
    }
}

#[test]
fn idempotent() {
    let options = SabbatOptions::new().with_uid_domain("example.org");
    let first = sabbats_for_year(&LowPrecisionSun, 2031, &options).unwrap();
    let second = sabbats_for_year(&LowPrecisionSun, 2031, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dates_follow_utc_offset() {
    let west = SabbatOptions::new().with_utc_offset_minutes(-12 * 60);
    let events = sabbats_for_year(&LowPrecisionSun, 2024, &west).unwrap();
    let yule = events.iter().find(|e| e.title.starts_with("Yule")).unwrap();
    let litha = events.iter().find(|e| e.title.starts_with("Litha")).unwrap();
    assert_eq!("2024-12-20", yule.date.iso_gregorian());
    assert_eq!("2024-06-20", litha.date.iso_gregorian());

    let east = SabbatOptions::new().with_utc_offset_minutes(10 * 60);
    let events = sabbats_for_year(&LowPrecisionSun, 2024, &east).unwrap();
    let lughnasadh = events.iter().find(|e| e.title == "Lughnasadh").unwrap();
    let imbolc = events.iter().find(|e| e.title == "Imbolc").unwrap();
    assert_eq!("2024-08-07", lughnasadh.date.iso_gregorian());
    assert_eq!("2024-08-05", imbolc.date.iso_gregorian());
}

#[test]
fn too_few_transitions() {
    // three quarters of a circle in a year: no spring equinox
    let sweep = Sweep {
        origin: start_of_year(2024),
        start_deg: 10.0,
        deg_per_day: 270.0 / 366.0,
    };
    match sabbats_for_year(&sweep, 2024, &SabbatOptions::default()) {
        Err(SabbatError::DataIntegrity { year, found }) => {
            assert_eq!(2024, year);
            assert_eq!(3, found);
        }
        other => panic!("expected DataIntegrity, got {other:?}"),
    }
}

#[test]
fn coverage_gap() {
    let truncated = Truncated {
        end: start_of_year(2024) + 180.0,
    };
    // the year before is still fine
    assert!(sabbats_for_year(&truncated, 2023, &SabbatOptions::default()).is_ok());
    assert!(matches!(
        sabbats_for_year(&truncated, 2024, &SabbatOptions::default()),
        Err(SabbatError::EphemerisUnavailable(
            EphemerisError::OutOfCoverage { .. }
        ))
    ));
}

#[test]
fn evaluation_failure_propagates() {
    let broken_from = start_of_year(2024) + 200.0;
    let corrupted = Corrupted { broken_from };
    match sabbats_for_year(&corrupted, 2024, &SabbatOptions::default()) {
        Err(SabbatError::Computation { jd, source }) => {
            assert!(jd >= broken_from);
            assert!(matches!(source, EphemerisError::NonFinite { .. }));
        }
        other => panic!("expected Computation, got {other:?}"),
    }
}

#[test]
fn unsupported_years() {
    for year in [1971, 2101, i32::MIN] {
        assert!(matches!(
            sabbats_for_year(&LowPrecisionSun, year, &SabbatOptions::default()),
            Err(SabbatError::UnsupportedYear { .. })
        ));
    }
}

#[test]
fn tabulated_matches_analytic() {
    let table = TabulatedEphemeris::sample(
        &LowPrecisionSun,
        Tt(start_of_year(2024) - 30.0),
        Tt(start_of_year(2025) + 30.0),
        1.0,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sun.txt");
    std::fs::write(&path, table.to_text()).unwrap();
    let loaded = TabulatedEphemeris::load(&path).unwrap();
    assert_eq!(table.len(), loaded.len());

    let events = sabbats_for_year(&loaded, 2024, &SabbatOptions::default()).unwrap();
    assert_eq!(expected(&EXPECTED_2024), summary(&events));

    // the table ends before the next year does
    assert!(matches!(
        sabbats_for_year(&loaded, 2025, &SabbatOptions::default()),
        Err(SabbatError::EphemerisUnavailable(_))
    ));
}

#[test]
fn calendar_file() {
    let events = sabbats_for_year(&LowPrecisionSun, 2024, &SabbatOptions::default()).unwrap();
    let dtstamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let text = Calendar::new(events).to_ical(dtstamp);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wiccan-sabbats.ics");
    std::fs::write(&path, &text).unwrap();
    let read = std::fs::read_to_string(&path).unwrap();

    assert!(read.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(read.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(8, read.matches("BEGIN:VEVENT\r\n").count());
    assert_eq!(8, read.matches("DTSTAMP:20240101T120000Z\r\n").count());
    assert!(read.contains("UID:Imbolc-2024-08-05@wiccan-sabbats\r\n"));
    assert!(read.contains("DTSTART;VALUE=DATE:20240620\r\n"));
    assert!(read.contains("SUMMARY:Litha (Summer Solstice)\r\n"));
}
