//! The eight sabbats of a year.
//!
//! The four quarter days are the equinoxes and solstices, found as the
//! instants at which the Sun's apparent longitude crosses a multiple of 90°.
//! Each cross-quarter day is the midpoint of two quarter days that follow
//! each other in the cycle below. All four quarter days are taken from the
//! same year, so Imbolc, between Yule and that year's Ostara, falls in
//! August.
//!
//! ```text
//!  Yule ──Imbolc── Ostara ──Beltane── Litha ──Lughnasadh── Mabon ──Samhain── Yule
//! ```
//!
//! All dates are taken in one fixed UTC offset (UTC itself by default).
//!
//! # Example
//!
//! ```
//! use sabbats::ephemeris::LowPrecisionSun;
//! use sabbats::sabbat::{SabbatOptions, sabbats_for_year};
//!
//! let events = sabbats_for_year(&LowPrecisionSun, 2024, &SabbatOptions::default()).unwrap();
//! let summary: Vec<_> = events
//!     .iter()
//!     .map(|e| format!("{} {}", e.date, e.title))
//!     .collect();
//! assert_eq!(
//!     summary,
//!     [
//!         "2024-03-20 Ostara (Spring Equinox)",
//!         "2024-05-05 Beltane",
//!         "2024-06-20 Litha (Summer Solstice)",
//!         "2024-08-05 Imbolc",
//!         "2024-08-06 Lughnasadh",
//!         "2024-09-22 Mabon (Autumn Equinox)",
//!         "2024-11-06 Samhain",
//!         "2024-12-21 Yule (Winter Solstice)",
//!     ]
//! );
//! ```

use std::fmt as std_fmt;
use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::date::Date;
use crate::ephemeris::{Ephemeris, SeasonIndicator};
use crate::error::{EphemerisError, SabbatError};
use crate::search::{Transition, find_discrete};
use crate::time_scales::{Tt, Ut};

pub mod fmt;

/// Years for which sabbats can be computed.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1972..=2100;

/// Quarter days, in calendar order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Quarter {
    /// March equinox.
    Ostara,
    /// June solstice.
    Litha,
    /// September equinox.
    Mabon,
    /// December solstice.
    Yule,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Ostara, Quarter::Litha, Quarter::Mabon, Quarter::Yule];

    /// Maps a season indicator value to the quarter day that begins that
    /// season. Values other than `0..=3` have no quarter day.
    pub fn from_indicator(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
    pub fn name(&self) -> &'static str {
        fmt::quarter_name(*self)
    }
    pub fn title(&self) -> &'static str {
        fmt::quarter_title(*self)
    }
}

impl std_fmt::Display for Quarter {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.name())
    }
}

/// Cross-quarter days, in calendar order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum CrossQuarter {
    Imbolc,
    Beltane,
    Lughnasadh,
    Samhain,
}

impl CrossQuarter {
    pub const ALL: [CrossQuarter; 4] = [
        CrossQuarter::Imbolc,
        CrossQuarter::Beltane,
        CrossQuarter::Lughnasadh,
        CrossQuarter::Samhain,
    ];

    /// The cross-quarter day lying between quarter days `from` and `to`, in
    /// that order.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::sabbat::{CrossQuarter, Quarter};
    ///
    /// assert_eq!(Some(CrossQuarter::Imbolc), CrossQuarter::between(Quarter::Yule, Quarter::Ostara));
    /// assert_eq!(None, CrossQuarter::between(Quarter::Ostara, Quarter::Yule));
    /// ```
    pub fn between(from: Quarter, to: Quarter) -> Option<Self> {
        use Quarter::*;
        match (from, to) {
            (Yule, Ostara) => Some(Self::Imbolc),
            (Ostara, Litha) => Some(Self::Beltane),
            (Litha, Mabon) => Some(Self::Lughnasadh),
            (Mabon, Yule) => Some(Self::Samhain),
            _ => None,
        }
    }
    pub fn name(&self) -> &'static str {
        fmt::cross_quarter_name(*self)
    }
}

impl std_fmt::Display for CrossQuarter {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.name())
    }
}

/// An equinox or solstice.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuarterEvent {
    pub instant: Ut,
    /// Date of `instant` in the configured offset.
    pub date: Date,
    pub quarter: Quarter,
}

/// A midpoint between two quarter days.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CrossQuarterEvent {
    pub instant: Ut,
    /// Date of `instant` in the configured offset.
    pub date: Date,
    pub cross_quarter: CrossQuarter,
}

/// One calendar entry.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SabbatEvent {
    pub date: Date,
    pub title: String,
    /// Derived from `title` and `date` only, see [`fmt::uid`].
    pub uid: String,
}

/// Options for computing sabbats.
///
/// # Example
///
/// ```
/// use sabbats::sabbat::SabbatOptions;
///
/// let options = SabbatOptions::new()
///     .with_utc_offset_minutes(60)
///     .with_uid_domain("example.org");
/// assert_eq!(60, options.utc_offset_minutes());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SabbatOptions {
    utc_offset_minutes: i32,
    uid_domain: String,
}

impl SabbatOptions {
    /// Defaults: dates in UTC, uids in the `wiccan-sabbats` namespace.
    pub fn new() -> Self {
        Self {
            utc_offset_minutes: 0,
            uid_domain: fmt::DEFAULT_UID_DOMAIN.to_owned(),
        }
    }

    /// Sets the fixed offset east of UTC in which dates are taken.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Sets the namespace suffix of event uids.
    pub fn with_uid_domain(mut self, domain: impl Into<String>) -> Self {
        self.uid_domain = domain.into();
        self
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    pub fn uid_domain(&self) -> &str {
        &self.uid_domain
    }
}

impl Default for SabbatOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Quarter and cross-quarter days of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Wheel {
    pub year: i32,
    /// Chronological.
    pub quarters: [QuarterEvent; 4],
    /// `cross_quarters[i]` lies between `quarters[i]` and the quarter after
    /// it, wrapping from Yule around to Ostara.
    pub cross_quarters: [CrossQuarterEvent; 4],
}

impl Wheel {
    /// All eight sabbats as calendar entries, in date order.
    pub fn events(&self, options: &SabbatOptions) -> Vec<SabbatEvent> {
        assemble(&self.quarters, &self.cross_quarters, options)
    }
}

/// First and last instants of `year` in the given offset, as the search
/// window for its season transitions.
pub fn year_window(year: i32, utc_offset_minutes: i32) -> Result<(Tt, Tt), SabbatError> {
    let unsupported = || SabbatError::UnsupportedYear {
        year,
        min: *SUPPORTED_YEARS.start(),
        max: *SUPPORTED_YEARS.end(),
    };
    let first = Date::from_gregorian(year, 1, 1).ok_or_else(unsupported)?;
    let next = Date::from_gregorian(year + 1, 1, 1).ok_or_else(unsupported)?;
    let start = Ut::start_of(first, utc_offset_minutes);
    // last second of Dec 31
    let end = Ut(Ut::start_of(next, utc_offset_minutes).0 - 1.0 / 86400.0);
    let to_tt = |ut: Ut| ut.to_tt().ok_or(SabbatError::NoUniversalTime { jd: ut.0 });
    Ok((to_tt(start)?, to_tt(end)?))
}

/// Finds the season transitions within `year`.
pub fn season_transitions<E: Ephemeris>(
    ephemeris: &E,
    year: i32,
    utc_offset_minutes: i32,
) -> Result<Vec<Transition>, SabbatError> {
    let (start, end) = year_window(year, utc_offset_minutes)?;
    if !ephemeris.covers(start, end) {
        let (first, last) = ephemeris.coverage();
        let jd = if start < first { start.0 } else { end.0 };
        return Err(SabbatError::EphemerisUnavailable(
            EphemerisError::OutOfCoverage {
                jd,
                start: first.0,
                end: last.0,
            },
        ));
    }
    find_discrete(start, end, &SeasonIndicator::new(ephemeris))
}

/// Picks the quarter days out of the season transitions of `year`.
///
/// Transitions with values that name no quarter day are skipped. Anything
/// other than exactly four distinct quarter days is an error.
pub fn label_quarters(
    year: i32,
    transitions: &[Transition],
    utc_offset_minutes: i32,
) -> Result<[QuarterEvent; 4], SabbatError> {
    let mut quarters = Vec::with_capacity(4);
    for tr in transitions {
        let Some(quarter) = Quarter::from_indicator(tr.value) else {
            debug!(value = tr.value, jd = tr.instant.0, "skipping non-season transition");
            continue;
        };
        let instant = Ut::convert(tr.instant).ok_or(SabbatError::NoUniversalTime { jd: tr.instant.0 })?;
        quarters.push(QuarterEvent {
            instant,
            date: instant.date_in_timezone(utc_offset_minutes),
            quarter,
        });
    }
    let quarters: [QuarterEvent; 4] = quarters
        .try_into()
        .map_err(|v: Vec<_>| SabbatError::DataIntegrity {
            year,
            found: v.len(),
        })?;

    let mut distinct: Vec<_> = quarters.iter().map(|q| q.quarter).collect();
    distinct.sort();
    distinct.dedup();
    if distinct.len() != 4 {
        return Err(SabbatError::DataIntegrity {
            year,
            found: distinct.len(),
        });
    }
    Ok(quarters)
}

/// Midpoint `a + (b - a) / 2` of quarter instant `a` and the quarter `b`
/// after it in the cycle.
///
/// Both come from the same year, so for Yule and Ostara `b` is earlier than
/// `a` and the midpoint falls between them, in early August.
pub fn cross_quarter_instant(a: Ut, b: Ut) -> Ut {
    a.midpoint(b)
}

/// Derives the four cross-quarter days from the chronological quarter days
/// of one year, taking them as a cycle.
pub fn derive_cross_quarters(
    quarters: &[QuarterEvent; 4],
    utc_offset_minutes: i32,
) -> Result<[CrossQuarterEvent; 4], SabbatError> {
    let mut labels = [CrossQuarter::Imbolc; 4];
    for (i, label) in labels.iter_mut().enumerate() {
        let (from, to) = (quarters[i].quarter, quarters[(i + 1) % 4].quarter);
        *label = CrossQuarter::between(from, to).ok_or(SabbatError::UnpairedQuarters { from, to })?;
    }
    Ok(std::array::from_fn(|i| {
        let (a, b) = (&quarters[i], &quarters[(i + 1) % 4]);
        let instant = cross_quarter_instant(a.instant, b.instant);
        let event = CrossQuarterEvent {
            instant,
            date: instant.date_in_timezone(utc_offset_minutes),
            cross_quarter: labels[i],
        };
        debug!(
            name = %event.cross_quarter,
            date = %event.date,
            from = %a.quarter,
            to = %b.quarter,
            "derived cross-quarter"
        );
        event
    }))
}

/// Merges quarter and cross-quarter days into calendar entries sorted by
/// date.
pub fn assemble(
    quarters: &[QuarterEvent; 4],
    cross_quarters: &[CrossQuarterEvent; 4],
    options: &SabbatOptions,
) -> Vec<SabbatEvent> {
    let entry = |date: Date, title: &str| SabbatEvent {
        date,
        title: title.to_owned(),
        uid: fmt::uid(title, date, options.uid_domain()),
    };
    let mut events: Vec<SabbatEvent> = quarters
        .iter()
        .map(|q| entry(q.date, q.quarter.title()))
        .chain(cross_quarters.iter().map(|c| entry(c.date, c.cross_quarter.name())))
        .collect();
    events.sort_by_key(|e| e.date);
    events
}

/// Computes the quarter and cross-quarter days of `year`.
pub fn wheel_of_year<E: Ephemeris>(
    ephemeris: &E,
    year: i32,
    options: &SabbatOptions,
) -> Result<Wheel, SabbatError> {
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(SabbatError::UnsupportedYear {
            year,
            min: *SUPPORTED_YEARS.start(),
            max: *SUPPORTED_YEARS.end(),
        });
    }
    let offset = options.utc_offset_minutes();
    if offset.abs() >= 24 * 60 {
        return Err(SabbatError::InvalidOffset { minutes: offset });
    }

    let transitions = season_transitions(ephemeris, year, offset)?;
    let quarters = label_quarters(year, &transitions, offset)?;
    let cross_quarters = derive_cross_quarters(&quarters, offset)?;
    info!(year, "computed quarter and cross-quarter days");
    Ok(Wheel {
        year,
        quarters,
        cross_quarters,
    })
}

/// Computes the eight sabbats of `year` as calendar entries, in date order.
pub fn sabbats_for_year<E: Ephemeris>(
    ephemeris: &E,
    year: i32,
    options: &SabbatOptions,
) -> Result<Vec<SabbatEvent>, SabbatError> {
    Ok(wheel_of_year(ephemeris, year, options)?.events(options))
}
