//! Deals with different time scales, specifically, conversion between TDB/TT
//! and UT (UTC or UT1).
//!
//! Only conversions necessary for other computations in this crate are
//! included. UT is only available from 1972-01-01 on, when UTC with leap
//! seconds begins.

use crate::date::Date;

const SECS_PER_DAY: f64 = 86400.0;

/// [Barycentric dynamic time](https://en.wikipedia.org/wiki/Barycentric_Dynamical_Time),
/// represented in Julian date (JD).
///
/// Ephemeris tables are typically computed in this time scale, and should be
/// converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: Because TT differs no more than centiseconds from TDB during
/// thousands of years, they are treated numerically the same in this crate for
/// calendar calculation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl Tt {
    /// Returns the instant `days` later (or earlier, if negative).
    pub fn add_days(self, days: f64) -> Tt {
        Tt(self.0 + days)
    }
}

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl From<Tai> for Tt {
    fn from(tai: Tai) -> Tt {
        Tt(tai.0 + 32.184 / SECS_PER_DAY)
    }
}

/// [International atomic time](https://en.wikipedia.org/wiki/International_Atomic_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tai(pub f64);

impl From<Tt> for Tai {
    fn from(tt: Tt) -> Tai {
        Tai(tt.0 - 32.184 / SECS_PER_DAY)
    }
}

impl From<Tdb> for Tai {
    fn from(tdb: Tdb) -> Tai {
        Tt::from(tdb).into()
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// This can be either UTC (coordinated universal time, based on TAI with leap
/// seconds) or UT1 (mean solar time on the Prime Meridian) depending on the
/// year. Specifically, UTC from 1972-01-01T00:00Z to the expiry of the known
/// leap second table, UT1 afterwards.
///
/// Past the table, conversion from TAI to UT1 relies on an extrapolated
/// ΔT model, [described here](https://astro.ukho.gov.uk/nao/lvm/).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Tries to convert a TAI (or other time scale easily convertible to TAI)
    /// into UT.
    ///
    /// Returns `None` for time points before 1972-01-01.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb).unwrap();
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert<T>(time: T) -> Option<Self>
    where
        T: Into<Tai>,
    {
        let tai = time.into();
        let data = &*leap_seconds::DATA;

        // tolerates rounding in to_tt at 1972-01-01T00:00Z itself
        if tai.0 < data.starts.0 - 1e-8 {
            return None;
        } else if tai > data.expires {
            let diff = leap_seconds::estimate(tai) + data.c2;
            return Some(Ut(tai.0 - diff / SECS_PER_DAY)); // UT1, not UTC
        }

        let ls = match data.leap_seconds.partition_point(|ls| ls.tai <= tai) {
            0 => return Some(Ut(tai.0 - 10.0 / SECS_PER_DAY)),
            i => &data.leap_seconds[i - 1],
        };
        // UT holds still at midnight while the inserted second elapses
        let leap = ((tai.0 - ls.tai.0) * SECS_PER_DAY).clamp(0.0, 1.0);
        Some(Ut(tai.0 - (ls.delta_secs as f64 + leap) / SECS_PER_DAY))
    }

    /// Converts back into TT, the inverse of [`Ut::convert`].
    ///
    /// Returns `None` before 1972-01-01.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::time_scales::Ut;
    /// let ut = Ut(2460390.0);
    /// let tt = ut.to_tt().unwrap();
    /// assert!((tt.0 - ut.0 - 69.184 / 86400.0).abs() < 1e-8);
    /// ```
    pub fn to_tt(&self) -> Option<Tt> {
        let mut tai = Tai(self.0 + 37.0 / SECS_PER_DAY);
        for _ in 0..4 {
            let ut = Ut::convert(tai)?;
            tai = Tai(tai.0 + (self.0 - ut.0));
        }
        Ut::convert(tai)?;
        Some(tai.into())
    }

    /// The first instant of `date` in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    pub fn start_of(date: Date, tz_offset_minutes: i32) -> Self {
        Ut(date.jdn() as f64 - 0.5 - tz_offset_minutes as f64 / 1440.0)
    }

    /// Returns the instant halfway from `self` to `other`, i.e.
    /// `self + (other - self) / 2`.
    pub fn midpoint(self, other: Ut) -> Ut {
        Ut(self.0 + (other.0 - self.0) / 2.0)
    }

    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes`minutes.
    ///
    /// For UTC itself, `tz_offset_minutes` should be 0.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb).unwrap();
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

mod leap_seconds {
    use std::sync::LazyLock;

    use super::{SECS_PER_DAY, Tai, Tt};
    use crate::date::Date;

    /// Last days of UTC that ended with an inserted leap second.
    pub const DATES: &[(i32, i32, i32)] = &[
        (1972, 6, 30),
        (1972, 12, 31),
        (1973, 12, 31),
        (1974, 12, 31),
        (1975, 12, 31),
        (1976, 12, 31),
        (1977, 12, 31),
        (1978, 12, 31),
        (1979, 12, 31),
        (1981, 6, 30),
        (1982, 6, 30),
        (1983, 6, 30),
        (1985, 6, 30),
        (1987, 12, 31),
        (1989, 12, 31),
        (1990, 12, 31),
        (1992, 6, 30),
        (1993, 6, 30),
        (1994, 6, 30),
        (1995, 12, 31),
        (1997, 6, 30),
        (1998, 12, 31),
        (2005, 12, 31),
        (2008, 12, 31),
        (2012, 6, 30),
        (2015, 6, 30),
        (2016, 12, 31),
    ];
    /// Leap second table is known to be complete up to this day.
    pub const DATE_EXPIRES: (i32, i32, i32) = (2026, 6, 28);

    #[derive(Debug, Clone)]
    pub struct Data {
        pub starts: Tai,
        pub leap_seconds: Vec<LeapSecond>,
        pub expires: Tai,
        pub c2: f64,
    }
    /// `tai` is the beginning of the inserted second, `delta_secs` is
    /// TAI - UTC before it.
    #[derive(Debug, Clone)]
    pub struct LeapSecond {
        pub tai: Tai,
        pub delta_secs: i32,
    }

    pub static DATA: LazyLock<Data> = LazyLock::new(compute);

    fn jdn_of((y, m, d): (i32, i32, i32)) -> f64 {
        // table dates are constants, all valid
        Date::from_gregorian(y, m, d).map_or(0.0, |date| date.jdn() as f64)
    }

    fn compute() -> Data {
        let starts = Tai(jdn_of((1972, 1, 1)) - 0.5 + 10.0 / SECS_PER_DAY);
        let leap_seconds = (10..)
            .zip(DATES)
            .map(|(delta_secs, &ymd)| LeapSecond {
                tai: Tai(jdn_of(ymd) + (43200 + delta_secs) as f64 / SECS_PER_DAY),
                delta_secs,
            })
            .collect();
        let expires = Tai(
            jdn_of(DATE_EXPIRES) + (43200 + 10 + DATES.len()) as f64 / SECS_PER_DAY,
        );
        let c2 = (DATES.len() + 10) as f64 - estimate(expires);
        Data {
            starts,
            leap_seconds,
            expires,
            c2,
        }
    }

    /// Long-term parabolic estimate of ΔT in seconds, only its variation is
    /// used.
    pub fn estimate<T: Into<Tt>>(tt: T) -> f64 {
        use std::f64::consts::PI;
        let tt = tt.into();
        let y = (tt.0 - 2451544.5) / 365.2425 + 2000.0;
        let t = (y - 1825.0) / 100.0;
        31.4115 * t * t + 284.8435805251424 * (2.0 * PI * (t + 0.75) / 14.0).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SECOND: f64 = 1.0 / 86400.0;

    #[test]
    fn tdb_to_ut() {
        let tdb = Tdb(2451543.166666667);
        let ut = Ut::convert(tdb).unwrap();
        assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
        // TT - UTC was 64.184 s in 1999
        assert_abs_diff_eq!(tdb.0 - ut.0, 64.184 * SECOND, epsilon = 1e-3 * SECOND);
    }

    #[test]
    fn before_utc() {
        assert_eq!(None, Ut::convert(Tt(2440587.5)));
        assert_eq!(None, Ut(2440587.5).to_tt());
    }

    #[test]
    fn across_leap_second() {
        // 2016-12-31T23:59:60Z
        let leap = Tai(2457754.0 + (43200.0 + 36.0) * SECOND);
        let before = Ut::convert(Tai(leap.0 - 2.0 * SECOND)).unwrap();
        let during = Ut::convert(Tai(leap.0 + 0.5 * SECOND)).unwrap();
        let after = Ut::convert(Tai(leap.0 + 2.0 * SECOND)).unwrap();
        assert!(before < during && during <= after);
        assert_abs_diff_eq!(leap.0 - 2.0 * SECOND - before.0, 36.0 * SECOND, epsilon = 1e-8);
        assert_abs_diff_eq!(leap.0 + 2.0 * SECOND - after.0, 37.0 * SECOND, epsilon = 1e-8);
        assert_eq!((2017, 1, 1), after.date_in_timezone(0).gregorian());
    }

    #[test]
    fn extrapolated_past_table() {
        let data = &*leap_seconds::DATA;
        let at_expiry = Ut::convert(data.expires).unwrap();
        assert_abs_diff_eq!(data.expires.0 - at_expiry.0, 37.0 * SECOND, epsilon = 1e-6);
        // a few years later ΔT drifts, but only by seconds
        let later = Tai(data.expires.0 + 3.0 * 365.25);
        let ut = Ut::convert(later).unwrap();
        assert!(((later.0 - ut.0) / SECOND - 37.0).abs() < 10.0);
    }

    #[test]
    fn ut_round_trip() {
        for jd in [2441500.3, 2451545.0, 2457754.49, 2460390.25, 2470000.0] {
            let ut = Ut(jd);
            let tt = ut.to_tt().unwrap();
            let back = Ut::convert(tt).unwrap();
            assert_abs_diff_eq!(back.0, ut.0, epsilon = 1e-3 * SECOND);
        }
    }

    #[test]
    fn day_boundaries() {
        let date = Date::from_gregorian(2024, 1, 1).unwrap();
        let start = Ut::start_of(date, 0);
        assert_eq!(date, start.date_in_timezone(0));
        assert_eq!(date + -1, Ut(start.0 - SECOND).date_in_timezone(0));
        let start_cst = Ut::start_of(date, 480);
        assert_eq!(date + -1, Ut(start_cst.0 - SECOND).date_in_timezone(480));
        assert_eq!(date, Ut(start_cst.0 + SECOND).date_in_timezone(480));
        assert_abs_diff_eq!(start.0 - start_cst.0, 8.0 / 24.0, epsilon = 1e-8);
    }

    #[test]
    fn midpoint() {
        assert_eq!(Ut(15.0), Ut(10.0).midpoint(Ut(20.0)));
        assert_eq!(Ut(15.0), Ut(20.0).midpoint(Ut(10.0)));
    }
}
