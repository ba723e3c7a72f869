//! Civil dates, counted as Julian day numbers.

use std::fmt;
use std::ops::{Add, Sub};

/// A day, identified by its Julian day number.
///
/// Ordering follows time. The earliest representable day is JDN 0, i.e.
/// January 1, 4713 BC in the proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// The day with Julian day number `jdn`.
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Julian day number: the civil day from JD `jdn - 0.5` to `jdn + 0.5`.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the result date is out of supported range, or if
    /// `month` or `day` do not name a real day of that year.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=days_in_month(year, month)).contains(&day) {
            return None;
        }
        let (y, m, d) = (year, month, day);
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// `(year, month, day)` in the proleptic Gregorian calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        // jdn < 2**31 for every date this crate can construct from a year
        let jdn = self.jdn as i64;
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Gregorian year of the date.
    pub fn year(&self) -> i32 {
        self.gregorian().0
    }
    /// Formats the date in ISO 8601 extended format.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }
    /// Formats the date in ISO 8601 basic format, as used by iCalendar
    /// `DATE` values.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::Date;
    ///
    /// let date = Date::from_gregorian(2024, 3, 20).unwrap();
    /// assert_eq!("20240320", date.ical_basic());
    /// ```
    pub fn ical_basic(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}{:02}{:02}", y, m, d)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.saturating_add_signed(rhs))
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Determines if `year` is a leap year in Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && year % 100 != 0 || year % 400 == 0
}

fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 => 28 + is_leap_year(year) as i32,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
