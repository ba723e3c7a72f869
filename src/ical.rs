//! iCalendar ([RFC 5545](https://www.rfc-editor.org/rfc/rfc5545)) output.
//!
//! Only what is needed for all-day events: one `VEVENT` per sabbat with a
//! stable `UID`, so that a client re-importing the calendar updates entries
//! in place.

use chrono::{DateTime, Utc};

use crate::sabbat::SabbatEvent;

/// Product identifier used when none is configured.
pub const DEFAULT_PRODID: &str = "-//Wiccan Sabbats Calendar//";
/// Refresh hint used when none is configured: daily.
pub const DEFAULT_REFRESH_INTERVAL: &str = "P1D";

const MAX_LINE_OCTETS: usize = 75;

/// A calendar of sabbats.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    prodid: String,
    refresh_interval: String,
    events: Vec<SabbatEvent>,
}

impl Calendar {
    pub fn new(events: Vec<SabbatEvent>) -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_owned(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL.to_owned(),
            events,
        }
    }

    pub fn with_prodid(mut self, prodid: impl Into<String>) -> Self {
        self.prodid = prodid.into();
        self
    }

    /// Sets the `X-PUBLISHED-TTL` hint, an ISO 8601 duration such as `P1D`.
    pub fn with_refresh_interval(mut self, interval: impl Into<String>) -> Self {
        self.refresh_interval = interval.into();
        self
    }

    pub fn events(&self) -> &[SabbatEvent] {
        &self.events
    }

    /// Serializes the calendar, stamping every event with `dtstamp`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use sabbats::Date;
    /// use sabbats::ical::Calendar;
    /// use sabbats::sabbat::SabbatEvent;
    ///
    /// let event = SabbatEvent {
    ///     date: Date::from_gregorian(2024, 5, 5).unwrap(),
    ///     title: "Beltane".into(),
    ///     uid: "Beltane-2024-05-05@wiccan-sabbats".into(),
    /// };
    /// let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let text = Calendar::new(vec![event]).to_ical(stamp);
    /// assert!(text.contains("DTSTART;VALUE=DATE:20240505\r\n"));
    /// ```
    pub fn to_ical(&self, dtstamp: DateTime<Utc>) -> String {
        let stamp = dtstamp.format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::new();
        let mut line = |s: String| {
            out.push_str(&fold(&s));
            out.push_str("\r\n");
        };
        line("BEGIN:VCALENDAR".into());
        line("VERSION:2.0".into());
        line(format!("PRODID:{}", escape_text(&self.prodid)));
        line(format!("X-PUBLISHED-TTL:{}", self.refresh_interval));
        for event in &self.events {
            line("BEGIN:VEVENT".into());
            line(format!("UID:{}", escape_text(&event.uid)));
            line(format!("DTSTAMP:{stamp}"));
            line(format!("DTSTART;VALUE=DATE:{}", event.date.ical_basic()));
            line(format!("SUMMARY:{}", escape_text(&event.title)));
            line("END:VEVENT".into());
        }
        line("END:VCALENDAR".into());
        out
    }
}

/// Escapes a `TEXT` value.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Folds a content line so no physical line exceeds 75 octets, never
/// splitting a UTF-8 sequence.
fn fold(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_owned();
    }
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    // continuation lines spend one octet on the leading space
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        if used + c.len_utf8() > budget {
            out.push_str("\r\n ");
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += c.len_utf8();
    }
    out
}
