//! Tabulated solar longitudes.
//!
//! The table is plain text: one header line, then one row per instant with
//! the Julian date (TDB) and the Sun's apparent longitude in degrees,
//! separated by whitespace. Blank lines are ignored. Rows must be in
//! strictly increasing time order; values in between are interpolated
//! linearly.
//!
//! ```text
//! jd_tdb longitude_deg
//! 2460389.5 359.8706
//! 2460390.5 0.8615
//! ```

use std::fmt::Write as _;
use std::path::Path;

use super::{Ephemeris, check_instant, normalize_degrees};
use crate::error::{EphemerisError, RowError};
use crate::time_scales::{Tdb, Tt};

/// A solar ephemeris interpolated from a table of longitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedEphemeris {
    /// `(JD, longitude)` pairs, ascending by JD.
    rows: Vec<(Tt, f64)>,
}

impl TabulatedEphemeris {
    /// Reads a table from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EphemerisError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EphemerisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            rows = table.rows.len(),
            "loaded ephemeris table"
        );
        Ok(table)
    }

    /// Parses a table from its text form.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::ephemeris::{Ephemeris, TabulatedEphemeris};
    /// use sabbats::time_scales::Tt;
    ///
    /// let table = TabulatedEphemeris::parse("jd lon\n0.0 359.0\n1.0 1.0\n").unwrap();
    /// let lon = table.solar_longitude(Tt(0.75)).unwrap();
    /// assert!((lon - 0.5).abs() < 1e-12);
    /// ```
    pub fn parse(text: &str) -> Result<Self, EphemerisError> {
        let mut rows: Vec<(Tt, f64)> = Vec::new();
        for (line_num, line) in (1usize..).zip(text.lines()).skip(1) {
            let mut it = line.split_whitespace();
            let jd = match it.next() {
                None => continue,
                Some(s) => parse_field(s, line_num, 1)?,
            };
            let lon = require_next_f64(&mut it, line_num, 2)?;
            let t = Tt::from(Tdb(jd));
            if rows.last().is_some_and(|&(prev, _)| prev >= t) {
                return Err(row_error(line_num, 1, RowError::NotAscending));
            }
            rows.push((t, normalize_degrees(lon)));
        }
        if rows.len() < 2 {
            return Err(EphemerisError::TooFewRows { rows: rows.len() });
        }
        Ok(Self { rows })
    }

    /// Tabulates `ephemeris` every `step_days` from `start` up to and
    /// including `end`.
    pub fn sample<E: Ephemeris>(
        ephemeris: &E,
        start: Tt,
        end: Tt,
        step_days: f64,
    ) -> Result<Self, EphemerisError> {
        if !(step_days > 0.0) || !(start < end) {
            return Err(EphemerisError::InvalidRange {
                start: start.0,
                end: end.0,
                step_days,
            });
        }
        let n = ((end.0 - start.0) / step_days).ceil() as usize;
        let rows = (0..=n)
            .map(|i| {
                let t = if i == n {
                    end
                } else {
                    start.add_days(i as f64 * step_days)
                };
                ephemeris.solar_longitude(t).map(|lon| (t, lon))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    /// Writes the table in the form [`TabulatedEphemeris::parse`] reads.
    pub fn to_text(&self) -> String {
        let mut out = String::from("jd_tdb longitude_deg\n");
        for (t, lon) in &self.rows {
            // writing into a String cannot fail
            let _ = writeln!(out, "{:.6} {:.8}", t.0, lon);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Ephemeris for TabulatedEphemeris {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        check_instant(t, self.coverage())?;
        let i = self
            .rows
            .partition_point(|&(rt, _)| rt <= t)
            .clamp(1, self.rows.len() - 1);
        let (t0, lon0) = self.rows[i - 1];
        let (t1, lon1) = self.rows[i];
        // shortest way round, so 359° -> 1° passes through 0°
        let delta = (lon1 - lon0 + 180.0).rem_euclid(360.0) - 180.0;
        let frac = (t.0 - t0.0) / (t1.0 - t0.0);
        Ok(normalize_degrees(lon0 + delta * frac))
    }

    fn coverage(&self) -> (Tt, Tt) {
        // parse and sample both guarantee at least two rows
        (self.rows[0].0, self.rows[self.rows.len() - 1].0)
    }
}

fn row_error(line: usize, field: usize, reason: RowError) -> EphemerisError {
    EphemerisError::Parse {
        line,
        field,
        reason,
    }
}

fn parse_field(s: &str, line_num: usize, field_num: usize) -> Result<f64, EphemerisError> {
    let v: f64 = s
        .parse()
        .map_err(|_| row_error(line_num, field_num, RowError::InvalidFloat(s.to_owned())))?;
    if !v.is_finite() {
        return Err(row_error(line_num, field_num, RowError::NonFinite));
    }
    Ok(v)
}

fn require_next_f64<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    line_num: usize,
    field_num: usize,
) -> Result<f64, EphemerisError> {
    let s = it
        .next()
        .ok_or_else(|| row_error(line_num, field_num, RowError::MissingField))?;
    parse_field(s, line_num, field_num)
}
