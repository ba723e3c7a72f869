//! Error types for the sabbats crate.

use std::path::PathBuf;

use crate::sabbat::Quarter;

/// Why one row of an ephemeris table could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    /// The field is not a number.
    #[error("invalid number {0:?}")]
    InvalidFloat(String),
    /// The row ended early.
    #[error("missing field")]
    MissingField,
    /// The row does not come strictly after the one before it.
    #[error("time does not increase")]
    NotAscending,
    /// Parsed, but NaN or infinite.
    #[error("non-finite value")]
    NonFinite,
}

/// Error type for loading and evaluating an [`Ephemeris`](crate::ephemeris::Ephemeris).
#[derive(Debug, thiserror::Error)]
pub enum EphemerisError {
    /// Returned when an instant lies outside the range the model covers.
    #[error("JD {jd} is outside ephemeris coverage JD {start}..={end}")]
    OutOfCoverage {
        /// Requested instant, JD (TT).
        jd: f64,
        /// First covered instant.
        start: f64,
        /// Last covered instant.
        end: f64,
    },

    /// Returned when the instant, or the value computed for it, is NaN or
    /// infinite.
    #[error("non-finite solar longitude at JD {jd}")]
    NonFinite {
        /// Requested instant, JD (TT).
        jd: f64,
    },

    /// Returned when an ephemeris file cannot be read.
    #[error("cannot read ephemeris {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a row of an ephemeris table is malformed.
    #[error("ephemeris table line {line}, field {field}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// 1-based field number.
        field: usize,
        /// What is wrong with it.
        reason: RowError,
    },

    /// Returned when a table is to be sampled over an empty range, or with a
    /// step that is not positive.
    #[error("cannot sample JD {start}..={end} every {step_days} days")]
    InvalidRange {
        /// First instant, JD (TT).
        start: f64,
        /// Last instant, JD (TT).
        end: f64,
        /// Sampling step.
        step_days: f64,
    },

    /// Returned when a table has too few rows to interpolate.
    #[error("ephemeris table has {rows} rows, need at least 2")]
    TooFewRows {
        /// Number of rows read.
        rows: usize,
    },
}

/// Error type for computing the sabbats of a year.
///
/// None of these are recoverable: a missing or misplaced season transition
/// would shift every date derived from it.
#[derive(Debug, thiserror::Error)]
pub enum SabbatError {
    /// The positional model cannot be loaded, or does not cover the year.
    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(#[source] EphemerisError),

    /// The search did not yield the four quarter days, each exactly once.
    #[error("expected 4 distinct quarter days in {year}, found {found}")]
    DataIntegrity {
        /// Year searched.
        year: i32,
        /// Number of quarter day transitions found. If there were four but
        /// one quarter day repeated, the number of distinct quarter days.
        found: usize,
    },

    /// Evaluation failed at a given instant.
    #[error("computation failed at JD {jd}: {source}")]
    Computation {
        /// Instant at which evaluation failed, JD (TT).
        jd: f64,
        /// Underlying failure.
        #[source]
        source: EphemerisError,
    },

    /// An instant of the search could not be expressed in UT.
    #[error("no UT available for JD {jd}")]
    NoUniversalTime {
        /// The instant, JD (TT).
        jd: f64,
    },

    /// The search window is empty, reversed or not finite.
    #[error("invalid search window JD {start}..{end}")]
    InvalidWindow {
        /// Window start, JD (TT).
        start: f64,
        /// Window end, JD (TT).
        end: f64,
    },

    /// Two neighbouring quarter days have no cross-quarter day between
    /// them.
    #[error("no cross-quarter day between {from} and {to}")]
    UnpairedQuarters {
        /// Earlier quarter day.
        from: Quarter,
        /// Later quarter day.
        to: Quarter,
    },

    /// The UTC offset is a day or more.
    #[error("invalid UTC offset: {minutes} minutes (must be within a day)")]
    InvalidOffset {
        /// Offset east of UTC.
        minutes: i32,
    },

    /// The year is outside the range this crate computes.
    #[error("year {year} is not supported (must be {min}..={max})")]
    UnsupportedYear {
        /// Requested year.
        year: i32,
        /// Earliest supported year.
        min: i32,
        /// Latest supported year.
        max: i32,
    },
}

impl From<EphemerisError> for SabbatError {
    fn from(e: EphemerisError) -> Self {
        match e {
            EphemerisError::OutOfCoverage { jd, .. } | EphemerisError::NonFinite { jd } => {
                SabbatError::Computation { jd, source: e }
            }
            _ => SabbatError::EphemerisUnavailable(e),
        }
    }
}
