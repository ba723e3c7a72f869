//! Computes the eight seasonal sabbats of a year from the Sun's position.
//!
//! The quarter days (Ostara, Litha, Mabon, Yule) are the equinoxes and
//! solstices, located by searching a solar ephemeris for the instants at
//! which the season changes. The cross-quarter days (Imbolc, Beltane,
//! Lughnasadh, Samhain) are the midpoints between quarter days that follow
//! each other in the yearly cycle.
//! The results can be written out as an iCalendar file with stable event
//! identifiers, so re-importing a regenerated calendar updates it in place.
//!
//! # Examples
//!
//! Basic usage with the built-in analytic ephemeris:
//!
//! ```
//! use sabbats::ephemeris::LowPrecisionSun;
//! use sabbats::sabbat::{SabbatOptions, sabbats_for_year};
//!
//! let events = sabbats_for_year(&LowPrecisionSun, 2024, &SabbatOptions::default()).unwrap();
//!
//! assert_eq!(8, events.len());
//! assert_eq!("2024-06-20", events[2].date.iso_gregorian());
//! assert_eq!("Litha (Summer Solstice)", events[2].title);
//! ```
//!
//! Any other model of the Sun can be used by implementing
//! [`ephemeris::Ephemeris`], e.g. a table loaded with
//! [`ephemeris::TabulatedEphemeris::load`].

pub mod date;
pub mod ephemeris;
pub mod error;
pub mod ical;
pub mod sabbat;
pub mod search;
pub mod time_scales;

pub use date::Date;
pub use error::{EphemerisError, SabbatError};
pub use sabbat::{SabbatEvent, SabbatOptions, sabbats_for_year};
