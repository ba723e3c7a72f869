//! Names, titles and identifiers of the sabbats.

use super::{CrossQuarter, Quarter};
use crate::date::Date;

/// Uid namespace used when none is configured.
pub const DEFAULT_UID_DOMAIN: &str = "wiccan-sabbats";

/// Short name of a quarter day.
///
/// # Example
///
/// ```
/// use sabbats::sabbat::{Quarter, fmt};
///
/// assert_eq!("Litha", fmt::quarter_name(Quarter::Litha));
/// ```
pub fn quarter_name(q: Quarter) -> &'static str {
    match q {
        Quarter::Ostara => "Ostara",
        Quarter::Litha => "Litha",
        Quarter::Mabon => "Mabon",
        Quarter::Yule => "Yule",
    }
}

/// Calendar title of a quarter day, naming the astronomical event too.
///
/// # Example
///
/// ```
/// use sabbats::sabbat::{Quarter, fmt};
///
/// assert_eq!("Yule (Winter Solstice)", fmt::quarter_title(Quarter::Yule));
/// ```
pub fn quarter_title(q: Quarter) -> &'static str {
    match q {
        Quarter::Ostara => "Ostara (Spring Equinox)",
        Quarter::Litha => "Litha (Summer Solstice)",
        Quarter::Mabon => "Mabon (Autumn Equinox)",
        Quarter::Yule => "Yule (Winter Solstice)",
    }
}

/// Name of a cross-quarter day, which is also its calendar title.
pub fn cross_quarter_name(c: CrossQuarter) -> &'static str {
    match c {
        CrossQuarter::Imbolc => "Imbolc",
        CrossQuarter::Beltane => "Beltane",
        CrossQuarter::Lughnasadh => "Lughnasadh",
        CrossQuarter::Samhain => "Samhain",
    }
}

/// Stable identifier of an event: the same title on the same date always
/// yields the same uid, so calendar clients update rather than duplicate.
///
/// # Example
///
/// ```
/// use sabbats::Date;
/// use sabbats::sabbat::fmt;
///
/// let date = Date::from_gregorian(2024, 5, 5).unwrap();
/// assert_eq!("Beltane-2024-05-05@wiccan-sabbats", fmt::uid("Beltane", date, "wiccan-sabbats"));
/// ```
pub fn uid(title: &str, date: Date, domain: &str) -> String {
    format!("{}-{}@{}", title, date.iso_gregorian(), domain)
}
