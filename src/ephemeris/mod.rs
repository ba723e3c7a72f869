//! Solar ephemeris providers and the season indicator built on them.
//!
//! Two providers are available: [`analytic::LowPrecisionSun`], a
//! closed-form model usable without any data, and
//! [`table::TabulatedEphemeris`], loaded from a longitude table.

use crate::error::EphemerisError;
use crate::search::StepFunction;
use crate::time_scales::Tt;

pub mod analytic;
pub mod table;

pub use analytic::LowPrecisionSun;
pub use table::TabulatedEphemeris;

/// A continuous model of the Sun's position.
pub trait Ephemeris {
    /// Apparent geocentric ecliptic longitude of the Sun at `t`, in degrees
    /// within `0.0..360.0`.
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError>;

    /// First and last instants the model can evaluate.
    fn coverage(&self) -> (Tt, Tt);

    /// Whether the whole of `start..=end` is covered.
    fn covers(&self, start: Tt, end: Tt) -> bool {
        let (first, last) = self.coverage();
        first <= start && end <= last
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        (**self).solar_longitude(t)
    }
    fn coverage(&self) -> (Tt, Tt) {
        (**self).coverage()
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        (**self).solar_longitude(t)
    }
    fn coverage(&self) -> (Tt, Tt) {
        (**self).coverage()
    }
}

/// Rejects instants that are not finite or fall outside `coverage`.
pub(crate) fn check_instant(t: Tt, (start, end): (Tt, Tt)) -> Result<(), EphemerisError> {
    if !t.0.is_finite() {
        return Err(EphemerisError::NonFinite { jd: t.0 });
    }
    if t < start || t > end {
        return Err(EphemerisError::OutOfCoverage {
            jd: t.0,
            start: start.0,
            end: end.0,
        });
    }
    Ok(())
}

/// Reduces an angle in degrees into `0.0..360.0`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid may round up to the modulus itself
    if r >= 360.0 { 0.0 } else { r }
}

/// The current astronomical season, as a step function of time.
///
/// Values are `0` (after the March equinox) through `3` (after the December
/// solstice), i.e. `⌊λ / 90°⌋` for the Sun's apparent longitude `λ`.
#[derive(Debug, Clone)]
pub struct SeasonIndicator<E> {
    ephemeris: E,
}

impl<E: Ephemeris> SeasonIndicator<E> {
    /// Sampling interval of the search, shorter than the shortest season.
    pub const STEP_DAYS: f64 = 25.0;

    pub fn new(ephemeris: E) -> Self {
        Self { ephemeris }
    }

    /// Season in effect at `t`.
    ///
    /// # Example
    ///
    /// ```
    /// use sabbats::ephemeris::{LowPrecisionSun, SeasonIndicator};
    /// use sabbats::time_scales::Tt;
    ///
    /// let seasons = SeasonIndicator::new(LowPrecisionSun);
    /// assert_eq!(3, seasons.season_at(Tt(2451545.0)).unwrap()); // 2000-01-01
    /// ```
    pub fn season_at(&self, t: Tt) -> Result<u8, EphemerisError> {
        let lon = self.ephemeris.solar_longitude(t)?;
        if !lon.is_finite() {
            return Err(EphemerisError::NonFinite { jd: t.0 });
        }
        Ok((normalize_degrees(lon) / 90.0).floor() as u8 % 4)
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }
}

impl<E: Ephemeris> StepFunction for SeasonIndicator<E> {
    fn step_days(&self) -> f64 {
        Self::STEP_DAYS
    }
    fn value_at(&self, t: Tt) -> Result<u8, EphemerisError> {
        self.season_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl Ephemeris for Fixed {
        fn solar_longitude(&self, _: Tt) -> Result<f64, EphemerisError> {
            Ok(self.0)
        }
        fn coverage(&self) -> (Tt, Tt) {
            (Tt(0.0), Tt(10.0))
        }
    }

    #[test]
    fn season_values() {
        for (lon, season) in [(0.0, 0), (89.999, 0), (90.0, 1), (180.0, 2), (359.99, 3), (-0.001, 3)] {
            let seasons = SeasonIndicator::new(Fixed(lon));
            assert_eq!(season, seasons.season_at(Tt(1.0)).unwrap(), "λ = {lon}");
        }
    }

    #[test]
    fn rejects_nan_longitude() {
        let seasons = SeasonIndicator::new(Fixed(f64::NAN));
        assert!(matches!(
            seasons.season_at(Tt(1.0)),
            Err(EphemerisError::NonFinite { .. })
        ));
    }

    #[test]
    fn coverage_checks() {
        let cov = (Tt(0.0), Tt(10.0));
        assert!(check_instant(Tt(0.0), cov).is_ok());
        assert!(check_instant(Tt(10.0), cov).is_ok());
        assert!(matches!(
            check_instant(Tt(10.5), cov),
            Err(EphemerisError::OutOfCoverage { .. })
        ));
        assert!(matches!(
            check_instant(Tt(f64::INFINITY), cov),
            Err(EphemerisError::NonFinite { .. })
        ));
        assert!(Fixed(0.0).covers(Tt(1.0), Tt(9.0)));
        assert!(!(&Fixed(0.0)).covers(Tt(1.0), Tt(11.0)));
    }

    #[test]
    fn normalize() {
        assert_eq!(10.0, normalize_degrees(370.0));
        assert_eq!(350.0, normalize_degrees(-10.0));
        assert!((0.0..360.0).contains(&normalize_degrees(-1e-15)));
    }
}
