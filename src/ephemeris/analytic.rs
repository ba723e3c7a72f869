//! Closed-form solar position.
//!
//! Follows the low-accuracy solar theory of J. Meeus, *Astronomical
//! Algorithms*, ch. 25: geometric mean longitude and mean anomaly as
//! polynomials in Julian centuries, the equation of the centre, and a
//! combined aberration and nutation correction. The apparent longitude is
//! good to about 0.01°, which places equinoxes and solstices to within a
//! quarter of an hour.

use super::{Ephemeris, check_instant, normalize_degrees};
use crate::error::EphemerisError;
use crate::time_scales::Tt;

/// J2000.0, JD (TT).
const J2000: f64 = 2451545.0;
/// 1900-01-01T00:00 TT.
const COVERAGE_START: f64 = 2415020.5;
/// 2102-01-01T00:00 TT, leaving room for Delta T at the end of 2100.
const COVERAGE_END: f64 = 2488799.5;

/// Low-precision analytic model of the Sun, valid for the 20th and 21st
/// centuries.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LowPrecisionSun;

impl LowPrecisionSun {
    /// Geometric (true) longitude, referred to the mean equinox of date.
    fn true_longitude(t: f64) -> f64 {
        let l0 = 280.46646 + t * (36000.76983 + t * 0.0003032);
        let m = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();
        let c = (1.914602 - t * (0.004817 + t * 0.000014)) * m.sin()
            + (0.019993 - t * 0.000101) * (2.0 * m).sin()
            + 0.000289 * (3.0 * m).sin();
        l0 + c
    }
}

impl Ephemeris for LowPrecisionSun {
    fn solar_longitude(&self, t: Tt) -> Result<f64, EphemerisError> {
        check_instant(t, self.coverage())?;
        let centuries = (t.0 - J2000) / 36525.0;
        let omega = (125.04 - 1934.136 * centuries).to_radians();
        let apparent = Self::true_longitude(centuries) - 0.00569 - 0.00478 * omega.sin();
        Ok(normalize_degrees(apparent))
    }

    fn coverage(&self) -> (Tt, Tt) {
        (Tt(COVERAGE_START), Tt(COVERAGE_END))
    }
}
