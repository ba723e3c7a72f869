//! Discrete event search.
//!
//! Finds the instants at which a piecewise-constant function of time changes
//! value: the range is sampled at the function's own step, and every pair of
//! neighbouring samples that disagree is narrowed down by bisection.

use tracing::{debug, trace};

use crate::error::{EphemerisError, SabbatError};
use crate::time_scales::Tt;

/// Search results are refined to this precision, in days (one second).
pub const EPSILON_DAYS: f64 = 1.0 / 86400.0;

/// A function of time taking finitely many discrete values.
pub trait StepFunction {
    /// Sampling interval. Must be shorter than the shortest time the
    /// function stays at any one value, or changes may be missed.
    fn step_days(&self) -> f64;

    /// The function's value at `t`.
    fn value_at(&self, t: Tt) -> Result<u8, EphemerisError>;
}

/// A change of value found by [`find_discrete`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transition {
    /// First instant (to within [`EPSILON_DAYS`]) at which the new value
    /// holds.
    pub instant: Tt,
    /// The value from `instant` on.
    pub value: u8,
}

/// Finds every change of value of `f` within `start..=end`, in increasing
/// time order.
///
/// Any failure to evaluate `f` aborts the search.
///
/// # Example
///
/// ```
/// use sabbats::ephemeris::{LowPrecisionSun, SeasonIndicator};
/// use sabbats::search::find_discrete;
/// use sabbats::time_scales::Tt;
///
/// // the year 2024, roughly
/// let seasons = SeasonIndicator::new(LowPrecisionSun);
/// let found = find_discrete(Tt(2460310.5), Tt(2460676.5), &seasons).unwrap();
/// let values: Vec<_> = found.iter().map(|tr| tr.value).collect();
/// assert_eq!(vec![0, 1, 2, 3], values);
/// ```
pub fn find_discrete<F: StepFunction + ?Sized>(
    start: Tt,
    end: Tt,
    f: &F,
) -> Result<Vec<Transition>, SabbatError> {
    let step = f.step_days();
    if !start.0.is_finite() || !end.0.is_finite() || start >= end || !(step > 0.0) {
        return Err(SabbatError::InvalidWindow {
            start: start.0,
            end: end.0,
        });
    }
    let eval = |t: Tt| {
        f.value_at(t)
            .map_err(|source| SabbatError::Computation { jd: t.0, source })
    };

    let n = ((end.0 - start.0) / step).ceil().max(1.0) as usize;
    let span = end.0 - start.0;
    let at = |i: usize| {
        if i == n {
            end
        } else {
            Tt(start.0 + span * i as f64 / n as f64)
        }
    };

    let mut found = Vec::new();
    let mut lo = start;
    let mut lo_value = eval(lo)?;
    for i in 1..=n {
        let hi = at(i);
        let hi_value = eval(hi)?;
        if hi_value != lo_value {
            let tr = bisect(lo, lo_value, hi, hi_value, &eval)?;
            debug!(jd = tr.instant.0, value = tr.value, "found transition");
            found.push(tr);
        }
        lo = hi;
        lo_value = hi_value;
    }
    trace!(samples = n + 1, transitions = found.len(), "search complete");
    Ok(found)
}

/// Narrows `lo..hi`, across which the value changes, down to the first
/// change.
fn bisect<G>(
    mut lo: Tt,
    lo_value: u8,
    mut hi: Tt,
    mut hi_value: u8,
    eval: &G,
) -> Result<Transition, SabbatError>
where
    G: Fn(Tt) -> Result<u8, SabbatError>,
{
    while hi.0 - lo.0 > EPSILON_DAYS {
        let mid = Tt(lo.0 + (hi.0 - lo.0) / 2.0);
        let mid_value = eval(mid)?;
        if mid_value == lo_value {
            lo = mid;
        } else {
            hi = mid;
            hi_value = mid_value;
        }
    }
    Ok(Transition {
        instant: hi,
        value: hi_value,
    })
}
