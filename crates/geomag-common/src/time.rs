//! Time handling for geomagnetic model epochs.
//!
//! Geomagnetic models index their coefficients by decimal year
//! (e.g. `2015.5` is the middle of 2015).

use std::fmt;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Convert a decimal year to a UTC datetime.
///
/// The fractional part is spread over the actual length of that year, so leap
/// years are honoured. Returns `None` for non-finite input or years chrono
/// cannot represent.
pub fn decimal_year_to_datetime(year: f64) -> Option<DateTime<Utc>> {
    if !year.is_finite() {
        return None;
    }

    let whole = year.floor();
    if whole < i32::MIN as f64 || whole >= i32::MAX as f64 {
        return None;
    }
    let whole = whole as i32;

    let start = Utc.with_ymd_and_hms(whole, 1, 1, 0, 0, 0).single()?;
    let end = Utc.with_ymd_and_hms(whole + 1, 1, 1, 0, 0, 0).single()?;
    let year_ms = (end - start).num_milliseconds() as f64;
    let offset_ms = ((year - whole as f64) * year_ms).round() as i64;

    Some(start + Duration::milliseconds(offset_ms))
}

/// Inclusive range of epochs covered by a model, in decimal years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Span of a time axis, ignoring NaN entries. `None` if nothing is left.
    pub fn from_times(times: ArrayView1<'_, f64>) -> Option<Self> {
        times
            .iter()
            .copied()
            .filter(|t| !t.is_nan())
            .fold(None, |span: Option<TimeSpan>, t| match span {
                None => Some(TimeSpan::new(t, t)),
                Some(s) => Some(TimeSpan::new(s.start.min(t), s.end.max(t))),
            })
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)?;
        if let (Some(start), Some(end)) = (
            decimal_year_to_datetime(self.start),
            decimal_year_to_datetime(self.end),
        ) {
            write!(
                f,
                " ({:04}-{:02}-{:02} .. {:04}-{:02}-{:02})",
                start.year(),
                start.month(),
                start.day(),
                end.year(),
                end.month(),
                end.day()
            )?;
        }
        Ok(())
    }
}
