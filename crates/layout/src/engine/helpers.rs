// SPDX-License-Identifier: MIT

//!
//! Helper functions
//!

use chrono::Duration;

/// Longer than any representable window (20,000 years).  Conversions from
/// pixels are clamped to this so they stay in range.
const MAX_SPAN_MILLISECONDS: f64 = 20_000.0 * 366.0 * 86_400_000.0;

/// A duration in (fractional) seconds, at millisecond resolution
pub(crate) fn duration_as_seconds(span: Duration) -> f64 {
    span.num_milliseconds() as f64 / 1000.0
}

/// (Fractional) seconds as a duration, rounded to the nearest millisecond
pub(crate) fn seconds_as_duration(seconds: f64) -> Duration {
    let milliseconds = (seconds * 1000.0).round();
    if milliseconds.is_nan() {
        return Duration::zero();
    }
    let milliseconds = milliseconds.clamp(-MAX_SPAN_MILLISECONDS, MAX_SPAN_MILLISECONDS);
    Duration::milliseconds(milliseconds as i64)
}
