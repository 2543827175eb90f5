//! Value <-> track position mapping.
//!
//! Pure functions. The domain is passed in explicitly so the same helpers
//! serve the engine, the gesture tracker and hosts that want to hit-test
//! without holding a control.

/// Length usable for division. Negative or NaN lengths collapse to zero.
fn usable_length(track_length: f64) -> f64 {
    if track_length.is_nan() || track_length <= 0.0 {
        0.0
    } else {
        track_length
    }
}

/// Fraction of the domain covered by `value`, in `[0, 1]` for in-domain values.
///
/// An empty domain maps everything to 0.
pub fn to_normalized(value: f64, minimum: f64, maximum: f64) -> f64 {
    let span = maximum - minimum;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    (value - minimum) / span
}

/// Position of `value` along a track of `track_length`.
pub fn to_position(value: f64, minimum: f64, maximum: f64, track_length: f64) -> f64 {
    to_normalized(value, minimum, maximum) * usable_length(track_length)
}

/// Value at `position` along a track of `track_length`.
///
/// A zero-length track means zero displacement: the result is `minimum`.
pub fn to_value(position: f64, minimum: f64, maximum: f64, track_length: f64) -> f64 {
    let length = usable_length(track_length);
    if length == 0.0 {
        return minimum;
    }
    minimum + (position / length) * (maximum - minimum)
}

/// Fraction of the track covered by `position`.
pub fn position_to_normalized(position: f64, track_length: f64) -> f64 {
    let length = usable_length(track_length);
    if length == 0.0 {
        return 0.0;
    }
    position / length
}
