//! Range Constraint Engine - four values, one invariant.
//!
//! Owns `Minimum`, `Maximum`, `RangeMin` and `RangeMax` and keeps
//! `Minimum <= RangeMin <= RangeMax <= Maximum` after every mutation.
//!
//! # Lifecycle
//!
//! - Before [`RangeConstraints::normalize`] the setters only record values,
//!   so callers may assign properties in any order.
//! - `normalize` resolves the initial state once.
//! - After that every setter cascades: the invariant is restored by adjusting
//!   the *other* fields, never by rejecting the call.
//!
//! # Termination
//!
//! Forced adjustments are plain field writes inside the setter that caused
//! them. No setter calls another setter, so a cascade is a single hop.
//!
//! # Observability
//!
//! The whole quadruple is published through one `Signal<RangeValues>` after a
//! setter has finished, so effects never observe a half-applied cascade.

use log::trace;
use spark_signals::{signal, Signal};

use super::position;
use crate::types::{DEFAULT_MAXIMUM, DEFAULT_MINIMUM, DOMAIN_EPSILON};

// =============================================================================
// CHANGE SET
// =============================================================================

bitflags::bitflags! {
    /// Fields touched by a single setter call.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RangeChange: u8 {
        const MINIMUM = 1 << 0;
        const MAXIMUM = 1 << 1;
        const RANGE_MIN = 1 << 2;
        const RANGE_MAX = 1 << 3;

        const DOMAIN = Self::MINIMUM.bits() | Self::MAXIMUM.bits();
        const SELECTION = Self::RANGE_MIN.bits() | Self::RANGE_MAX.bits();
    }
}

impl RangeChange {
    /// True if handle positions need to be re-synced.
    pub fn needs_layout(self) -> bool {
        self.intersects(Self::SELECTION)
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// Snapshot of the four values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValues {
    pub minimum: f64,
    pub maximum: f64,
    pub range_min: f64,
    pub range_max: f64,
}

impl Default for RangeValues {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM,
            maximum: DEFAULT_MAXIMUM,
            range_min: DEFAULT_MINIMUM,
            range_max: DEFAULT_MAXIMUM,
        }
    }
}

impl RangeValues {
    /// `Minimum <= RangeMin <= RangeMax <= Maximum`.
    pub fn is_ordered(&self) -> bool {
        self.minimum <= self.range_min
            && self.range_min <= self.range_max
            && self.range_max <= self.maximum
    }

    fn diff(&self, other: &RangeValues) -> RangeChange {
        let mut change = RangeChange::empty();
        if self.minimum != other.minimum {
            change |= RangeChange::MINIMUM;
        }
        if self.maximum != other.maximum {
            change |= RangeChange::MAXIMUM;
        }
        if self.range_min != other.range_min {
            change |= RangeChange::RANGE_MIN;
        }
        if self.range_max != other.range_max {
            change |= RangeChange::RANGE_MAX;
        }
        change
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// The constraint engine.
pub struct RangeConstraints {
    values: RangeValues,
    min_explicitly_set: bool,
    max_explicitly_set: bool,
    assigned: bool,
    published: Signal<RangeValues>,
}

impl Default for RangeConstraints {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeConstraints {
    /// Create an engine holding the default values, not yet normalized.
    pub fn new() -> Self {
        let values = RangeValues::default();
        Self {
            values,
            min_explicitly_set: false,
            max_explicitly_set: false,
            assigned: false,
            published: signal(values),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn values(&self) -> RangeValues {
        self.values
    }

    pub fn minimum(&self) -> f64 {
        self.values.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.values.maximum
    }

    pub fn range_min(&self) -> f64 {
        self.values.range_min
    }

    pub fn range_max(&self) -> f64 {
        self.values.range_max
    }

    /// Signal carrying the last committed snapshot.
    pub fn signal(&self) -> Signal<RangeValues> {
        self.published.clone()
    }

    /// True once `normalize` has run.
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    pub fn min_explicitly_set(&self) -> bool {
        self.min_explicitly_set
    }

    pub fn max_explicitly_set(&self) -> bool {
        self.max_explicitly_set
    }

    // -------------------------------------------------------------------------
    // Mapping
    // -------------------------------------------------------------------------

    /// Position of `value` on a track of `track_length`.
    pub fn to_position(&self, value: f64, track_length: f64) -> f64 {
        position::to_position(value, self.values.minimum, self.values.maximum, track_length)
    }

    /// Value at `position` on a track of `track_length`.
    pub fn to_value(&self, position: f64, track_length: f64) -> f64 {
        position::to_value(position, self.values.minimum, self.values.maximum, track_length)
    }

    /// Normalized position of `value` within the domain.
    pub fn to_normalized(&self, value: f64) -> f64 {
        position::to_normalized(value, self.values.minimum, self.values.maximum)
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    /// Resolve the initial consistent state. Runs once; later calls do nothing.
    pub fn normalize(&mut self) -> RangeChange {
        if self.assigned {
            return RangeChange::empty();
        }
        let before = self.values;
        let v = &mut self.values;

        if v.minimum > v.maximum {
            v.minimum = v.maximum;
        }
        if v.minimum == v.maximum {
            v.maximum += DOMAIN_EPSILON;
        }

        if !self.max_explicitly_set {
            v.range_max = v.maximum;
        }
        if !self.min_explicitly_set {
            v.range_min = v.minimum;
        }

        v.range_min = clamp_into(v.range_min, v.minimum, v.maximum);
        v.range_max = clamp_into(v.range_max, v.minimum, v.maximum);

        if v.range_max < v.range_min {
            v.range_min = v.range_max;
        }

        self.assigned = true;
        trace!("range normalized: {:?}", self.values);
        self.commit(before)
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    pub fn set_minimum(&mut self, value: f64) -> RangeChange {
        if value.is_nan() {
            return RangeChange::empty();
        }
        let before = self.values;
        let v = &mut self.values;
        v.minimum = value;

        if self.assigned {
            if v.range_min < value {
                v.range_min = value;
            }
            if v.range_max < value {
                v.range_max = value;
            }
            if v.maximum < value {
                v.maximum = value;
            }
        }
        self.commit(before)
    }

    pub fn set_maximum(&mut self, value: f64) -> RangeChange {
        if value.is_nan() {
            return RangeChange::empty();
        }
        let before = self.values;
        let v = &mut self.values;
        v.maximum = value;

        if self.assigned {
            if v.range_max > value {
                v.range_max = value;
            }
            if v.range_min > value {
                v.range_min = value;
            }
            if v.minimum > value {
                v.minimum = value;
            }
        }
        self.commit(before)
    }

    pub fn set_range_min(&mut self, value: f64) -> RangeChange {
        if value.is_nan() {
            return RangeChange::empty();
        }
        self.min_explicitly_set = true;
        let before = self.values;
        let v = &mut self.values;

        if !self.assigned {
            v.range_min = value;
            return self.commit(before);
        }

        let value = clamp_into(value, v.minimum, v.maximum);
        v.range_min = value;
        if value > v.range_max {
            v.range_max = value;
        }
        self.commit(before)
    }

    pub fn set_range_max(&mut self, value: f64) -> RangeChange {
        if value.is_nan() {
            return RangeChange::empty();
        }
        self.max_explicitly_set = true;
        let before = self.values;
        let v = &mut self.values;

        if !self.assigned {
            v.range_max = value;
            return self.commit(before);
        }

        let value = clamp_into(value, v.minimum, v.maximum);
        v.range_max = value;
        if value < v.range_min {
            v.range_min = value;
        }
        self.commit(before)
    }

    fn commit(&mut self, before: RangeValues) -> RangeChange {
        let change = before.diff(&self.values);
        if !change.is_empty() {
            trace!("range {:?}: {:?} -> {:?}", change, before, self.values);
            self.published.set(self.values);
        }
        change
    }
}

/// Clamp without panicking on an inverted interval; the lower bound wins.
fn clamp_into(value: f64, lower: f64, upper: f64) -> f64 {
    value.min(upper).max(lower)
}

// =============================================================================
// TESTS
// =============================================================================
