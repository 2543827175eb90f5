//! Core types shared by the range engine, the gesture tracker and the control.
//!
//! Everything here is plain data: no signals, no callbacks.

use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Amount added to `Maximum` when initialization finds an empty domain.
pub const DOMAIN_EPSILON: f64 = 0.01;

/// Default lower bound of the domain.
pub const DEFAULT_MINIMUM: f64 = 0.0;

/// Default upper bound of the domain.
pub const DEFAULT_MAXIMUM: f64 = 1.0;

// =============================================================================
// Thumb / Endpoint
// =============================================================================

/// One of the two draggable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumb {
    /// Handle bound to `RangeMin`.
    Min,
    /// Handle bound to `RangeMax`.
    Max,
}

impl Thumb {
    /// The endpoint tag reported in change notifications for this handle.
    pub fn endpoint(self) -> RangeEndpoint {
        match self {
            Self::Min => RangeEndpoint::MinimumValue,
            Self::Max => RangeEndpoint::MaximumValue,
        }
    }
}

/// Which end of the selection a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeEndpoint {
    MinimumValue,
    MaximumValue,
}

impl fmt::Display for RangeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumValue => write!(f, "MinimumValue"),
            Self::MaximumValue => write!(f, "MaximumValue"),
        }
    }
}

// =============================================================================
// Change Notification
// =============================================================================

/// Payload of the change event fired at the end of every gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeChangedEvent {
    /// Value of the endpoint when the gesture started.
    pub old_value: f64,
    /// Value of the endpoint when the gesture ended.
    pub new_value: f64,
    /// Which endpoint the gesture moved.
    pub endpoint: RangeEndpoint,
}

impl RangeChangedEvent {
    /// True if the gesture actually moved the endpoint.
    pub fn is_change(&self) -> bool {
        self.old_value != self.new_value
    }
}

// =============================================================================
// Visual State
// =============================================================================

/// Visual states the control asks its host template to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    #[default]
    Normal,
    MinPressed,
    MaxPressed,
    Disabled,
}

impl VisualState {
    /// Name of the state as a template would spell it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::MinPressed => "MinPressed",
            Self::MaxPressed => "MaxPressed",
            Self::Disabled => "Disabled",
        }
    }

    /// Pressed state for a handle drag session.
    pub fn pressed(thumb: Thumb) -> Self {
        match thumb {
            Thumb::Min => Self::MinPressed,
            Thumb::Max => Self::MaxPressed,
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Pixel geometry handed to the host on every layout sync.
///
/// All positions are offsets along the track, in the same units as the
/// track length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeLayout {
    /// Total track length.
    pub track_length: f64,
    /// Position of the min handle.
    pub min_position: f64,
    /// Position of the max handle.
    pub max_position: f64,
}

impl RangeLayout {
    /// Start of the element spanning the selected range.
    pub fn span_start(&self) -> f64 {
        self.min_position
    }

    /// Length of the element spanning the selected range.
    pub fn span_length(&self) -> f64 {
        (self.max_position - self.min_position).max(0.0)
    }
}
