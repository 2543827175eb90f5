//! Primitive types - Props, callbacks and cleanup.
//!
//! These types define the interface between a range slider and its host.

use std::rc::Rc;

use crate::types::{RangeChangedEvent, RangeLayout, Thumb, VisualState};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by listener registration.
///
/// Call this to unregister the listener.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Layout sync hook. Fires after every selection change and track resize.
///
/// Using Rc<dyn Fn> so hosts can share one closure between several sliders.
pub type LayoutCallback = Rc<dyn Fn(&RangeLayout)>;

/// Visual state request.
pub type VisualStateCallback = Rc<dyn Fn(VisualState)>;

/// Track hit-test toggle. `false` while an out-of-range gesture owns the pointer.
pub type HitTestCallback = Rc<dyn Fn(bool)>;

/// Stacking request: the given handle must sit above the other one.
pub type ThumbRaisedCallback = Rc<dyn Fn(Thumb)>;

/// Change listener, fired once per completed gesture.
pub type RangeChangedCallback = Rc<dyn Fn(&RangeChangedEvent)>;

// =============================================================================
// Range Slider Props
// =============================================================================

/// Properties for the range slider.
///
/// Omitted values keep their defaults and do not count as explicit
/// assignments: an omitted `range_max` follows `maximum` at initialization.
///
/// # Example
///
/// ```ignore
/// use spark_range::primitives::{RangeSlider, RangeSliderProps};
/// use std::rc::Rc;
///
/// let slider = RangeSlider::new(RangeSliderProps {
///     minimum: Some(0.0),
///     maximum: Some(100.0),
///     range_min: Some(20.0),
///     track_length: Some(300.0),
///     on_layout: Some(Rc::new(|layout| {
///         println!("span {}..{}", layout.min_position, layout.max_position);
///     })),
///     ..Default::default()
/// });
/// ```
#[derive(Default, Clone)]
pub struct RangeSliderProps {
    // =========================================================================
    // Values
    // =========================================================================

    /// Lower bound of the domain (default: 0).
    pub minimum: Option<f64>,

    /// Upper bound of the domain (default: 1).
    pub maximum: Option<f64>,

    /// Lower end of the selection (default: follows `minimum`).
    pub range_min: Option<f64>,

    /// Upper end of the selection (default: follows `maximum`).
    pub range_max: Option<f64>,

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Track length in pixels (default: 0 until the host lays out).
    pub track_length: Option<f64>,

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Whether the slider accepts input (default: true).
    pub enabled: Option<bool>,

    // =========================================================================
    // Host Callbacks
    // =========================================================================

    pub on_layout: Option<LayoutCallback>,
    pub on_visual_state: Option<VisualStateCallback>,
    pub on_track_hit_test: Option<HitTestCallback>,
    pub on_thumb_raised: Option<ThumbRaisedCallback>,

    /// Change listener registered at construction. More can be added with
    /// `RangeSlider::on_range_changed`.
    pub on_range_changed: Option<RangeChangedCallback>,
}

impl std::fmt::Debug for RangeSliderProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSliderProps")
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("range_min", &self.range_min)
            .field("range_max", &self.range_max)
            .field("track_length", &self.track_length)
            .field("enabled", &self.enabled)
            .field("on_layout", &self.on_layout.is_some())
            .field("on_visual_state", &self.on_visual_state.is_some())
            .field("on_track_hit_test", &self.on_track_hit_test.is_some())
            .field("on_thumb_raised", &self.on_thumb_raised.is_some())
            .field("on_range_changed", &self.on_range_changed.is_some())
            .finish()
    }
}
