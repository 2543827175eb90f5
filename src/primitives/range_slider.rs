//! Range Slider - dual-handle range selection control.
//!
//! Composes the [`RangeConstraints`] engine with the [`GestureTracker`] and
//! forwards everything they decide to the host through the callbacks in
//! [`RangeSliderProps`].
//!
//! # Host contract
//!
//! The host owns drawing and input routing. It calls into the slider:
//!
//! - `set_track_length` when the track is resized
//! - `drag_started` / `drag_delta` / `drag_completed` for handle drags
//! - `pointer_pressed` / `pointer_moved` / `pointer_released` /
//!   `pointer_exited` for presses on the track itself
//!
//! and the slider calls back:
//!
//! - `on_layout` after every selection change (including each drag delta)
//! - `on_visual_state`, `on_track_hit_test`, `on_thumb_raised`
//! - range changed listeners, once per completed gesture
//!
//! Callbacks run synchronously inside the call that caused them and must not
//! call back into the same slider.
//!
//! # Example
//!
//! ```ignore
//! use spark_range::primitives::{RangeSlider, RangeSliderProps};
//! use spark_range::Thumb;
//!
//! let mut slider = RangeSlider::new(RangeSliderProps {
//!     maximum: Some(10.0),
//!     track_length: Some(200.0),
//!     ..Default::default()
//! });
//!
//! let cleanup = slider.on_range_changed(|event| {
//!     println!("{}: {} -> {}", event.endpoint, event.old_value, event.new_value);
//! });
//!
//! slider.drag_started(Thumb::Max);
//! slider.drag_delta(Thumb::Max, -40.0);
//! slider.drag_completed(Thumb::Max); // prints "MaximumValue: 10 -> 8"
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use spark_signals::Signal;

use super::types::{
    Cleanup, HitTestCallback, LayoutCallback, RangeChangedCallback, RangeSliderProps,
    ThumbRaisedCallback, VisualStateCallback,
};
use crate::engine::{RangeChange, RangeConstraints, RangeValues};
use crate::state::gesture::{GestureEffects, GestureState, GestureTracker};
use crate::types::{RangeChangedEvent, RangeLayout, Thumb, VisualState};

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

#[derive(Default)]
struct ListenerRegistry {
    listeners: Vec<(usize, RangeChangedCallback)>,
    next_id: usize,
}

impl ListenerRegistry {
    fn add(&mut self, listener: RangeChangedCallback) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: usize) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

fn sanitize_length(length: f64) -> f64 {
    if length.is_nan() || length < 0.0 {
        0.0
    } else {
        length
    }
}

// =============================================================================
// RANGE SLIDER
// =============================================================================

pub struct RangeSlider {
    engine: RangeConstraints,
    gestures: GestureTracker,
    track_length: f64,
    enabled: bool,
    visual_state: VisualState,
    track_hit_test: bool,
    top_thumb: Thumb,

    on_layout: Option<LayoutCallback>,
    on_visual_state: Option<VisualStateCallback>,
    on_track_hit_test: Option<HitTestCallback>,
    on_thumb_raised: Option<ThumbRaisedCallback>,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl Default for RangeSlider {
    fn default() -> Self {
        Self::new(RangeSliderProps::default())
    }
}

impl RangeSlider {
    /// Create a slider, resolve its initial values and sync the host once.
    pub fn new(props: RangeSliderProps) -> Self {
        let mut engine = RangeConstraints::new();
        if let Some(v) = props.minimum {
            engine.set_minimum(v);
        }
        if let Some(v) = props.maximum {
            engine.set_maximum(v);
        }
        if let Some(v) = props.range_min {
            engine.set_range_min(v);
        }
        if let Some(v) = props.range_max {
            engine.set_range_max(v);
        }
        engine.normalize();

        let mut listeners = ListenerRegistry::default();
        if let Some(listener) = props.on_range_changed {
            listeners.add(listener);
        }

        let enabled = props.enabled.unwrap_or(true);
        let mut slider = Self {
            engine,
            gestures: GestureTracker::new(),
            track_length: sanitize_length(props.track_length.unwrap_or(0.0)),
            enabled,
            visual_state: VisualState::Normal,
            track_hit_test: true,
            top_thumb: Thumb::Max,
            on_layout: props.on_layout,
            on_visual_state: props.on_visual_state,
            on_track_hit_test: props.on_track_hit_test,
            on_thumb_raised: props.on_thumb_raised,
            listeners: Rc::new(RefCell::new(listeners)),
        };

        slider.request_visual_state(if enabled {
            VisualState::Normal
        } else {
            VisualState::Disabled
        });
        slider.sync_layout();
        slider
    }

    // =========================================================================
    // Values
    // =========================================================================

    pub fn minimum(&self) -> f64 {
        self.engine.minimum()
    }

    pub fn maximum(&self) -> f64 {
        self.engine.maximum()
    }

    pub fn range_min(&self) -> f64 {
        self.engine.range_min()
    }

    pub fn range_max(&self) -> f64 {
        self.engine.range_max()
    }

    pub fn values(&self) -> RangeValues {
        self.engine.values()
    }

    /// Reactive view of the four values, updated once per setter.
    pub fn values_signal(&self) -> Signal<RangeValues> {
        self.engine.signal()
    }

    pub fn set_minimum(&mut self, value: f64) -> RangeChange {
        let change = self.engine.set_minimum(value);
        self.apply_change(change)
    }

    pub fn set_maximum(&mut self, value: f64) -> RangeChange {
        let change = self.engine.set_maximum(value);
        self.apply_change(change)
    }

    pub fn set_range_min(&mut self, value: f64) -> RangeChange {
        let change = self.engine.set_range_min(value);
        self.apply_change(change)
    }

    pub fn set_range_max(&mut self, value: f64) -> RangeChange {
        let change = self.engine.set_range_max(value);
        self.apply_change(change)
    }

    fn apply_change(&mut self, change: RangeChange) -> RangeChange {
        if change.needs_layout() {
            self.sync_layout();
        }
        change
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn track_length(&self) -> f64 {
        self.track_length
    }

    /// The host resized the track.
    pub fn set_track_length(&mut self, length: f64) {
        let length = sanitize_length(length);
        if length == self.track_length {
            return;
        }
        self.track_length = length;
        self.sync_layout();
    }

    /// Position of `value` on the track.
    pub fn to_position(&self, value: f64) -> f64 {
        self.engine.to_position(value, self.track_length)
    }

    /// Value at `position` on the track.
    pub fn to_value(&self, position: f64) -> f64 {
        self.engine.to_value(position, self.track_length)
    }

    /// Current handle geometry.
    pub fn layout(&self) -> RangeLayout {
        RangeLayout {
            track_length: self.track_length,
            min_position: self.to_position(self.engine.range_min()),
            max_position: self.to_position(self.engine.range_max()),
        }
    }

    fn sync_layout(&self) {
        if let Some(on_layout) = &self.on_layout {
            on_layout(&self.layout());
        }
    }

    // =========================================================================
    // Host-facing state
    // =========================================================================

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn visual_state(&self) -> VisualState {
        self.visual_state
    }

    /// False while an out-of-range gesture has taken the pointer from the track.
    pub fn is_track_hit_testable(&self) -> bool {
        self.track_hit_test
    }

    /// Handle currently stacked on top.
    pub fn top_thumb(&self) -> Thumb {
        self.top_thumb
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gestures.state()
    }

    /// Enable or disable input. Disabling ends any active gesture.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        debug!("range slider {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;

        if enabled {
            self.request_visual_state(VisualState::Normal);
        } else {
            let effects = self.gestures.cancel(&self.engine);
            self.apply(effects);
            self.request_visual_state(VisualState::Disabled);
        }
    }

    fn request_visual_state(&mut self, state: VisualState) {
        self.visual_state = state;
        if let Some(on_visual_state) = &self.on_visual_state {
            on_visual_state(state);
        }
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a range changed listener. Returns cleanup function.
    pub fn on_range_changed<F>(&mut self, listener: F) -> Cleanup
    where
        F: Fn(&RangeChangedEvent) + 'static,
    {
        let id = self.listeners.borrow_mut().add(Rc::new(listener));
        let registry = Rc::downgrade(&self.listeners);

        Box::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().remove(id);
            }
        })
    }

    fn notify(&self, event: &RangeChangedEvent) {
        // Snapshot so listeners may unregister themselves while running.
        let listeners: Vec<RangeChangedCallback> = self
            .listeners
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(event);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// A handle was grabbed.
    pub fn drag_started(&mut self, thumb: Thumb) {
        if !self.enabled {
            return;
        }
        let effects = self.gestures.drag_started(&self.engine, thumb);
        self.apply(effects);
    }

    /// The grabbed handle moved by `delta` pixels along the track.
    pub fn drag_delta(&mut self, thumb: Thumb, delta: f64) {
        if !self.enabled {
            return;
        }
        let effects = self
            .gestures
            .drag_delta(&mut self.engine, self.track_length, thumb, delta);
        self.apply(effects);
    }

    /// The grabbed handle was released.
    pub fn drag_completed(&mut self, thumb: Thumb) {
        if !self.enabled {
            return;
        }
        let effects = self.gestures.drag_completed(&self.engine, thumb);
        self.apply(effects);
    }

    /// Pointer pressed on the track at `x`.
    pub fn pointer_pressed(&mut self, x: f64) {
        if !self.enabled {
            return;
        }
        let effects = self
            .gestures
            .pointer_pressed(&mut self.engine, self.track_length, x);
        self.apply(effects);
    }

    /// Pointer moved to `x`.
    pub fn pointer_moved(&mut self, x: f64) {
        if !self.enabled {
            return;
        }
        let effects = self
            .gestures
            .pointer_moved(&mut self.engine, self.track_length, x);
        self.apply(effects);
    }

    /// Pointer released.
    pub fn pointer_released(&mut self, _x: f64) {
        if !self.enabled {
            return;
        }
        let effects = self.gestures.pointer_released(&self.engine);
        self.apply(effects);
    }

    /// Pointer left the control.
    pub fn pointer_exited(&mut self) {
        if !self.enabled {
            return;
        }
        let effects = self.gestures.pointer_exited(&self.engine);
        self.apply(effects);
    }

    fn apply(&mut self, effects: GestureEffects) {
        if effects.change.needs_layout() {
            self.sync_layout();
        }

        if let Some(thumb) = effects.raised {
            self.top_thumb = thumb;
            if let Some(on_thumb_raised) = &self.on_thumb_raised {
                on_thumb_raised(thumb);
            }
        }

        if let Some(state) = effects.visual_state {
            // A disabled slider stays Disabled while its last gesture unwinds.
            if self.enabled {
                self.request_visual_state(state);
            }
        }

        if let Some(hit_test) = effects.track_hit_test {
            self.track_hit_test = hit_test;
            if let Some(on_track_hit_test) = &self.on_track_hit_test {
                on_track_hit_test(hit_test);
            }
        }

        if let Some(event) = effects.notification {
            self.notify(&event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
