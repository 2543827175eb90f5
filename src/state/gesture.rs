//! Gesture Tracker - the range slider's interaction state machine.
//!
//! Turns handle drags and pointer presses on the track into engine updates.
//! The tracker never talks to the host itself: every entry point returns a
//! [`GestureEffects`] describing what the control must forward (layout sync,
//! visual state, hit testing, stacking, change notification).
//!
//! # States
//!
//! ```text
//!            drag_started(Min)              drag_completed(Min)
//!   Idle ───────────────────→ DraggingMin ───────────────────→ Idle
//!   Idle ───────────────────→ DraggingMax ───────────────────→ Idle
//!
//!        press below RangeMin                release / exit
//!   Idle ───────────────────→ PointerManipulatingMin ───────→ Idle
//!        press above RangeMax                release / exit
//!   Idle ───────────────────→ PointerManipulatingMax ───────→ Idle
//! ```
//!
//! A gesture only starts from `Idle`. Events that do not belong to the active
//! gesture are ignored.

use log::{debug, trace};

use crate::engine::{position, RangeChange, RangeConstraints};
use crate::types::{RangeChangedEvent, Thumb, VisualState};

// =============================================================================
// STATE
// =============================================================================

/// Active interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// The min handle was grabbed directly.
    DraggingMin,
    /// The max handle was grabbed directly.
    DraggingMax,
    /// A press below the selection is moving the min handle.
    PointerManipulatingMin,
    /// A press above the selection is moving the max handle.
    PointerManipulatingMax,
}

impl GestureState {
    /// Handle moved by this gesture, if any.
    pub fn thumb(self) -> Option<Thumb> {
        match self {
            Self::Idle => None,
            Self::DraggingMin | Self::PointerManipulatingMin => Some(Thumb::Min),
            Self::DraggingMax | Self::PointerManipulatingMax => Some(Thumb::Max),
        }
    }

    pub fn is_dragging(self) -> bool {
        matches!(self, Self::DraggingMin | Self::DraggingMax)
    }

    pub fn is_pointer_manipulating(self) -> bool {
        matches!(self, Self::PointerManipulatingMin | Self::PointerManipulatingMax)
    }

    fn dragging(thumb: Thumb) -> Self {
        match thumb {
            Thumb::Min => Self::DraggingMin,
            Thumb::Max => Self::DraggingMax,
        }
    }

    fn pointer_manipulating(thumb: Thumb) -> Self {
        match thumb {
            Thumb::Min => Self::PointerManipulatingMin,
            Thumb::Max => Self::PointerManipulatingMax,
        }
    }
}

// =============================================================================
// EFFECTS
// =============================================================================

/// What a single input event asks the control to do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureEffects {
    /// Fields the engine changed.
    pub change: RangeChange,
    /// Handle to raise above the other one.
    pub raised: Option<Thumb>,
    /// Visual state to request.
    pub visual_state: Option<VisualState>,
    /// New hit-test state for the track container.
    pub track_hit_test: Option<bool>,
    /// Change notification closing the gesture.
    pub notification: Option<RangeChangedEvent>,
}

impl GestureEffects {
    fn changed(change: RangeChange) -> Self {
        Self {
            change,
            ..Default::default()
        }
    }

    /// True if the event was ignored.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// DRAG HELPER
// =============================================================================

/// Move `thumb` to `target` (a track position), clamped so it never passes
/// the other handle or leaves the track.
pub fn drag_thumb_to(
    engine: &mut RangeConstraints,
    track_length: f64,
    thumb: Thumb,
    target: f64,
) -> RangeChange {
    // No usable track or no finite span: the handle has nowhere to go.
    let span = engine.maximum() - engine.minimum();
    if target.is_nan() || !(track_length > 0.0) || !span.is_finite() {
        return RangeChange::empty();
    }
    let length = track_length;

    match thumb {
        Thumb::Min => {
            let limit = engine.to_position(engine.range_max(), length);
            let clamped = target.min(limit).max(0.0);
            // Round-trip error must not push RangeMax.
            let value = engine.to_value(clamped, length).min(engine.range_max());
            engine.set_range_min(value)
        }
        Thumb::Max => {
            let limit = engine.to_position(engine.range_min(), length);
            let clamped = target.max(limit).min(length);
            let value = engine.to_value(clamped, length).max(engine.range_min());
            engine.set_range_max(value)
        }
    }
}

fn value_of(engine: &RangeConstraints, thumb: Thumb) -> f64 {
    match thumb {
        Thumb::Min => engine.range_min(),
        Thumb::Max => engine.range_max(),
    }
}

// =============================================================================
// TRACKER
// =============================================================================

/// Interaction state for one control.
#[derive(Debug, Default)]
pub struct GestureTracker {
    state: GestureState,
    /// Value of the moved endpoint when the gesture started.
    snapshot: f64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    // -------------------------------------------------------------------------
    // Handle drags
    // -------------------------------------------------------------------------

    /// A handle was grabbed.
    pub fn drag_started(&mut self, engine: &RangeConstraints, thumb: Thumb) -> GestureEffects {
        if !self.is_idle() {
            return GestureEffects::default();
        }
        self.state = GestureState::dragging(thumb);
        self.snapshot = value_of(engine, thumb);
        debug!("drag started on {:?} at {}", thumb, self.snapshot);

        GestureEffects {
            raised: Some(thumb),
            visual_state: Some(VisualState::pressed(thumb)),
            ..Default::default()
        }
    }

    /// The grabbed handle moved by `delta` along the track.
    pub fn drag_delta(
        &mut self,
        engine: &mut RangeConstraints,
        track_length: f64,
        thumb: Thumb,
        delta: f64,
    ) -> GestureEffects {
        if self.state != GestureState::dragging(thumb) {
            return GestureEffects::default();
        }
        let current = engine.to_position(value_of(engine, thumb), track_length);
        let change = drag_thumb_to(engine, track_length, thumb, current + delta);
        trace!("drag {:?} by {} -> {:?}", thumb, delta, change);
        GestureEffects::changed(change)
    }

    /// The grabbed handle was released.
    pub fn drag_completed(&mut self, engine: &RangeConstraints, thumb: Thumb) -> GestureEffects {
        if self.state != GestureState::dragging(thumb) {
            return GestureEffects::default();
        }
        let notification = self.finish(engine, thumb);
        debug!("drag completed on {:?}: {:?}", thumb, notification);

        GestureEffects {
            visual_state: Some(VisualState::Normal),
            notification: Some(notification),
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Out-of-range pointer gestures
    // -------------------------------------------------------------------------

    /// Pointer pressed on the track at `x`.
    ///
    /// Presses inside the selection are left to the host.
    pub fn pointer_pressed(
        &mut self,
        engine: &mut RangeConstraints,
        track_length: f64,
        x: f64,
    ) -> GestureEffects {
        if !self.is_idle() || x.is_nan() || !(track_length > 0.0) {
            return GestureEffects::default();
        }
        let p = position::position_to_normalized(x, track_length);

        let thumb = if p < engine.to_normalized(engine.range_min()) {
            Thumb::Min
        } else if p > engine.to_normalized(engine.range_max()) {
            Thumb::Max
        } else {
            return GestureEffects::default();
        };

        self.state = GestureState::pointer_manipulating(thumb);
        self.snapshot = value_of(engine, thumb);
        debug!("out-of-range press at {} moves {:?}", p, thumb);

        let change = drag_thumb_to(engine, track_length, thumb, x);
        GestureEffects {
            change,
            track_hit_test: Some(false),
            ..Default::default()
        }
    }

    /// Pointer moved to `x` while a press is active.
    pub fn pointer_moved(
        &mut self,
        engine: &mut RangeConstraints,
        track_length: f64,
        x: f64,
    ) -> GestureEffects {
        if !self.state.is_pointer_manipulating() || x.is_nan() {
            return GestureEffects::default();
        }
        let p = position::position_to_normalized(x, track_length);

        let allowed = match self.state {
            GestureState::PointerManipulatingMin => p < engine.to_normalized(engine.range_max()),
            GestureState::PointerManipulatingMax => p > engine.to_normalized(engine.range_min()),
            _ => false,
        };
        let Some(thumb) = self.state.thumb() else {
            return GestureEffects::default();
        };
        if !allowed {
            trace!("pointer move to {} crosses the other handle, ignored", p);
            return GestureEffects::default();
        }

        GestureEffects::changed(drag_thumb_to(engine, track_length, thumb, x))
    }

    /// Pointer released after an out-of-range press.
    pub fn pointer_released(&mut self, engine: &RangeConstraints) -> GestureEffects {
        self.end_pointer_gesture(engine)
    }

    /// Pointer left the control during an out-of-range press.
    pub fn pointer_exited(&mut self, engine: &RangeConstraints) -> GestureEffects {
        self.end_pointer_gesture(engine)
    }

    fn end_pointer_gesture(&mut self, engine: &RangeConstraints) -> GestureEffects {
        let Some(thumb) = self.state.thumb().filter(|_| self.state.is_pointer_manipulating())
        else {
            return GestureEffects::default();
        };
        let notification = self.finish(engine, thumb);
        debug!("out-of-range gesture ended: {:?}", notification);

        GestureEffects {
            track_hit_test: Some(true),
            notification: Some(notification),
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Cancellation
    // -------------------------------------------------------------------------

    /// End whatever gesture is active as if it completed normally.
    pub fn cancel(&mut self, engine: &RangeConstraints) -> GestureEffects {
        match self.state {
            GestureState::Idle => GestureEffects::default(),
            GestureState::DraggingMin => self.drag_completed(engine, Thumb::Min),
            GestureState::DraggingMax => self.drag_completed(engine, Thumb::Max),
            GestureState::PointerManipulatingMin | GestureState::PointerManipulatingMax => {
                self.end_pointer_gesture(engine)
            }
        }
    }

    fn finish(&mut self, engine: &RangeConstraints, thumb: Thumb) -> RangeChangedEvent {
        self.state = GestureState::Idle;
        RangeChangedEvent {
            old_value: self.snapshot,
            new_value: value_of(engine, thumb),
            endpoint: thumb.endpoint(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
