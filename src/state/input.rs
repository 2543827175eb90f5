//! Input Module - crossterm bridge for a range slider drawn in a terminal.
//!
//! A terminal slider is one row of cells. Column `column` is position 0 and
//! column `column + width - 1` is the end of the track, so the track length
//! is `width - 1` cells. This module maps crossterm mouse events onto the
//! slider's gesture entry points.
//!
//! # API
//!
//! - `TerminalTrack` - Screen rectangle of the track
//! - `TrackBridge::route_mouse` - Feed one crossterm mouse event to a slider
//! - `poll_event` / `read_event` - Event polling
//! - `enable_mouse` / `disable_mouse` - Control mouse capture
//!
//! # Example
//!
//! ```ignore
//! use spark_range::state::input::{poll_event, InputEvent, TerminalTrack, TrackBridge};
//! use std::time::Duration;
//!
//! let mut bridge = TrackBridge::new(TerminalTrack { column: 2, row: 1, width: 41 });
//! slider.set_track_length(bridge.track().track_length());
//!
//! loop {
//!     if let Ok(Some(InputEvent::Mouse(mouse))) = poll_event(Duration::from_millis(16)) {
//!         bridge.route_mouse(&mut slider, mouse);
//!     }
//! }
//! ```

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
    KeyEvent as CrosstermKeyEvent, MouseButton, MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use log::trace;
use std::io::stdout;
use std::time::Duration;

use crate::primitives::RangeSlider;
use crate::types::Thumb;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Events a terminal host cares about.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Mouse(CrosstermMouseEvent),
    Key(CrosstermKeyEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// TRACK GEOMETRY
// =============================================================================

/// Screen rectangle of a one-row track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalTrack {
    /// First column of the track.
    pub column: u16,
    pub row: u16,
    /// Number of cells.
    pub width: u16,
}

impl TerminalTrack {
    /// Track length in cells, as handed to `RangeSlider::set_track_length`.
    pub fn track_length(&self) -> f64 {
        f64::from(self.width.saturating_sub(1))
    }

    /// True if the cell lies on the track row within its width.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row && column >= self.column && column - self.column < self.width
    }

    /// Position of a screen column along the track. Columns left of the
    /// track give negative positions.
    pub fn position_of(&self, column: u16) -> f64 {
        f64::from(column) - f64::from(self.column)
    }

    /// Screen column of a track position, rounded to the nearest cell.
    pub fn column_of(&self, position: f64) -> u16 {
        let offset = position.round().clamp(0.0, self.track_length());
        self.column.saturating_add(offset as u16)
    }
}

// =============================================================================
// TRACK BRIDGE
// =============================================================================

/// Routes crossterm mouse events to one slider.
///
/// Left button only. A press on a handle cell starts a handle drag; any
/// other press on the track goes to the slider's pointer path.
#[derive(Debug, Clone)]
pub struct TrackBridge {
    track: TerminalTrack,
    drag: Option<DragSession>,
    pointer_active: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    thumb: Thumb,
    last_column: u16,
}

impl TrackBridge {
    pub fn new(track: TerminalTrack) -> Self {
        Self {
            track,
            drag: None,
            pointer_active: false,
        }
    }

    pub fn track(&self) -> TerminalTrack {
        self.track
    }

    /// Move or resize the track. Resyncs the slider's track length.
    pub fn set_track(&mut self, slider: &mut RangeSlider, track: TerminalTrack) {
        self.track = track;
        slider.set_track_length(track.track_length());
    }

    /// True while a drag or pointer gesture is routed through this bridge.
    pub fn is_active(&self) -> bool {
        self.drag.is_some() || self.pointer_active
    }

    /// Handle whose cell is at `column`, if any. When both handles share a
    /// cell the one stacked on top wins.
    pub fn thumb_at(&self, slider: &RangeSlider, column: u16) -> Option<Thumb> {
        let layout = slider.layout();
        let min_column = self.track.column_of(layout.min_position);
        let max_column = self.track.column_of(layout.max_position);

        match (column == min_column, column == max_column) {
            (true, true) => Some(slider.top_thumb()),
            (true, false) => Some(Thumb::Min),
            (false, true) => Some(Thumb::Max),
            (false, false) => None,
        }
    }

    /// Feed one mouse event to the slider. Returns true if it was consumed.
    pub fn route_mouse(&mut self, slider: &mut RangeSlider, event: CrosstermMouseEvent) -> bool {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_down(slider, event),
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(slider, event),
            MouseEventKind::Up(MouseButton::Left) => self.on_up(slider, event),
            _ => false,
        }
    }

    fn on_down(&mut self, slider: &mut RangeSlider, event: CrosstermMouseEvent) -> bool {
        if self.is_active() || !self.track.contains(event.column, event.row) {
            return false;
        }

        if let Some(thumb) = self.thumb_at(slider, event.column) {
            trace!("press on {:?} handle at column {}", thumb, event.column);
            slider.drag_started(thumb);
            if slider.gesture_state().is_dragging() {
                self.drag = Some(DragSession {
                    thumb,
                    last_column: event.column,
                });
            }
            return true;
        }

        slider.pointer_pressed(self.track.position_of(event.column));
        self.pointer_active = slider.gesture_state().is_pointer_manipulating();
        true
    }

    fn on_drag(&mut self, slider: &mut RangeSlider, event: CrosstermMouseEvent) -> bool {
        if let Some(session) = self.drag.as_mut() {
            let delta = f64::from(event.column) - f64::from(session.last_column);
            session.last_column = event.column;
            if delta != 0.0 {
                slider.drag_delta(session.thumb, delta);
            }
            return true;
        }

        if !self.pointer_active {
            return false;
        }
        if event.row != self.track.row {
            trace!("pointer left the track row");
            self.pointer_active = false;
            slider.pointer_exited();
        } else {
            slider.pointer_moved(self.track.position_of(event.column));
        }
        true
    }

    fn on_up(&mut self, slider: &mut RangeSlider, event: CrosstermMouseEvent) -> bool {
        if let Some(session) = self.drag.take() {
            slider.drag_completed(session.thumb);
            return true;
        }
        if self.pointer_active {
            self.pointer_active = false;
            slider.pointer_released(self.track.position_of(event.column));
            return true;
        }
        false
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Mouse(mouse) => Ok(InputEvent::Mouse(mouse)),
        CrosstermEvent::Key(key) => Ok(InputEvent::Key(key)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture.
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

/// Disable mouse capture.
pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::RangeSliderProps;
    use crate::state::gesture::GestureState;
    use crate::types::RangeChangedEvent;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TRACK: TerminalTrack = TerminalTrack {
        column: 10,
        row: 3,
        width: 101,
    };

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn down(column: u16) -> CrosstermMouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, TRACK.row)
    }

    fn drag(column: u16) -> CrosstermMouseEvent {
        mouse(MouseEventKind::Drag(MouseButton::Left), column, TRACK.row)
    }

    fn up(column: u16) -> CrosstermMouseEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), column, TRACK.row)
    }

    /// Slider over [0, 100] with selection [20, 80] on a 100-cell track.
    fn setup() -> (RangeSlider, TrackBridge, Rc<RefCell<Vec<RangeChangedEvent>>>) {
        let mut slider = RangeSlider::new(RangeSliderProps {
            maximum: Some(100.0),
            range_min: Some(20.0),
            range_max: Some(80.0),
            track_length: Some(TRACK.track_length()),
            ..Default::default()
        });
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        let _cleanup = slider.on_range_changed(move |event| {
            events_clone.borrow_mut().push(*event);
        });
        (slider, TrackBridge::new(TRACK), events)
    }

    #[test]
    fn test_track_geometry() {
        assert_eq!(TRACK.track_length(), 100.0);
        assert!(TRACK.contains(10, 3));
        assert!(TRACK.contains(110, 3));
        assert!(!TRACK.contains(111, 3));
        assert!(!TRACK.contains(9, 3));
        assert!(!TRACK.contains(50, 4));
        assert_eq!(TRACK.position_of(30), 20.0);
        assert_eq!(TRACK.column_of(20.4), 30);
        assert_eq!(TRACK.column_of(500.0), 110);
    }

    #[test]
    fn test_thumb_hit() {
        let (slider, bridge, _) = setup();
        assert_eq!(bridge.thumb_at(&slider, 30), Some(Thumb::Min));
        assert_eq!(bridge.thumb_at(&slider, 90), Some(Thumb::Max));
        assert_eq!(bridge.thumb_at(&slider, 50), None);
    }

    #[test]
    fn test_handle_drag() {
        let (mut slider, mut bridge, events) = setup();

        assert!(bridge.route_mouse(&mut slider, down(30)));
        assert_eq!(slider.gesture_state(), GestureState::DraggingMin);

        bridge.route_mouse(&mut slider, drag(35));
        bridge.route_mouse(&mut slider, drag(40));
        assert_eq!(slider.range_min(), 30.0);
        assert!(events.borrow().is_empty());

        bridge.route_mouse(&mut slider, up(40));
        assert!(!bridge.is_active());
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].old_value, 20.0);
        assert_eq!(events.borrow()[0].new_value, 30.0);
    }

    #[test]
    fn test_press_outside_selection() {
        let (mut slider, mut bridge, events) = setup();

        assert!(bridge.route_mouse(&mut slider, down(15)));
        assert_eq!(slider.gesture_state(), GestureState::PointerManipulatingMin);
        assert_eq!(slider.range_min(), 5.0);

        bridge.route_mouse(&mut slider, drag(20));
        assert_eq!(slider.range_min(), 10.0);

        bridge.route_mouse(&mut slider, up(20));
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].old_value, 20.0);
        assert_eq!(events.borrow()[0].new_value, 10.0);
        assert!(slider.is_track_hit_testable());
    }

    #[test]
    fn test_drag_off_row_exits() {
        let (mut slider, mut bridge, events) = setup();
        bridge.route_mouse(&mut slider, down(105));
        assert_eq!(slider.gesture_state(), GestureState::PointerManipulatingMax);

        let off_row = mouse(MouseEventKind::Drag(MouseButton::Left), 105, TRACK.row + 2);
        assert!(bridge.route_mouse(&mut slider, off_row));
        assert_eq!(slider.gesture_state(), GestureState::Idle);
        assert_eq!(events.borrow().len(), 1);

        // The release that follows is no longer ours.
        assert!(!bridge.route_mouse(&mut slider, up(105)));
    }

    #[test]
    fn test_press_inside_selection_not_routed() {
        let (mut slider, mut bridge, events) = setup();
        assert!(bridge.route_mouse(&mut slider, down(50)));
        assert!(!bridge.is_active());
        assert!(!bridge.route_mouse(&mut slider, up(50)));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_ignores_other_buttons_and_rows() {
        let (mut slider, mut bridge, _) = setup();
        let right = mouse(MouseEventKind::Down(MouseButton::Right), 30, TRACK.row);
        assert!(!bridge.route_mouse(&mut slider, right));
        let elsewhere = mouse(MouseEventKind::Down(MouseButton::Left), 30, 0);
        assert!(!bridge.route_mouse(&mut slider, elsewhere));
        assert_eq!(slider.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn test_resize_track() {
        let (mut slider, mut bridge, _) = setup();
        bridge.set_track(
            &mut slider,
            TerminalTrack {
                width: 51,
                ..TRACK
            },
        );
        assert_eq!(slider.track_length(), 50.0);
        assert_eq!(bridge.thumb_at(&slider, 20), Some(Thumb::Min));
    }
}
