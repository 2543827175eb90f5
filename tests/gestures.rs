//! Gesture behavior through the public `RangeSlider` API.

use std::cell::RefCell;
use std::rc::Rc;

use spark_range::primitives::{RangeSlider, RangeSliderProps};
use spark_range::{GestureState, RangeChangedEvent, RangeEndpoint, Thumb, VisualState};

fn slider(range_min: f64, range_max: f64) -> (RangeSlider, Rc<RefCell<Vec<RangeChangedEvent>>>) {
    let mut slider = RangeSlider::new(RangeSliderProps {
        minimum: Some(0.0),
        maximum: Some(1.0),
        range_min: Some(range_min),
        range_max: Some(range_max),
        track_length: Some(100.0),
        ..Default::default()
    });
    let events = Rc::new(RefCell::new(Vec::new()));
    let events_clone = events.clone();
    let _cleanup = slider.on_range_changed(move |event| events_clone.borrow_mut().push(*event));
    (slider, events)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn drag_reports_once_with_start_and_end_values() {
    let (mut slider, events) = slider(0.2, 0.8);

    slider.drag_started(Thumb::Min);
    slider.drag_delta(Thumb::Min, 10.0);
    slider.drag_delta(Thumb::Min, 10.0);
    slider.drag_delta(Thumb::Min, -5.0);
    slider.drag_completed(Thumb::Min);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].endpoint, RangeEndpoint::MinimumValue);
    assert!(approx(events[0].old_value, 0.2));
    assert!(approx(events[0].new_value, 0.35));
}

#[test]
fn drag_stops_at_other_handle() {
    let (mut slider, _) = slider(0.2, 0.5);

    slider.drag_started(Thumb::Max);
    slider.drag_delta(Thumb::Max, -90.0);
    assert_eq!(slider.range_max(), slider.range_min());
    slider.drag_completed(Thumb::Max);

    slider.drag_started(Thumb::Min);
    slider.drag_delta(Thumb::Min, -500.0);
    slider.drag_completed(Thumb::Min);
    assert_eq!(slider.range_min(), 0.0);
}

#[test]
fn out_of_range_payload_uses_value_before_press() {
    let (mut slider, events) = slider(0.1, 0.5);

    slider.pointer_pressed(90.0);
    assert_eq!(slider.gesture_state(), GestureState::PointerManipulatingMax);
    assert!(!slider.is_track_hit_testable());
    assert!(approx(slider.range_max(), 0.9));

    slider.pointer_released(90.0);

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].endpoint, RangeEndpoint::MaximumValue);
    assert!(approx(events[0].old_value, 0.5));
    assert!(approx(events[0].new_value, 0.9));
    assert!(slider.is_track_hit_testable());
}

#[test]
fn pointer_move_across_other_handle_is_ignored() {
    let (mut slider, _) = slider(0.4, 0.6);

    slider.pointer_pressed(10.0);
    assert!(approx(slider.range_min(), 0.1));

    slider.pointer_moved(70.0);
    assert!(approx(slider.range_min(), 0.1));

    slider.pointer_moved(30.0);
    assert!(approx(slider.range_min(), 0.3));
    slider.pointer_exited();
    assert_eq!(slider.gesture_state(), GestureState::Idle);
}

#[test]
fn gestures_do_not_overlap() {
    let (mut slider, events) = slider(0.2, 0.8);

    slider.drag_started(Thumb::Min);
    slider.pointer_pressed(95.0);
    slider.drag_started(Thumb::Max);
    assert_eq!(slider.gesture_state(), GestureState::DraggingMin);
    assert!(slider.is_track_hit_testable());
    assert!(approx(slider.range_max(), 0.8));

    slider.drag_completed(Thumb::Min);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn zero_length_track_ignores_presses() {
    let (mut slider, events) = slider(0.2, 0.8);
    slider.set_track_length(0.0);

    slider.pointer_pressed(5.0);
    slider.pointer_released(5.0);
    assert_eq!(slider.gesture_state(), GestureState::Idle);
    assert!(events.borrow().is_empty());
}

#[test]
fn disabled_slider_shows_disabled_until_enabled() {
    let (mut slider, _) = slider(0.2, 0.8);
    slider.set_enabled(false);
    slider.drag_started(Thumb::Min);
    assert_eq!(slider.visual_state(), VisualState::Disabled);

    slider.set_enabled(true);
    slider.drag_started(Thumb::Min);
    assert_eq!(slider.visual_state(), VisualState::MinPressed);
}

#[test]
fn zero_length_track_ignores_drags() {
    let (mut slider, events) = slider(0.2, 0.8);
    slider.set_track_length(0.0);

    slider.drag_started(Thumb::Max);
    slider.drag_delta(Thumb::Max, 0.0);
    slider.drag_delta(Thumb::Min, 5.0);
    slider.drag_delta(Thumb::Max, -30.0);
    slider.drag_completed(Thumb::Max);

    assert!(approx(slider.range_min(), 0.2));
    assert!(approx(slider.range_max(), 0.8));
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert!(!events[0].is_change());
}

#[test]
fn track_collapsing_mid_gesture_freezes_selection() {
    let (mut slider, events) = slider(0.4, 0.6);

    slider.pointer_pressed(10.0);
    assert!(approx(slider.range_min(), 0.1));

    slider.set_track_length(0.0);
    slider.pointer_moved(5.0);
    assert!(approx(slider.range_min(), 0.1));
    assert!(approx(slider.range_max(), 0.6));

    slider.pointer_released(5.0);
    assert_eq!(events.borrow().len(), 1);
    assert!(events.borrow()[0].is_change());
}
