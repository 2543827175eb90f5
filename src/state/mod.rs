//! State Module - Runtime state behind the range slider
//!
//! - **Gesture** - Handle drags and out-of-range pointer gestures
//! - **Overscroll** - Pull-to-refresh progress and timed activation
//! - **Input** - crossterm bridge for a slider drawn in a terminal

pub mod gesture;
pub mod input;
pub mod overscroll;

pub use gesture::{GestureEffects, GestureState, GestureTracker};
pub use overscroll::{OverscrollConfig, OverscrollTracker};
