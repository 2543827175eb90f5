//! # spark-range
//!
//! Dual-handle range slider engine for Rust hosts.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) so the
//! selected range can be observed reactively.
//!
//! ## Architecture
//!
//! The slider is split into a pure value engine, a gesture state machine and
//! a thin control that wires them to the host:
//! ```text
//! host input → GestureTracker → RangeConstraints → Signal<RangeValues>
//!                     ↓                 ↓
//!             visual / hit-test   layout sync → host
//! ```
//!
//! The engine keeps `Minimum <= RangeMin <= RangeMax <= Maximum` under any
//! sequence of setters. Gestures move one handle at a time and report a
//! single change notification when they end.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Thumb, VisualState, RangeLayout, events)
//! - [`engine`] - Value constraints and value/position mapping
//! - [`state`] - Gesture tracking, overscroll tracking, crossterm bridge
//! - [`primitives`] - The `RangeSlider` control and its props
//! - [`error`] - Error types

pub mod engine;
pub mod error;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{RangeChange, RangeConstraints, RangeValues};

pub use error::OverscrollError;

pub use primitives::{Cleanup, RangeSlider, RangeSliderProps};

pub use state::{GestureState, OverscrollConfig, OverscrollTracker};
