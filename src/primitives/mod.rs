//! Primitives - Controls a host can mount.
//!
//! - [`RangeSlider`] - Dual-handle range selection
//!
//! # Architecture
//!
//! A control owns its state and is driven entirely through method calls.
//! It never draws. Everything the host must reflect (handle geometry,
//! visual state, stacking, hit testing) is pushed out through the
//! callbacks in its props:
//!
//! ```ignore
//! let slider = RangeSlider::new(RangeSliderProps {
//!     on_layout: Some(Rc::new(|layout| place_handles(layout))),
//!     ..Default::default()
//! });
//! ```

mod range_slider;
mod types;

pub use range_slider::RangeSlider;
pub use types::*;
