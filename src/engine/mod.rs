//! Range Engine - the numeric core of the range slider.
//!
//! - [`constraints`] - `RangeConstraints`: the four values and their cascades
//! - [`position`] - pure value <-> track position mapping
//!
//! # Architecture
//!
//! The engine knows nothing about pointers, handles or hosts. It stores four
//! numbers, keeps them ordered, and reports which of them changed:
//!
//! ```text
//! host / gesture tracker → set_range_min(v) → clamp + cascade → RangeChange
//!                                                            ↘ Signal<RangeValues>
//! ```

pub mod constraints;
pub mod position;

pub use constraints::{RangeChange, RangeConstraints, RangeValues};
pub use position::{position_to_normalized, to_normalized, to_position, to_value};
