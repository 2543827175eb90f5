//! Errors.
//!
//! The range engine itself never fails: it clamps. Only the overscroll
//! tracker validates its configuration.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OverscrollError {
    #[error("overscroll sensitivity must be within [0, 1], got {0}")]
    SensitivityOutOfRange(f64),

    #[error("overscroll threshold must be a positive length, got {0}")]
    InvalidThreshold(f64),
}
