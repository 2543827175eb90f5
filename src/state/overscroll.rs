//! Overscroll Tracker - pull-to-refresh progress with timed activation.
//!
//! Independent of the range slider. A host feeds it the raw overscroll
//! distance of a scrollable container while the user pulls past its edge:
//!
//! - `compression = max(offset, 0) * sensitivity`
//! - `progress = clamp(compression / threshold, 0, 1)`
//! - once progress has stayed at 1 for `activation_delay`, the tracker
//!   activates, and releasing fires `on_refresh`
//!
//! Time is passed in by the caller as a `Duration` since any fixed epoch, so
//! the tracker never reads a clock.
//!
//! # Example
//!
//! ```ignore
//! use spark_range::state::overscroll::{OverscrollConfig, OverscrollTracker};
//! use std::time::Duration;
//!
//! let mut tracker = OverscrollTracker::new(OverscrollConfig::default())?;
//! tracker.pull(120.0, Duration::from_millis(0));
//! tracker.pull(240.0, Duration::from_millis(400));
//! if tracker.release(Duration::from_millis(500)) {
//!     // reload
//! }
//! ```

use std::rc::Rc;
use std::time::Duration;

use log::debug;
use spark_signals::{signal, Signal};

use crate::error::OverscrollError;

/// Fired when a release completes an activated pull.
pub type RefreshCallback = Rc<dyn Fn()>;

// =============================================================================
// CONFIG
// =============================================================================

/// Tracker configuration.
#[derive(Clone)]
pub struct OverscrollConfig {
    /// Compression (in pixels) that counts as a full pull.
    pub threshold: f64,
    /// Fraction of the raw overscroll that turns into compression, in `[0, 1]`.
    pub sensitivity: f64,
    /// How long a full pull must be held before it activates.
    pub activation_delay: Duration,
    pub on_refresh: Option<RefreshCallback>,
}

impl Default for OverscrollConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            sensitivity: 0.5,
            activation_delay: Duration::from_millis(250),
            on_refresh: None,
        }
    }
}

fn check_sensitivity(value: f64) -> Result<f64, OverscrollError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(OverscrollError::SensitivityOutOfRange(value))
    }
}

fn check_threshold(value: f64) -> Result<f64, OverscrollError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(OverscrollError::InvalidThreshold(value))
    }
}

// =============================================================================
// TRACKER
// =============================================================================

pub struct OverscrollTracker {
    threshold: f64,
    sensitivity: f64,
    activation_delay: Duration,
    on_refresh: Option<RefreshCallback>,
    compression: f64,
    progress: Signal<f64>,
    /// When progress last reached 1.
    armed_since: Option<Duration>,
    activated: bool,
}

impl OverscrollTracker {
    pub fn new(config: OverscrollConfig) -> Result<Self, OverscrollError> {
        Ok(Self {
            threshold: check_threshold(config.threshold)?,
            sensitivity: check_sensitivity(config.sensitivity)?,
            activation_delay: config.activation_delay,
            on_refresh: config.on_refresh,
            compression: 0.0,
            progress: signal(0.0),
            armed_since: None,
            activated: false,
        })
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Change the sensitivity. Values outside `[0, 1]` are rejected and the
    /// previous value is kept.
    pub fn set_sensitivity(&mut self, value: f64) -> Result<(), OverscrollError> {
        self.sensitivity = check_sensitivity(value)?;
        Ok(())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, value: f64) -> Result<(), OverscrollError> {
        self.threshold = check_threshold(value)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Pull progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn progress_signal(&self) -> Signal<f64> {
        self.progress.clone()
    }

    pub fn compression(&self) -> f64 {
        self.compression
    }

    /// True while progress is at 1 and the activation timer is running.
    pub fn is_armed(&self) -> bool {
        self.armed_since.is_some()
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Report the current overscroll distance at time `now`.
    pub fn pull(&mut self, offset: f64, now: Duration) {
        let offset = if offset.is_nan() { 0.0 } else { offset.max(0.0) };
        self.compression = offset * self.sensitivity;
        let progress = (self.compression / self.threshold).clamp(0.0, 1.0);
        self.progress.set(progress);

        if progress >= 1.0 {
            if self.armed_since.is_none() {
                self.armed_since = Some(now);
            }
        } else {
            self.armed_since = None;
        }
        self.update_activation(now);
    }

    /// Let time pass without a new offset.
    pub fn tick(&mut self, now: Duration) {
        self.update_activation(now);
    }

    /// End the pull. Returns true (and fires `on_refresh`) if it had activated.
    pub fn release(&mut self, now: Duration) -> bool {
        self.update_activation(now);
        let fire = self.activated;
        self.reset();

        if fire {
            debug!("overscroll released after activation, refreshing");
            if let Some(on_refresh) = &self.on_refresh {
                on_refresh();
            }
        }
        fire
    }

    /// Abandon the pull without firing.
    pub fn reset(&mut self) {
        self.compression = 0.0;
        self.progress.set(0.0);
        self.armed_since = None;
        self.activated = false;
    }

    fn update_activation(&mut self, now: Duration) {
        if self.activated {
            return;
        }
        if let Some(since) = self.armed_since {
            if now.saturating_sub(since) >= self.activation_delay {
                debug!("overscroll activated after {:?}", now.saturating_sub(since));
                self.activated = true;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn tracker() -> OverscrollTracker {
        OverscrollTracker::new(OverscrollConfig {
            threshold: 100.0,
            sensitivity: 0.5,
            activation_delay: ms(250),
            on_refresh: None,
        })
        .expect("valid config")
    }

    #[test]
    fn test_progress_scales_with_sensitivity() {
        let mut t = tracker();
        t.pull(100.0, ms(0));
        assert_eq!(t.compression(), 50.0);
        assert_eq!(t.progress(), 0.5);

        t.pull(1000.0, ms(10));
        assert_eq!(t.progress(), 1.0);

        t.pull(-20.0, ms(20));
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn test_activation_needs_hold() {
        let mut t = tracker();
        t.pull(200.0, ms(0));
        assert!(t.is_armed());
        assert!(!t.is_activated());

        t.tick(ms(249));
        assert!(!t.is_activated());

        t.tick(ms(250));
        assert!(t.is_activated());
    }

    #[test]
    fn test_dropping_below_threshold_disarms() {
        let mut t = tracker();
        t.pull(200.0, ms(0));
        t.pull(150.0, ms(100));
        assert!(!t.is_armed());

        t.pull(200.0, ms(200));
        t.tick(ms(400));
        assert!(!t.is_activated());
        t.tick(ms(450));
        assert!(t.is_activated());
    }

    #[test]
    fn test_release_fires_refresh_once() {
        let count = Rc::new(Cell::new(0));
        let mut t = OverscrollTracker::new(OverscrollConfig {
            on_refresh: Some(Rc::new({
                let count = count.clone();
                move || count.set(count.get() + 1)
            })),
            ..Default::default()
        })
        .expect("valid config");

        t.pull(400.0, ms(0));
        assert!(t.release(ms(300)));
        assert_eq!(count.get(), 1);
        assert_eq!(t.progress(), 0.0);

        // Released early: no refresh.
        t.pull(400.0, ms(1000));
        assert!(!t.release(ms(1100)));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_sensitivity_validation() {
        let mut t = tracker();
        assert_eq!(
            t.set_sensitivity(1.5),
            Err(OverscrollError::SensitivityOutOfRange(1.5))
        );
        assert!(t.set_sensitivity(-0.1).is_err());
        assert!(t.set_sensitivity(f64::NAN).is_err());
        assert_eq!(t.sensitivity(), 0.5);

        assert!(t.set_sensitivity(0.0).is_ok());
        assert!(t.set_sensitivity(1.0).is_ok());
        assert_eq!(t.sensitivity(), 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_sensitivity = OverscrollTracker::new(OverscrollConfig {
            sensitivity: 2.0,
            ..Default::default()
        });
        assert!(matches!(
            bad_sensitivity,
            Err(OverscrollError::SensitivityOutOfRange(_))
        ));

        let bad_threshold = OverscrollTracker::new(OverscrollConfig {
            threshold: 0.0,
            ..Default::default()
        });
        assert!(matches!(bad_threshold, Err(OverscrollError::InvalidThreshold(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = OverscrollError::SensitivityOutOfRange(1.5);
        assert_eq!(
            err.to_string(),
            "overscroll sensitivity must be within [0, 1], got 1.5"
        );
    }
}
