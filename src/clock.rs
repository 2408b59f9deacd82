//! Simulation clock driving the Kepler solver.
//!
//! The render loop owns the clock and feeds it real frame durations; the model only reads
//! [`SimulationClock::elapsed`]. Elapsed time only decreases through
//! [`SimulationClock::reset`], which sets it back to 0.
use std::time::Duration;

use crate::{constants::SimTime, koiviz_errors::KoivizError};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    elapsed: SimTime,
    scale: f64,
    paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        SimulationClock {
            elapsed: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> SimTime {
        self.elapsed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set how many simulation seconds pass per real second.
    ///
    /// Return
    /// ------
    /// * [`KoivizError::InvalidClockScale`] for a negative or non-finite scale
    pub fn set_scale(&mut self, scale: f64) -> Result<(), KoivizError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(KoivizError::InvalidClockScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// Advance by one real frame duration and return the new elapsed time.
    pub fn advance(&mut self, real_delta: Duration) -> SimTime {
        if !self.paused {
            self.elapsed += real_delta.as_secs_f64() * self.scale;
        }
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod clock_test {
    use super::*;

    #[test]
    fn test_advance_pause_scale() {
        let mut clock = SimulationClock::new();
        assert_eq!(clock.advance(Duration::from_millis(500)), 0.5);

        clock.pause();
        assert_eq!(clock.advance(Duration::from_secs(3)), 0.5);

        clock.resume();
        clock.set_scale(4.0).unwrap();
        assert_eq!(clock.advance(Duration::from_millis(250)), 1.5);

        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_invalid_scale() {
        let mut clock = SimulationClock::new();
        assert_eq!(
            clock.set_scale(-1.0),
            Err(KoivizError::InvalidClockScale(-1.0))
        );
        assert!(clock.set_scale(f64::NAN).is_err());
        assert_eq!(clock.scale(), 1.0);
        assert!(clock.set_scale(0.0).is_ok());
    }
}
