//! # Scene store
//!
//! Single owner of the orbit list and its visibility vector.
//!
//! Writes go through `&mut self` and replace whole vectors, readers get an
//! [`Arc<SceneSnapshot>`] taken at one instant: a consumer never sees a half-updated list
//! nor a visibility vector of the wrong length.
//!
//! ## Invariants
//!
//! - `snapshot.visibility.len() == snapshot.orbits.len()` at all times.
//! - A new orbit list resets visibility to all-false.
//! - A failed update leaves the previous snapshot in place.
use std::sync::Arc;

use nalgebra::Point3;
use tracing::info;

use crate::{
    constants::{SceneUnit, SimTime},
    kepler::KeplerSolver,
    koiviz_errors::KoivizError,
    orbit::OrbitalElements,
    orbit_frame::OrbitFrame,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub orbits: Vec<OrbitalElements>,
    pub visibility: Vec<bool>,
    frames: Vec<OrbitFrame>,
}

impl SceneSnapshot {
    fn new(orbits: Vec<OrbitalElements>, visibility: Vec<bool>) -> Self {
        let frames = orbits.iter().map(OrbitFrame::from_elements).collect();
        SceneSnapshot {
            orbits,
            visibility,
            frames,
        }
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|v| **v).count()
    }

    /// Scene position of every visible body at time `t`.
    ///
    /// Return
    /// ------
    /// * `(index in the orbit list, world position)` for each visible body, in list order
    pub fn visible_positions(
        &self,
        solver: &KeplerSolver,
        t: SimTime,
    ) -> Vec<(usize, Point3<SceneUnit>)> {
        self.orbits
            .iter()
            .zip(&self.frames)
            .zip(&self.visibility)
            .enumerate()
            .filter(|(_, (_, visible))| **visible)
            .map(|(index, ((elements, frame), _))| {
                (index, frame.to_world(&solver.position_at(elements, t)))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    current: Arc<SceneSnapshot>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; cheap to clone and safe to keep across later updates.
    pub fn snapshot(&self) -> Arc<SceneSnapshot> {
        Arc::clone(&self.current)
    }

    /// Install a new orbit list; every body starts hidden.
    pub fn replace_orbits(&mut self, orbits: Vec<OrbitalElements>) {
        let visibility = vec![false; orbits.len()];
        info!(orbits = orbits.len(), "scene orbit list replaced");
        self.current = Arc::new(SceneSnapshot::new(orbits, visibility));
    }

    /// Overwrite the visibility vector.
    ///
    /// Return
    /// ------
    /// * [`KoivizError::VisibilityLengthMismatch`] if `visibility` is not index-aligned with
    ///   the current orbit list; the store is left untouched
    pub fn set_visibility(&mut self, visibility: Vec<bool>) -> Result<(), KoivizError> {
        let expected = self.current.orbits.len();
        if visibility.len() != expected {
            return Err(KoivizError::VisibilityLengthMismatch {
                expected,
                got: visibility.len(),
            });
        }
        let mut next = (*self.current).clone();
        next.visibility = visibility;
        info!(
            visible = next.visible_count(),
            total = expected,
            "scene visibility updated"
        );
        self.current = Arc::new(next);
        Ok(())
    }

    /// Show a single body.
    pub fn set_planet_visible(&mut self, index: usize, visible: bool) -> Result<(), KoivizError> {
        let len = self.current.orbits.len();
        if index >= len {
            return Err(KoivizError::RowIndexOutOfRange { index, len });
        }
        let mut next = (*self.current).clone();
        next.visibility[index] = visible;
        self.current = Arc::new(next);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.current = Arc::new(SceneSnapshot::default());
    }
}
