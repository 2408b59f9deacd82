//! # Orbit mapping
//!
//! Turns raw catalog records into the renderable element set consumed by the
//! [`kepler`](crate::kepler) solver and the [`orbit_frame`](crate::orbit_frame) transform.
//!
//! - [`params`] – [`MapperParams`] and its validating builder.
//! - [`orbital_elements`] – the per-body [`OrbitalElements`].
//! - [`mapper`] – the [`OrbitMapper`] itself.
pub mod mapper;
pub mod orbital_elements;
pub mod params;

pub use mapper::OrbitMapper;
pub use orbital_elements::OrbitalElements;
pub use params::{MapperParams, NodeAngleStrategy};
