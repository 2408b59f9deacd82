pub mod catalog;
pub mod classifier;
pub mod clock;
pub mod constants;
mod conversion;
pub mod env_state;
pub mod kepler;
pub mod koiviz;
pub mod koiviz_errors;
pub mod orbit;
pub mod orbit_frame;
pub mod store;
pub mod visibility;

pub use catalog::{CanonicalField, CatalogRow, RawRecord, RawTable};
pub use kepler::{KeplerSolver, OrbitState};
pub use koiviz::Koiviz;
pub use koiviz_errors::KoivizError;
pub use orbit::{MapperParams, NodeAngleStrategy, OrbitMapper, OrbitalElements};
