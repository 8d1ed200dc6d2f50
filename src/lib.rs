//! Library crate providing periodic visual sensing for simulated worlds.
//!
//! A [`Seeker`] entity scans its world on a timer, filters every wanted
//! candidate through a staged visibility pipeline (distance cull,
//! probabilistic skip gate, field-of-view test, line-of-sight trace), and
//! writes the outcome to each candidate's [`Wanted`] flags, ranking the
//! detections by distance. [`SensePlugin`] wires the scan into a Bevy
//! `App`; the core modules are plain `glam` math a non-Bevy host can
//! drive directly.
pub mod constants;
pub mod logging;
pub mod occlusion;
pub mod plugin;
pub mod seeker;
pub mod systems;
pub mod timer;
pub mod vision;
pub mod wanted;
pub use constants::*;

// Re-export commonly used items
pub use logging::init as init_logging;
pub use occlusion::{LineOfSight, LineOfSightQuery, Sphere, SphereOccluders, Unobstructed};
pub use plugin::{SeenEvent, SensePlugin};
pub use seeker::{EyeHeight, Seeker};
pub use systems::sense_scan_system;
pub use timer::ScanTimer;
pub use vision::{PeripheralVision, SensorPose};
pub use wanted::{Concealed, Wanted};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use sightline::prelude::*;
    //! ```

    pub use crate::Concealed;
    pub use crate::EyeHeight;
    pub use crate::LineOfSightQuery;
    pub use crate::SeenEvent;
    pub use crate::Seeker;
    pub use crate::SensePlugin;
    pub use crate::SensorPose;
    pub use crate::Wanted;
}
