//! Data-ingestion layer for the regenerative-braking results dashboard.
//!
//! The dashboard shows pre-computed simulation output (battery and
//! supercapacitor state of charge, rotor speed, rotor torque) for a fixed set
//! of operating-mode scenarios. This crate owns everything up to the point
//! where a chart is drawn: it resolves a [`Scenario`] to its MAT file, reads
//! the named channel arrays, and assembles them into aligned time-series
//! frames. Rendering is the caller's business.
//!
//! ```no_run
//! use regen_data::{Loader, Scenario};
//!
//! let loader = Loader::new("MATLAB_files");
//! let frames = loader.load(Scenario::Mode4Regen)?;
//! println!("{} samples", frames.primary().len());
//! # Ok::<(), regen_data::LoadError>(())
//! ```

pub mod data;
pub mod scenario;

pub use data::loader::{LoadError, Loader};
pub use data::model::{ScenarioFrames, TimeSeriesFrame};
pub use scenario::{InvalidScenario, Scenario};
