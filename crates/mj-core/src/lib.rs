//! Job-configuration model for the muon B-field analysis job.
//!
//! The analysis framework keeps its pre-event-loop state (input flags,
//! service registry, algorithm sequence, histogram service) as process-wide
//! registries. This crate models that state as an explicit [`FrameworkState`]
//! and applies a [`JobConfig`] to it with [`configure_job`], so a
//! configuration pass can be run and inspected without a live framework.

pub mod algorithm;
pub mod configure;
pub mod error;
pub mod framework;
pub mod input;

pub use algorithm::{AlgorithmInstance, AlgorithmRegistry};
pub use configure::{configure_job, configure_job_with, AlgorithmConfig, JobConfig};
pub use error::{Error, Result};
pub use framework::{AccessMode, FrameworkState, HistOutput, OutputLevel};
pub use input::InputMode;

/// Crate version, recorded in CLI output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
