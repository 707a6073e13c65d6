//! texpress-core: the document build pipeline
//!
//! This crate implements a sequential build-and-package pipeline for
//! turning a LaTeX source into a timestamped PDF artifact:
//! - `preflight`: resolve the compiler before anything mutates
//! - `outdir`: prepare the output location
//! - `compile`: bounded-retry compilation with per-attempt logs
//! - `promote`: copy the artifact to its timestamped destination
//! - `cleanup`: best-effort removal of build byproducts
//! - `install`: provision the compiler through the system package manager

pub mod cleanup;
pub mod compile;
pub mod error;
pub mod install;
pub mod outdir;
pub mod pipeline;
pub mod preflight;
pub mod promote;
pub mod report;
pub mod types;

pub use error::BuildError;
pub use install::{InstallError, InstallPlan};
pub use report::{LogReporter, Reporter, Severity};
pub use types::{ARTIFACT_EXT, BuildAttempt, BuildRequest, BuildResult, DEFAULT_MAX_ATTEMPTS};

/// Result alias for pipeline operations.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;
