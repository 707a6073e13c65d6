//! Platform detection and system abstractions for texpress
//!
//! This crate provides cross-platform abstractions for:
//! - OS and architecture detection
//! - Package manager detection
//! - Executable resolution over the process search path

mod error;
mod pm;
mod platform;
mod resolve;

pub use error::PlatformError;
pub use platform::{Arch, Os, PlatformInfo, is_elevated};
pub use pm::PackageManager;
pub use resolve::{find_in_path, is_executable};
