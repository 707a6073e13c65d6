mod build;
mod install;
mod status;

pub use build::cmd_build;
pub use install::cmd_install;
pub use status::cmd_status;
