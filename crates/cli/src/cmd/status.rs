//! Implementation of the `texpress status` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use texpress_core::preflight;
use texpress_platform::{Arch, Os, PackageManager, PlatformInfo};

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct StatusReport {
  version: &'static str,
  os: Os,
  arch: Arch,
  hostname: String,
  username: String,
  package_manager: Option<PackageManager>,
  compiler: Option<PathBuf>,
}

pub fn cmd_status(format: OutputFormat) -> Result<()> {
  let info = PlatformInfo::detect()?;
  let package_manager = PackageManager::detect(info.os);
  let compiler = preflight::resolve_compiler(None).ok();

  let report = StatusReport {
    version: env!("CARGO_PKG_VERSION"),
    os: info.os,
    arch: info.arch,
    hostname: info.hostname.clone(),
    username: info.username.clone(),
    package_manager,
    compiler,
  };

  if format.is_json() {
    return output::print_json(&report);
  }

  output::print_info(&format!("texpress v{}", report.version));
  output::print_stat("platform", &info.triple());
  output::print_stat("hostname", &report.hostname);
  output::print_stat("user", &report.username);
  match report.package_manager {
    Some(pm) => output::print_stat("package manager", pm.as_str()),
    None => output::print_stat("package manager", "none detected"),
  }
  match &report.compiler {
    Some(path) => output::print_stat("compiler", &path.display().to_string()),
    None => {
      output::print_stat("compiler", "not found");
      output::print_warning("no LaTeX compiler on PATH; run `texpress install`");
    }
  }

  Ok(())
}
