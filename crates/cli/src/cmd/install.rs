//! Implementation of the `texpress install` command.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result, bail};

use texpress_core::LogReporter;
use texpress_core::install::{self, InstallError};

use crate::output::{self, TermReporter};

pub fn cmd_install(tool: &str, dry_run: bool, yes: bool) -> Result<()> {
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  if dry_run {
    let plan = match rt.block_on(install::install(tool, true, &LogReporter)) {
      Ok(plan) => plan,
      Err(err) => fail(err),
    };
    output::print_info(&format!("would run: {}", plan.render()));
    return Ok(());
  }

  if !confirm(&format!("Install a TeX distribution so '{}' resolves?", tool), yes)? {
    output::print_info("install aborted");
    return Ok(());
  }

  match rt.block_on(install::install(tool, false, &TermReporter)) {
    Ok(plan) => {
      output::print_success(&format!("installed via {}", plan.manager));
      Ok(())
    }
    Err(err) => fail(err),
  }
}

fn fail(err: InstallError) -> ! {
  output::print_error(&err.to_string());
  output::print_warning(err.remediation());
  std::process::exit(1);
}

fn confirm(message: &str, force: bool) -> Result<bool> {
  if force {
    return Ok(true);
  }

  if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
    bail!("Cannot prompt for confirmation in non-interactive mode. Use --yes to proceed.");
  }

  write!(io::stderr(), "{} [y/N] ", message)?;
  io::stderr().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;

  Ok(matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
