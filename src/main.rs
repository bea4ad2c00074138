use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::info;

use lahman_prep::config::{Config, DEFAULT_CONFIG_FILE};
use lahman_prep::job;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!(
        "{} job(s) over {}",
        config.jobs.len(),
        config.base_dir.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = job::run(&config, &mut out).context("writing preview")?;
    out.write_all(report.summary().as_bytes())
        .context("writing summary")?;
    out.flush().context("writing summary")?;

    Ok(report.exit_code())
}
