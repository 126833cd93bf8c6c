use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use cube_gl::config::AppConfig;
use cube_gl::{App, BootstrapError, build_info, health, logging};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration profile to load (defaults to $CUBEGL_PROFILE or "release")
    #[arg(long)]
    profile: Option<String>,

    /// Treat the host as this OS name instead of detecting it
    #[arg(long)]
    os_name: Option<String>,

    /// Shut down after rendering this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Run the startup diagnostics and exit with their status
    #[arg(long)]
    check: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    }
    .map_err(BootstrapError::from)?;

    if let Some(os_name) = cli.os_name {
        config.platform.os_name = Some(os_name);
    }

    logging::init(&config.logging).map_err(BootstrapError::from)?;

    info!(version = %build_info::version_string(), "CubeGl");

    if cli.check {
        let report = health::default_runner(&config).run();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    if let Err(e) = App::run(config, cli.max_frames) {
        error!(error = %e, "Bootstrap failed");
        return Err(e).context("CubeGl terminated abnormally");
    }

    Ok(())
}
