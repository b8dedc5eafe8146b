// catcompare entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (log to file, stdout is reserved for the report)
// 3. Run the comparison and write it to stdout

use catcompare_cli::app;
use catcompare_cli::cli::Cli;

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };
    init_tracing(&base_dir)?;
    info!("catcompare starting up");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = app::run(&cli, &mut out) {
        error!("run failed: {e:#}");
        return Err(e);
    }

    info!("catcompare finished");
    Ok(())
}

/// Initialize tracing to log to a file under `<base>/logs/`.
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("catcompare.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catcompare=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
