//! job-radar CLI entrypoint.
//! Runs one fetch/score/report cycle and prints the report path.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use job_radar::config::DEFAULT_CONFIG_PATH;
use job_radar::notify::DeliveryOutcome;

#[derive(Parser)]
#[command(name = "job-radar")]
#[command(about = "Fetch, score and rank entry-level job postings")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("job_radar=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; SMTP_* and REPORT_*_EMAIL may live there.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let outcome = job_radar::run(&cli.config).await?;

    println!("{}", outcome.report_path.display());
    if let DeliveryOutcome::Sent { to } = &outcome.delivery {
        println!("Email sent to {to}");
    }
    Ok(())
}
