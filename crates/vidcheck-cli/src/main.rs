use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use vidcheck_cli::report::Report;
use vidcheck_cli::scenarios::{self, CheckContext};
use vidcheck_proto::config::Config;

/// Contract checks for a video-aggregation REST API.
#[derive(Parser, Debug)]
#[command(name = "vidcheck", version)]
struct Args {
    /// Root URL of the service under test (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of ~/.config/vidcheck/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pause between ingestion and verification calls, in seconds
    #[arg(long)]
    pause_secs: Option<u64>,

    /// How many leading records get the full schema check
    #[arg(long)]
    sample: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Allow RUST_LOG override; suppress noisy connection-level output from
    // HTTP client internals by default.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("vidcheck could not start: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let mut cfg = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(base_url) = args.base_url {
        cfg.api.base_url = base_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        cfg.api.timeout_secs = timeout_secs;
    }
    if let Some(pause_secs) = args.pause_secs {
        cfg.checks.pause_secs = pause_secs;
    }
    if let Some(sample) = args.sample {
        cfg.checks.sample_size = sample;
    }

    println!("checking {}", cfg.api.base_url);
    println!();

    let ctx = CheckContext::new(cfg)?;
    let mut report = Report::new();
    scenarios::run_all(&ctx, &mut report).await;
    report.print_summary();

    Ok(report.all_passed())
}
