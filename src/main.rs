use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};
use zonevisits::{cli::Args, ReportOptions};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_checked();

    // ─── init logging ────────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let opts = ReportOptions::from(&args);
    match zonevisits::run(&opts, &mut std::io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
