use batchren::cli::{Args, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter, e.g. `batchren=debug`
const LOG_ENV: &str = "BATCHREN_LOG";

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.global.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
