//! dify-export: dump every Dify application into `apps.zip`
//!
//! Configuration comes from the environment (optionally via a `.env` file):
//! `DIFY_CONSOLE_API`, `DIFY_EMAIL`, `DIFY_PASSWORD`. Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use std::process::ExitCode;

use dify_export::{Config, run_export};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::from_env();

    match run_export(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(stage = %e.stage, err = %e.source, "{}", e.stage);
            ExitCode::FAILURE
        }
    }
}
