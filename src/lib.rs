//! # dify-export
//!
//! Batch exporter for the Dify console API.
//!
//! One run logs in, pages through every application the account can see,
//! exports each application's DSL document, and writes them all into a single
//! zip archive (`<app id>.yml` per entry). Requests are made one at a time;
//! the first failure ends the run, leaving the archive finalized with whatever
//! was exported before it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dify_export::{Config, run_export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads DIFY_CONSOLE_API, DIFY_EMAIL and DIFY_PASSWORD
//!     let config = Config::from_env();
//!
//!     let summary = run_export(&config).await?;
//!     println!("exported {} apps to {}", summary.exported, summary.output.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Zip archive output
pub mod archive;
/// Configuration types
pub mod config;
/// Console API client
pub mod console;
/// Error types
pub mod error;
/// Export pipeline
pub mod exporter;
/// Retry logic with exponential backoff
pub mod retry;
/// HTTP session with retries
pub mod session;
/// Core types and API payloads
pub mod types;

// Re-export commonly used types
pub use archive::ArchiveWriter;
pub use config::{Config, Credentials, HttpConfig, RetryConfig};
pub use console::{AppPager, ConsoleClient};
pub use error::{Error, ExportError, Result, Stage};
pub use exporter::{export_apps, run_export};
pub use session::HttpSession;
pub use types::{AppId, AppPage, AppRef, ExportSummary, SessionToken};
