//! Playlist Porter Library
//!
//! This library moves the contents of a playlist rendered on a web page into a
//! Spotify playlist. The work happens in three forward-only stages: the source
//! page is scraped into an ordered list of tracks, every track is resolved
//! against the Spotify catalog, and the destination playlist is emptied and
//! refilled with the resolved tracks in source order.
//!
//! # Modules
//!
//! - `cli` - Command implementations driving the pipeline
//! - `config` - Configuration loading and validation
//! - `error` - Error taxonomy shared by all stages
//! - `management` - Persisted snapshot of resolved tracks
//! - `reconciler` - Replaces the destination playlist contents
//! - `resolver` - Matches scraped tracks to catalog entries
//! - `source` - Headless browser scraping of the source page
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Batching and text normalization helpers
//!
//! # Example
//!
//! ```
//! use playport::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> playport::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod reconciler;
pub mod resolver;
pub mod source;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::PortError;

/// A convenient Result type alias for operations that may fail.
///
/// Used on the binary surface where errors of several kinds meet and are only
/// printed. Library code returns [`PortError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching songs from {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("{} Songs fetched", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal paths: the process terminates with exit code 1 right
/// after the message is printed.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a single track failing to resolve or
/// one playlist batch being rejected.
///
/// # Example
///
/// ```
/// warning!("No catalog match for {} - {}", title, artist);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
