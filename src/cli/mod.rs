//! # CLI Module
//!
//! The pipeline driver. Each command sequences the library stages, owns the
//! progress display and prints the per-stage counts.
//!
//! ## Commands
//!
//! - [`migrate`] - scrape the source page, resolve every song, save the
//!   snapshot, then replace the destination playlist
//! - [`reconcile`] - replace the destination playlist from a saved snapshot
//!
//! ## Data Flow
//!
//! ```text
//! Source Extractor ──> Catalog Resolver ──> Snapshot ──> Playlist Reconciler
//! ```
//!
//! Data only moves forward. A command returns the first fatal error it hits;
//! partial batch failures come back as `PortError::PartialFailure` after the
//! report is printed, so the process still exits non-zero.

mod migrate;
mod reconcile;
mod report;

pub use migrate::migrate;
pub use reconcile::reconcile;
pub use reconcile::replace_playlist;
