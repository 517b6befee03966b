//! Configuration management for the playlist porter.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Every value a command needs is read and validated up front into explicit
//! structs ([`SourceConfig`], [`SpotifyConfig`]) that are handed to the stages
//! at construction. A missing or malformed value fails with
//! [`PortError::Configuration`] before any network or browser work starts.

use std::{env, path::PathBuf, time::Duration};

use crate::{PortError, error::Result, source::PageLayout};

pub const ENV_SOURCE_URL: &str = "APPLE_PLAYLIST_URL";
pub const ENV_TOKEN: &str = "OAUTH_TOKEN";
pub const ENV_PLAYLIST_ID: &str = "PLAYLIST_ID";
pub const ENV_MARKET: &str = "MARKET";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_SEARCH_DELAY: &str = "SEARCH_DELAY_MS";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 100;

/// Loads environment variables from `.env` files.
///
/// The file in the platform-specific local data directory is read first,
/// then the one in the working directory. Variables already present in the
/// process environment are never overwritten, and missing files are skipped.
///
/// The data directory file lives at:
/// - Linux: `~/.local/share/playport/.env`
/// - macOS: `~/Library/Application Support/playport/.env`
/// - Windows: `%LOCALAPPDATA%/playport/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Root of everything the tool keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playport");
    path
}

/// Reads a variable from the process environment.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Everything the Source Extractor needs.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    pub headless: bool,
    pub layout: PageLayout,
}

impl SourceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = required(&lookup, ENV_SOURCE_URL)?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(PortError::Configuration(format!(
                "{} must be an http(s) URL, got `{}`",
                ENV_SOURCE_URL, url
            )));
        }

        Ok(Self {
            url,
            headless: true,
            layout: PageLayout::default(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }
}

/// Everything the Catalog Resolver and Playlist Reconciler need.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub api_url: String,
    pub token: String,
    pub playlist_id: String,
    pub market: Option<String>,
    pub search_delay: Duration,
}

impl SpotifyConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = required(&lookup, ENV_TOKEN)?;
        let playlist_id = required(&lookup, ENV_PLAYLIST_ID)?;
        if playlist_id.contains(['/', '?', '#', ' ']) {
            return Err(PortError::Configuration(format!(
                "{} must be a bare playlist id, got `{}`",
                ENV_PLAYLIST_ID, playlist_id
            )));
        }

        let market = optional(&lookup, ENV_MARKET);
        if let Some(market) = &market {
            if !is_valid_market(market) {
                return Err(PortError::Configuration(format!(
                    "{} must be a two-letter country code or `from_token`, got `{}`",
                    ENV_MARKET, market
                )));
            }
        }

        let api_url = optional(&lookup, ENV_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let search_delay = match optional(&lookup, ENV_SEARCH_DELAY) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                PortError::Configuration(format!(
                    "{} must be a whole number of milliseconds, got `{}`",
                    ENV_SEARCH_DELAY, raw
                ))
            })?,
            None => DEFAULT_SEARCH_DELAY_MS,
        };

        Ok(Self {
            api_url,
            token,
            playlist_id,
            market,
            search_delay: Duration::from_millis(search_delay),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key)
        .ok_or_else(|| PortError::Configuration(format!("{} must be set", key)))
}

fn is_valid_market(market: &str) -> bool {
    market == "from_token" || (market.len() == 2 && market.chars().all(|c| c.is_ascii_uppercase()))
}
