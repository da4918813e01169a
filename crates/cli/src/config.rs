//! Environment configuration for the CLI.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// TMDB v3 API key; only commands that reach the catalog require it
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    #[serde(default = "default_api_url")]
    pub tmdb_api_url: String,

    /// Directory holding the three log slots
    #[serde(default = "default_data_dir")]
    pub moxie_data_dir: PathBuf,

    #[serde(default)]
    pub moxie_fetch_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    tmdb_client::DEFAULT_BASE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".moxie")
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().context("Invalid environment configuration")
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.moxie_fetch_timeout_secs.map(Duration::from_secs)
    }
}
