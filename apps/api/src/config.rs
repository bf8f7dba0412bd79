use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory for the JSON snapshot. `None` keeps state in memory only.
    pub storage_dir: Option<PathBuf>,
    pub analyze_delay: Duration,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            storage_dir: lookup("STORAGE_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            analyze_delay: Duration::from_millis(
                lookup("ANALYZE_DELAY_MS")
                    .unwrap_or_else(|| "600".to_string())
                    .parse::<u64>()
                    .context("ANALYZE_DELAY_MS must be a whole number of milliseconds")?,
            ),
            seed_demo_data: match lookup("SEED_DEMO_DATA") {
                Some(raw) => parse_bool(&raw).context("SEED_DEMO_DATA must be true or false")?,
                None => true,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}
