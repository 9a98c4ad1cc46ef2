use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::assessment::questions::SliderPolicy;

/// Application configuration loaded from environment variables.
/// Fails at startup if a present variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables AI enrichment when set.
    pub anthropic_api_key: Option<String>,
    pub enrichment_enabled: bool,
    pub slider_policy: SliderPolicy,
    /// Sessions untouched for this long are dropped from memory.
    pub session_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: get("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            enrichment_enabled: match get("ENRICHMENT_ENABLED") {
                Some(v) => parse_bool(&v).context("ENRICHMENT_ENABLED must be true or false")?,
                None => true,
            },
            slider_policy: get("SLIDER_POLICY")
                .as_deref()
                .unwrap_or("reject")
                .parse::<SliderPolicy>()
                .map_err(|e| anyhow!(e))
                .context("SLIDER_POLICY is invalid")?,
            session_idle_ttl: parse_ttl(get("SESSION_IDLE_TTL_SECS"))?,
        })
    }

    /// The API key to use for enrichment, if enrichment should run at all.
    pub fn enrichment_key(&self) -> Option<&str> {
        if self.enrichment_enabled {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

fn parse_ttl(value: Option<String>) -> Result<Duration> {
    let secs = match value {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
        None => 24 * 60 * 60,
    };
    if secs == 0 {
        bail!("SESSION_IDLE_TTL_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("unrecognised boolean '{other}'")),
    }
}
