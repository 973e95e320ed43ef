use std::env;

use axum::extract::FromRef;
use consts::{limits, GEMINI_API_BASE, GEMINI_API_KEY_ENV};
use leptos::prelude::*;
use leptos_axum::AxumRouteListing;
use utils::veo::{VeoClient, VeoConfig};
use web_time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerApiKey(pub Option<String>);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub gemini_api_key: Option<String>,
    pub veo: VeoConfig,
    pub log_level: String,
    pub log_file: Option<String>,
    pub sentry_dsn: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid value: {value}")]
    Invalid { name: &'static str, value: String },
}

fn parse_or<T: std::str::FromStr>(
    non_empty: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl ServerConfig {
    pub const DEFAULT_LOG_LEVEL: &'static str = "info,organic_storefront_ssr=debug,tower_http=info";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let base_url = match non_empty("VEO_API_BASE") {
            Some(raw) => {
                let with_slash = if raw.ends_with('/') { raw } else { format!("{raw}/") };
                with_slash
                    .parse()
                    .map_err(|_| ConfigError::Invalid {
                        name: "VEO_API_BASE",
                        value: with_slash.clone(),
                    })?
            }
            None => GEMINI_API_BASE.clone(),
        };
        let poll_secs = parse_or(
            &non_empty,
            "VEO_POLL_INTERVAL_SECS",
            limits::VEO_POLL_INTERVAL.as_secs(),
        )?;
        let max_polls = parse_or(&non_empty, "VEO_MAX_POLLS", limits::VEO_MAX_POLLS)?;

        Ok(Self {
            gemini_api_key: non_empty(GEMINI_API_KEY_ENV),
            veo: VeoConfig {
                base_url,
                poll_interval: Duration::from_secs(poll_secs),
                max_polls,
                max_video_bytes: limits::MAX_VIDEO_BYTES,
            },
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| Self::DEFAULT_LOG_LEVEL.into()),
            log_file: non_empty("LOG_FILE"),
            sentry_dsn: non_empty("SENTRY_DSN"),
        })
    }
}

#[derive(FromRef, Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub routes: Vec<AxumRouteListing>,
    pub veo: VeoClient,
    pub server_api_key: ServerApiKey,
}
