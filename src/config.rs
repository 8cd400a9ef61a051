use crate::*;
use confique::Config as _;
use std::{sync::OnceLock, time::Duration};

#[derive(confique::Config)]
pub struct Config {
    /// `auto`, `upper` or `lower`. Unknown values fall back to `auto`.
    #[config(env = "SQLSENSE_KEYWORD_CASING", default = "auto")]
    pub keyword_casing: String,
    #[config(env = "SQLSENSE_SMART_COMPLETION", default = true)]
    pub smart_completion: bool,
    /// Upper bound for the on-demand column fetch of a table outside the cached schema.
    #[config(env = "SQLSENSE_LIVE_FETCH_TIMEOUT_MS", default = 1500)]
    pub live_fetch_timeout_ms: u64,
    #[config(env = "SQLSENSE_LIVE_CACHE_TTL_SECS", default = 30)]
    pub live_cache_ttl_secs: u64,
    #[config(env = "SQLSENSE_LIVE_CACHE_CAPACITY", default = 256)]
    pub live_cache_capacity: u64,
    /// Comma separated output formats offered after `tableformat`.
    #[config(env = "SQLSENSE_TABLE_FORMATS", default = "ascii,csv,html,json,tsv,vertical")]
    pub table_formats: String,
    #[cfg(test)]
    #[config(env = "SQLSENSE_CONTAINER_RAMDISKED", default = true)]
    pub container_ramdisked: bool,
    #[cfg(test)]
    #[config(env = "SQLSENSE_CONTAINER_LOGS", default = false)]
    pub container_logs: bool,
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::builder()
            .env()
            .load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}

/// Runtime knobs of a [`Completer`], detached from where they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub casing: Casing,
    pub smart_completion: bool,
    pub live_fetch_timeout: Duration,
    pub live_cache_ttl: Duration,
    pub live_cache_capacity: u64,
    pub table_formats: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            casing: Casing::Auto,
            smart_completion: true,
            live_fetch_timeout: Duration::from_millis(1500),
            live_cache_ttl: Duration::from_secs(30),
            live_cache_capacity: 256,
            table_formats: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let config = Config::builder().env().load()?;
        Ok(Self::from(&config))
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        let casing = config.keyword_casing.parse().unwrap_or_else(|_| {
            warn!(
                "Unknown keyword casing {:?}, using auto",
                config.keyword_casing
            );
            Casing::Auto
        });
        Self {
            casing,
            smart_completion: config.smart_completion,
            live_fetch_timeout: Duration::from_millis(config.live_fetch_timeout_ms),
            live_cache_ttl: Duration::from_secs(config.live_cache_ttl_secs),
            live_cache_capacity: config.live_cache_capacity,
            table_formats: config
                .table_formats
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = Config::builder().load().expect("defaults load");
        let settings = Settings::from(&config);
        assert_eq!(settings.casing, Casing::Auto);
        assert!(settings.smart_completion);
        assert_eq!(settings.live_fetch_timeout, Duration::from_millis(1500));
        assert_eq!(
            settings.table_formats,
            ["ascii", "csv", "html", "json", "tsv", "vertical"]
        );
    }
}
