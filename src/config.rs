//! Runtime configuration
//!
//! The credential, target file and date range are read once at startup and
//! passed by value into the engine. Nothing reads the environment after
//! [`AnalyticsConfig::from_env`] returns.

use crate::error::{Error, Result};
use crate::types::StringMap;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Environment variable holding the API token
pub const ENV_ACCESS_TOKEN: &str = "FIGMA_ACCESS_TOKEN";
/// Environment variable holding the library file key
pub const ENV_FILE_KEY: &str = "FILE_KEY";
/// Environment variable holding the first day of the range
pub const ENV_START_DATE: &str = "START_DATE";
/// Environment variable holding the last day of the range
pub const ENV_END_DATE: &str = "END_DATE";
/// Optional override for the analytics API root
pub const ENV_BASE_URL: &str = "FIGMA_API_BASE_URL";
/// Optional override for the report directory
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
/// Optional override for the per-report page cap
pub const ENV_MAX_PAGES: &str = "MAX_PAGES";

/// Header carrying the API token
pub const TOKEN_HEADER: &str = "X-FIGMA-TOKEN";

/// Default analytics API root
pub const DEFAULT_BASE_URL: &str = "https://api.figma.com/v1/analytics/libraries";
/// Default report directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Default per-report page cap
pub const DEFAULT_MAX_PAGES: usize = 10_000;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validated configuration for one export run
#[derive(Clone)]
pub struct AnalyticsConfig {
    /// API token sent as `X-FIGMA-TOKEN`
    pub access_token: String,
    /// Key of the library file to report on
    pub file_key: String,
    /// First day of the reporting range
    pub start_date: NaiveDate,
    /// Last day of the reporting range
    pub end_date: NaiveDate,
    /// Analytics API root, without the file key
    pub base_url: Url,
    /// Directory reports are written into
    pub output_dir: PathBuf,
    /// Maximum pages fetched for a single report
    pub max_pages: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl AnalyticsConfig {
    /// Create a config with default base URL, output directory and limits
    pub fn new(
        access_token: impl Into<String>,
        file_key: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        let config = Self {
            access_token: access_token.into(),
            file_key: file_key.into(),
            start_date,
            end_date,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(30),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// variables already set in the environment take precedence over it.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(&StringMap::new())
    }

    /// Load configuration from the environment, preferring `overrides`
    pub fn from_env_with(overrides: &StringMap) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| {
            overrides
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        })
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(Error::missing_field(key)),
            }
        };

        let access_token = required(ENV_ACCESS_TOKEN)?;
        let file_key = required(ENV_FILE_KEY)?;
        let start_date = parse_date(ENV_START_DATE, &required(ENV_START_DATE)?)?;
        let end_date = parse_date(ENV_END_DATE, &required(ENV_END_DATE)?)?;

        let mut config = Self::new(access_token, file_key, start_date, end_date)?;

        if let Some(base) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = parse_base_url(base.trim())?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(max) = lookup(ENV_MAX_PAGES).filter(|v| !v.trim().is_empty()) {
            config.max_pages = max
                .trim()
                .parse()
                .map_err(|e| Error::invalid_value(ENV_MAX_PAGES, format!("{e}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        self.validate()?;
        Ok(self)
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the per-report page cap
    pub fn with_max_pages(mut self, max_pages: usize) -> Result<Self> {
        self.max_pages = max_pages;
        self.validate()?;
        Ok(self)
    }

    /// Headers that authenticate every analytics request
    pub fn auth_headers(&self) -> StringMap {
        let mut headers = StringMap::new();
        headers.insert(TOKEN_HEADER.to_string(), self.access_token.clone());
        headers
    }

    /// Check invariants that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::missing_field(ENV_ACCESS_TOKEN));
        }
        if self.file_key.trim().is_empty() {
            return Err(Error::missing_field(ENV_FILE_KEY));
        }
        if self.file_key.contains('/') {
            return Err(Error::invalid_value(
                ENV_FILE_KEY,
                "file key must be a single path segment",
            ));
        }
        if self.start_date > self.end_date {
            return Err(Error::invalid_value(
                ENV_START_DATE,
                format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            ));
        }
        if self.max_pages == 0 {
            return Err(Error::invalid_value(ENV_MAX_PAGES, "must be at least 1"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AnalyticsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsConfig")
            .field("access_token", &"<redacted>")
            .field("file_key", &self.file_key)
            .field("start_date", &self.start_date)
            .field("end_date", &self.end_date)
            .field("base_url", &self.base_url.as_str())
            .field("output_dir", &self.output_dir)
            .field("max_pages", &self.max_pages)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        Error::invalid_value(field, format!("expected YYYY-MM-DD, got '{value}': {e}"))
    })
}

fn parse_base_url(value: &str) -> Result<Url> {
    let url = Url::parse(value)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_value(
            ENV_BASE_URL,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_value(ENV_BASE_URL, "not a base URL"));
    }
    Ok(url)
}
