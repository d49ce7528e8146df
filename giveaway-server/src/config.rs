//! Relay configuration
//!
//! Defines all configurable parameters of the relay: listen address, Apify
//! connection settings, result-count bounds and run resolution timing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::service::backoff::{BackoffPolicy, ExponentialBackoff, FixedBackoff};
use crate::service::resolver::ResolverOptions;
use crate::service::run_service::LimitPolicy;

/// Comment scraper actor started by `/start`
pub const DEFAULT_ACTOR_ID: &str = "SbK00X0JYCPblD2wp";

/// Environment variables checked for the Apify token, first set wins
const TOKEN_VARS: [&str; 3] = ["APIFY_API_TOKEN", "APIFY_TOKEN", "APIFY"];

/// How the wait between status checks evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    Fixed,
    Exponential,
}

impl std::str::FromStr for BackoffKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BackoffKind::Fixed),
            "exponential" => Ok(BackoffKind::Exponential),
            other => bail!("unknown backoff kind '{}' (expected fixed or exponential)", other),
        }
    }
}

/// Relay configuration
#[derive(Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Apify API base URL
    pub apify_base_url: String,

    /// Apify bearer token; the server starts without one but cannot start runs
    pub apify_token: Option<String>,

    /// Actor started for each scrape
    pub actor_id: String,

    /// Timeout for each outbound request
    pub http_timeout: Duration,

    /// Result count used when the caller does not send one
    pub default_results_limit: u32,

    /// Highest result count forwarded to the actor
    pub max_results_limit: u32,

    /// Status checks before `/winners` gives up
    pub max_status_attempts: u32,

    /// Base wait between status checks
    pub poll_interval: Duration,

    pub poll_backoff: BackoffKind,

    /// Cap for exponential backoff
    pub poll_backoff_max: Duration,

    /// Wait before re-reading a missing dataset id
    pub dataset_retry_delay: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("apify_base_url", &self.apify_base_url)
            .field("has_token", &self.apify_token.is_some())
            .field("actor_id", &self.actor_id)
            .field("http_timeout", &self.http_timeout)
            .field("default_results_limit", &self.default_results_limit)
            .field("max_results_limit", &self.max_results_limit)
            .field("max_status_attempts", &self.max_status_attempts)
            .field("poll_interval", &self.poll_interval)
            .field("poll_backoff", &self.poll_backoff)
            .field("poll_backoff_max", &self.poll_backoff_max)
            .field("dataset_retry_delay", &self.dataset_retry_delay)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            apify_base_url: giveaway_client::DEFAULT_BASE_URL.to_string(),
            apify_token: None,
            actor_id: DEFAULT_ACTOR_ID.to_string(),
            http_timeout: Duration::from_secs(30),
            default_results_limit: 2,
            max_results_limit: 500,
            max_status_attempts: 20,
            poll_interval: Duration::from_secs(3),
            poll_backoff: BackoffKind::Fixed,
            poll_backoff_max: Duration::from_secs(30),
            dataset_retry_delay: Duration::from_secs(2),
        }
    }
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - PORT (default: 8080) or BIND_ADDR (full address, wins over PORT)
    /// - APIFY_API_TOKEN / APIFY_TOKEN / APIFY
    /// - APIFY_BASE_URL (default: https://api.apify.com/v2)
    /// - APIFY_ACTOR_ID (default: SbK00X0JYCPblD2wp)
    /// - HTTP_TIMEOUT (seconds, default: 30)
    /// - DEFAULT_RESULTS_LIMIT (default: 2)
    /// - MAX_RESULTS_LIMIT (default: 500)
    /// - MAX_STATUS_ATTEMPTS (default: 20)
    /// - POLL_INTERVAL_MS (default: 3000)
    /// - POLL_BACKOFF (fixed | exponential, default: fixed)
    /// - POLL_BACKOFF_MAX_MS (default: 30000)
    /// - DATASET_RETRY_DELAY_MS (default: 2000)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    ///
    /// Blank values count as unset. Values that are set but do not parse are
    /// an error rather than silently replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match (get("BIND_ADDR"), get("PORT")) {
            (Some(addr), _) => addr,
            (None, Some(port)) => {
                let port: u16 = parse_var("PORT", &port)?;
                format!("0.0.0.0:{}", port)
            }
            (None, None) => defaults.bind_addr,
        };

        let apify_token = TOKEN_VARS.iter().find_map(|key| get(*key));

        let millis = |key: &str, default: Duration| -> anyhow::Result<Duration> {
            get(key)
                .map(|v| parse_var::<u64>(key, &v).map(Duration::from_millis))
                .unwrap_or(Ok(default))
        };

        let number = |key: &str, default: u32| -> anyhow::Result<u32> {
            get(key)
                .map(|v| parse_var::<u32>(key, &v))
                .unwrap_or(Ok(default))
        };

        let http_timeout = get("HTTP_TIMEOUT")
            .map(|v| parse_var::<u64>("HTTP_TIMEOUT", &v).map(Duration::from_secs))
            .unwrap_or(Ok(defaults.http_timeout))?;

        let poll_backoff = get("POLL_BACKOFF")
            .map(|v| v.parse::<BackoffKind>().context("Invalid POLL_BACKOFF"))
            .unwrap_or(Ok(defaults.poll_backoff))?;

        Ok(Self {
            bind_addr,
            apify_base_url: get("APIFY_BASE_URL").unwrap_or(defaults.apify_base_url),
            apify_token,
            actor_id: get("APIFY_ACTOR_ID").unwrap_or(defaults.actor_id),
            http_timeout,
            default_results_limit: number("DEFAULT_RESULTS_LIMIT", defaults.default_results_limit)?,
            max_results_limit: number("MAX_RESULTS_LIMIT", defaults.max_results_limit)?,
            max_status_attempts: number("MAX_STATUS_ATTEMPTS", defaults.max_status_attempts)?,
            poll_interval: millis("POLL_INTERVAL_MS", defaults.poll_interval)?,
            poll_backoff,
            poll_backoff_max: millis("POLL_BACKOFF_MAX_MS", defaults.poll_backoff_max)?,
            dataset_retry_delay: millis("DATASET_RETRY_DELAY_MS", defaults.dataset_retry_delay)?,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            bail!("bind_addr cannot be empty");
        }

        if !self.apify_base_url.starts_with("http://")
            && !self.apify_base_url.starts_with("https://")
        {
            bail!("apify_base_url must start with http:// or https://");
        }

        if self.actor_id.trim().is_empty() {
            bail!("actor_id cannot be empty");
        }

        if self.http_timeout.is_zero() {
            bail!("http_timeout must be greater than 0");
        }

        if self.max_results_limit == 0 {
            bail!("max_results_limit must be greater than 0");
        }

        if self.default_results_limit == 0 || self.default_results_limit > self.max_results_limit
        {
            bail!(
                "default_results_limit must be between 1 and {}",
                self.max_results_limit
            );
        }

        if self.max_status_attempts == 0 {
            bail!("max_status_attempts must be at least 1");
        }

        if self.poll_interval.is_zero() {
            bail!("poll_interval must be greater than 0");
        }

        if self.poll_backoff == BackoffKind::Exponential && self.poll_backoff_max < self.poll_interval
        {
            bail!("poll_backoff_max must not be below poll_interval");
        }

        Ok(())
    }

    pub fn limit_policy(&self) -> LimitPolicy {
        LimitPolicy {
            default: self.default_results_limit,
            max: self.max_results_limit,
        }
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            max_status_attempts: self.max_status_attempts,
            dataset_retry_delay: self.dataset_retry_delay,
        }
    }

    pub fn backoff_policy(&self) -> Arc<dyn BackoffPolicy> {
        match self.poll_backoff {
            BackoffKind::Fixed => Arc::new(FixedBackoff::new(self.poll_interval)),
            BackoffKind::Exponential => Arc::new(ExponentialBackoff::new(
                self.poll_interval,
                self.poll_backoff_max,
            )),
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for {}: '{}'", key, value))
}
