use std::net::SocketAddr;
use std::time::Duration;

use laudos_completion::client::{ClientConfig, DEFAULT_BASE_URL};
use laudos_completion::retry::RetryPolicy;
use laudos_report::assist::DEFAULT_ASSIST_MODEL;
use laudos_report::orchestrator::{DEFAULT_REPORT_MODEL, ReportSettings};

use crate::error::ConfigError;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";
const DEFAULT_SITE_NAME: &str = "Laudos.AI";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Everything the server reads from the environment, resolved once at
/// start-up.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: String,
    pub site_url: String,
    pub site_name: String,
    /// Absent means report generation fails per request; the server still
    /// starts so the editor assistants keep working.
    pub system_prompt: Option<String>,
    pub report_model: String,
    pub assist_model: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let api_key =
            get("OPENROUTER_API_KEY").ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;

        let timeout_secs = match get("COMPLETION_TIMEOUT_SECS") {
            Some(v) => parse_number::<u64>("COMPLETION_TIMEOUT_SECS", &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "COMPLETION_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let max_retries = match get("COMPLETION_MAX_RETRIES") {
            Some(v) => parse_number::<u32>("COMPLETION_MAX_RETRIES", &v)?,
            None => 0,
        };

        let bind_raw = or("LAUDOS_BIND", DEFAULT_BIND);
        let bind = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "LAUDOS_BIND",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            base_url: or("COMPLETION_BASE_URL", DEFAULT_BASE_URL),
            site_url: or("SITE_URL", DEFAULT_SITE_URL),
            site_name: or("SITE_NAME", DEFAULT_SITE_NAME),
            system_prompt: get("RADIOLOGY_SYSTEM_PROMPT"),
            report_model: or("REPORT_MODEL", DEFAULT_REPORT_MODEL),
            assist_model: or("ASSIST_MODEL", DEFAULT_ASSIST_MODEL),
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
            bind,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            site_url: self.site_url.clone(),
            site_name: self.site_name.clone(),
            timeout: self.timeout,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.max_retries == 0 {
            RetryPolicy::none()
        } else {
            RetryPolicy::with_retries(self.max_retries)
        }
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings::new(self.system_prompt.clone()).with_model(self.report_model.clone())
    }
}

fn parse_number<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
