// storefront/src/config.rs

//! Gateway and flow configuration, read from the environment.
//!
//! The gateway base URL depends on where the client runs: server-side code
//! reads `API_URL` (falling back to [`DEFAULT_SERVER_API_URL`]), browser-side
//! code reads `NEXT_PUBLIC_API_URL`, which has no default.

use crate::error::{Result, StorefrontError};
use crate::state::dismiss::DEFAULT_NOTICE_TTL;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const SERVER_API_URL_VAR: &str = "API_URL";
pub const BROWSER_API_URL_VAR: &str = "NEXT_PUBLIC_API_URL";
pub const DEFAULT_SERVER_API_URL: &str = "http://gateway:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which side of the deployment the client is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
  #[default]
  Server,
  Browser,
}

impl FromStr for ExecutionContext {
  type Err = StorefrontError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "server" => Ok(ExecutionContext::Server),
      "browser" | "client" => Ok(ExecutionContext::Browser),
      other => Err(StorefrontError::Config(format!(
        "Unknown execution context '{}': expected 'server' or 'browser'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct StorefrontConfig {
  pub context: ExecutionContext,
  /// Base URL with no trailing slash.
  pub base_url: String,
  pub request_timeout: Duration,
  /// How long errors and order results stay visible.
  pub notice_ttl: Duration,
}

impl StorefrontConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      context: ExecutionContext::Server,
      base_url: normalize_base_url(&base_url.into()),
      request_timeout: DEFAULT_REQUEST_TIMEOUT,
      notice_ttl: DEFAULT_NOTICE_TTL,
    }
  }

  pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
    self.notice_ttl = ttl;
    self
  }

  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  /// Loads `.env` if present, then reads the process environment.
  pub fn from_env(context: ExecutionContext) -> Result<Self> {
    dotenvy::dotenv().ok();
    Self::from_lookup(context, |name| env::var(name).ok())
  }

  /// Same as [`StorefrontConfig::from_env`] with an injectable variable source.
  pub fn from_lookup(context: ExecutionContext, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let base_url = match context {
      ExecutionContext::Server => get(SERVER_API_URL_VAR).unwrap_or_else(|| DEFAULT_SERVER_API_URL.to_string()),
      ExecutionContext::Browser => get(BROWSER_API_URL_VAR).ok_or_else(|| {
        StorefrontError::Config(format!("Missing environment variable '{}'", BROWSER_API_URL_VAR))
      })?,
    };

    let request_timeout = match get("GATEWAY_TIMEOUT_SECS") {
      Some(raw) => Duration::from_secs(
        raw
          .parse::<u64>()
          .map_err(|e| StorefrontError::Config(format!("Invalid GATEWAY_TIMEOUT_SECS: {}", e)))?,
      ),
      None => DEFAULT_REQUEST_TIMEOUT,
    };

    let notice_ttl = match get("NOTICE_DISMISS_MS") {
      Some(raw) => Duration::from_millis(
        raw
          .parse::<u64>()
          .map_err(|e| StorefrontError::Config(format!("Invalid NOTICE_DISMISS_MS: {}", e)))?,
      ),
      None => DEFAULT_NOTICE_TTL,
    };

    tracing::info!(?context, base_url = %base_url, "Storefront configuration loaded.");

    Ok(Self {
      context,
      base_url: normalize_base_url(&base_url),
      request_timeout,
      notice_ttl,
    })
  }
}

fn normalize_base_url(raw: &str) -> String {
  raw.trim().trim_end_matches('/').to_string()
}
