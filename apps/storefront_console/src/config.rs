// storefront_console/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use storefront::{ExecutionContext, StorefrontConfig, StorefrontError, UserId};

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Which gateway URL variable applies (`STOREFRONT_CONTEXT=server|browser`).
  pub context: ExecutionContext,
  /// User id to start the session with (`STOREFRONT_USER_ID`).
  pub initial_user_id: Option<UserId>,
  pub storefront: StorefrontConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());

    let context = match get_env("STOREFRONT_CONTEXT") {
      Some(raw) => raw
        .parse::<ExecutionContext>()
        .map_err(config_error)?,
      None => ExecutionContext::default(),
    };

    let initial_user_id = get_env("STOREFRONT_USER_ID")
      .map(|raw| {
        raw
          .trim()
          .parse::<UserId>()
          .map_err(|e| AppError::Config(format!("Invalid STOREFRONT_USER_ID: {}", e)))
      })
      .transpose()?;

    let storefront = StorefrontConfig::from_lookup(context, &lookup).map_err(config_error)?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      context,
      initial_user_id,
      storefront,
    })
  }
}

fn config_error(err: StorefrontError) -> AppError {
  match err {
    StorefrontError::Config(message) => AppError::Config(message),
    other => AppError::from(other),
  }
}
