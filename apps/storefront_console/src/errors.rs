// storefront_console/src/errors.rs

use storefront::StorefrontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  /// The typed line could not be understood. The message is shown as-is.
  #[error("{0}")]
  Command(String),

  #[error("{}", .source.user_message())]
  Storefront {
    #[from]
    source: StorefrontError,
  },
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
