// storefront/src/error.rs

//! Error types shared by the gateway client and every flow.
//!
//! Every failure a flow can observe funnels through [`ApiError`] (anything the
//! gateway or the transport reports) or [`StorefrontError`] (client-side
//! validation and configuration problems), so that turning an error into a
//! line of UI text is done in exactly one place: [`error_message`].

use crate::models::ErrorResponse;
use reqwest::StatusCode;
use thiserror::Error;

/// Shown when an error carries no usable text at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
  /// The gateway answered with a non-2xx status.
  #[error("{message}")]
  Http {
    status: u16,
    message: String,
    payload: Option<ErrorResponse>,
  },

  /// The gateway could not be reached at all. Always reports status 0.
  #[error("Unable to reach the gateway at {url}. Check that the service is running. ({reason})")]
  Unreachable { url: String, reason: String },

  /// Anything else reqwest reports (body decoding, redirects, ...), passed through as-is.
  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

impl ApiError {
  /// Builds the error for a non-2xx response from its raw body.
  ///
  /// A body of the shape `{error, message}` is kept as the structured payload;
  /// anything else falls back to `"HTTP <status>: <reason>"`.
  pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
    let fallback = format!(
      "HTTP {}: {}",
      status.as_u16(),
      status.canonical_reason().unwrap_or("Unknown Status")
    );

    match serde_json::from_slice::<ErrorResponse>(body) {
      Ok(payload) => {
        let message = payload
          .error
          .as_deref()
          .filter(|e| !e.is_empty())
          .map(str::to_string)
          .unwrap_or(fallback);
        ApiError::Http {
          status: status.as_u16(),
          message,
          payload: Some(payload),
        }
      }
      Err(_) => ApiError::Http {
        status: status.as_u16(),
        message: fallback,
        payload: None,
      },
    }
  }

  /// Shorthand used by in-memory gateways that never see a raw body.
  pub fn http(status: u16, payload: Option<ErrorResponse>) -> Self {
    let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = payload
      .as_ref()
      .and_then(|p| serde_json::to_vec(p).ok())
      .unwrap_or_default();
    Self::from_response(code, &body)
  }

  /// HTTP status of the failure; 0 when no response was received.
  pub fn status(&self) -> u16 {
    match self {
      ApiError::Http { status, .. } => *status,
      ApiError::Unreachable { .. } => 0,
      ApiError::Transport(err) => err.status().map_or(0, |s| s.as_u16()),
    }
  }

  pub fn payload(&self) -> Option<&ErrorResponse> {
    match self {
      ApiError::Http { payload, .. } => payload.as_ref(),
      _ => None,
    }
  }

  /// The text a user should see: the server's `message` when it sent one,
  /// otherwise this error's own message.
  pub fn user_message(&self) -> String {
    self
      .payload()
      .and_then(|p| p.message.as_deref())
      .filter(|m| !m.is_empty())
      .map(str::to_string)
      .unwrap_or_else(|| self.to_string())
  }
}

#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error(transparent)]
  Api(#[from] ApiError),

  /// A flow operation was invoked without what it needs (session id, cart line, account).
  #[error("{0}")]
  Validation(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error(transparent)]
  Other(#[from] anyhow::Error),
}

impl StorefrontError {
  pub fn validation(message: impl Into<String>) -> Self {
    StorefrontError::Validation(message.into())
  }

  pub fn user_message(&self) -> String {
    error_message(self)
  }
}

/// Extracts the line of text to render for any error.
///
/// Gateway errors yield their structured message when present, other errors
/// yield their display text, and an error with no text yields
/// [`UNKNOWN_ERROR_MESSAGE`].
pub fn error_message(err: &(dyn std::error::Error + 'static)) -> String {
  if let Some(api) = err.downcast_ref::<ApiError>() {
    return api.user_message();
  }
  if let Some(StorefrontError::Api(api)) = err.downcast_ref::<StorefrontError>() {
    return api.user_message();
  }

  let text = err.to_string();
  if text.trim().is_empty() {
    UNKNOWN_ERROR_MESSAGE.to_string()
  } else {
    text
  }
}

pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;
