//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure is answered with a plain-text body.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// An error returned by an API handler or by the authentication gate.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or malformed `Authorization` header.
  #[error("Unauthorized")]
  Unauthorized,

  /// The identity provider refused the bearer token.
  #[error("Invalid token")]
  InvalidToken,

  /// A body that is not a JSON object.
  #[error("{0}")]
  BadRequest(String),

  /// Carries the resource name, e.g. `"Building"`.
  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("{context}: {source}")]
  Store {
    context: String,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },

  /// An identity-provider call failed; carries the user-facing message.
  #[error("{0}")]
  Identity(&'static str),

  /// The provider's own reason for refusing a sign-in.
  #[error("{0}")]
  LoginRejected(String),
}

impl ApiError {
  /// Map a store failure to a 500 prefixed with `context`.
  pub fn store<E>(context: impl Into<String>) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Store {
      context: context.into(),
      source:  Box::new(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Unauthorized | ApiError::InvalidToken | ApiError::LoginRejected(_) => {
        StatusCode::UNAUTHORIZED
      }
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store { .. } | ApiError::Identity(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let challenge = matches!(self, ApiError::Unauthorized | ApiError::InvalidToken);
    let mut res = (status, self.to_string()).into_response();
    if challenge {
      res
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    res
  }
}
