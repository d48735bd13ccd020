//! Handler for `POST /login`.
//!
//! A pure proxy to the identity provider's password sign-in. The service never
//! inspects the credentials itself.

use axum::{Json, body::Bytes, extract::State};
use campus_core::{
  identity::{IdentityError, IdentityProvider},
  store::DocumentStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Missing fields are forwarded as empty strings and left for the provider
/// to refuse.
#[derive(Default, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub email:    String,
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
  pub token: String,
}

/// `POST /login`, body: `{"email":"...","password":"..."}`
///
/// Every failure, including an unreadable body, is a 401.
pub async fn handler<S, I>(
  State(state): State<AppState<S, I>>,
  body: Bytes,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let body = if body.is_empty() {
    LoginBody::default()
  } else {
    serde_json::from_slice(&body).map_err(|e| {
      tracing::debug!(error = %e, "unreadable login body");
      ApiError::LoginRejected("Login failed".to_owned())
    })?
  };

  match state.identity.sign_in(&body.email, &body.password).await {
    Ok(token) => Ok(Json(LoginResponse { token })),
    Err(IdentityError::Rejected(message)) => Err(ApiError::LoginRejected(message)),
    Err(e) => {
      tracing::warn!(error = %e, "login failed");
      Err(ApiError::LoginRejected("Login failed".to_owned()))
    }
  }
}
