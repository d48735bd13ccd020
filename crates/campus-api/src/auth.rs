//! Bearer-token gate and the [`Authenticated`] extractor.
//!
//! The gate runs as route middleware in front of protected handlers. It never
//! lets a request through without a token the identity provider has just
//! verified; there is no cache and no retry.

use axum::{
  Router,
  extract::{FromRequestParts, Request, State},
  http::{HeaderMap, header, request::Parts},
  middleware::{self, Next},
  response::Response,
};
use campus_core::{
  identity::{Identity, IdentityProvider},
  store::DocumentStore,
};

use crate::{AppState, error::ApiError};

/// Extract `<token>` from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  header_val
    .strip_prefix("Bearer ")
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .ok_or(ApiError::Unauthorized)
}

/// Middleware: verify the bearer token and attach the [`Identity`].
pub async fn require_identity<S, I>(
  State(state): State<AppState<S, I>>,
  mut req: Request,
  next: Next,
) -> Result<Response, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let token = bearer_token(req.headers())?.to_owned();

  let identity = state
    .identity
    .verify_token(&token)
    .await
    .map_err(|e| {
      tracing::debug!(error = %e, "bearer token rejected");
      ApiError::InvalidToken
    })?;

  tracing::debug!(uid = %identity.uid, "request authenticated");
  req.extensions_mut().insert(identity);
  Ok(next.run(req).await)
}

/// Put every route already added to `router` behind [`require_identity`].
pub fn protect<S, I>(
  router: Router<AppState<S, I>>,
  state: &AppState<S, I>,
) -> Router<AppState<S, I>>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  router.route_layer(middleware::from_fn_with_state(
    state.clone(),
    require_identity::<S, I>,
  ))
}

/// The verified caller. Only available behind [`require_identity`].
pub struct Authenticated(pub Identity);

impl<St> FromRequestParts<St> for Authenticated
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &St,
  ) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<Identity>()
      .cloned()
      .map(Authenticated)
      .ok_or(ApiError::Unauthorized)
  }
}
