//! Handlers for `/user` endpoints. Every route requires authentication.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/user` | The caller's own provider record |
//! | `POST`   | `/user` | Body: `{"email","password","displayName"}`; 201 |
//! | `PUT`    | `/user/password` | Body: `{"newPassword":"..."}` |
//! | `DELETE` | `/user` | Deletes the caller |

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
  routing::{get, put},
};
use campus_core::{
  identity::{IdentityProvider, NewUser, UserRecord},
  store::DocumentStore,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{self, Authenticated},
  error::ApiError,
};

pub fn routes<S, I>(state: &AppState<S, I>) -> Router<AppState<S, I>>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let router = Router::new()
    .route(
      "/user",
      get(get_self::<S, I>)
        .post(create::<S, I>)
        .delete(delete_self::<S, I>),
    )
    .route("/user/password", put(update_password::<S, I>));
  auth::protect(router, state)
}

/// `GET /user`
pub async fn get_self<S, I>(
  State(state): State<AppState<S, I>>,
  Authenticated(identity): Authenticated,
) -> Result<Json<UserRecord>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let user = state.identity.get_user(&identity).await.map_err(|e| {
    tracing::warn!(error = %e, uid = %identity.uid, "get user failed");
    ApiError::Identity("Error getting user")
  })?;
  Ok(Json(user))
}

/// `POST /user`: returns 201 with the provider's new user record.
pub async fn create<S, I>(
  State(state): State<AppState<S, I>>,
  Authenticated(_): Authenticated,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let user = state.identity.create_user(body).await.map_err(|e| {
    tracing::warn!(error = %e, "create user failed");
    ApiError::Identity("Error creating user")
  })?;
  Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordBody {
  pub new_password: String,
}

/// `PUT /user/password`
pub async fn update_password<S, I>(
  State(state): State<AppState<S, I>>,
  Authenticated(identity): Authenticated,
  Json(body): Json<PasswordBody>,
) -> Result<&'static str, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  state
    .identity
    .update_password(&identity, &body.new_password)
    .await
    .map_err(|e| {
      tracing::warn!(error = %e, uid = %identity.uid, "password update failed");
      ApiError::Identity("Error updating password")
    })?;
  Ok("Password updated")
}

/// `DELETE /user`
pub async fn delete_self<S, I>(
  State(state): State<AppState<S, I>>,
  Authenticated(identity): Authenticated,
) -> Result<&'static str, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  state.identity.delete_user(&identity).await.map_err(|e| {
    tracing::warn!(error = %e, uid = %identity.uid, "delete user failed");
    ApiError::Identity("Error deleting user")
  })?;
  Ok("User deleted")
}
