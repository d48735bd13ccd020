//! The `IdentityProvider` trait and the identity types it exchanges.
//!
//! Users, passwords and token signing all belong to the provider. The service
//! keeps no local copy of any of it.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Types ───────────────────────────────────────────────────────────────────

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
  /// Provider-assigned, stable user identifier.
  pub uid:   String,
  pub email: Option<String>,
  /// The verified token itself. Self-service user operations are scoped by it.
  #[serde(skip)]
  pub token: String,
}

/// Input to [`IdentityProvider::create_user`].
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub email:        String,
  pub password:     String,
  pub display_name: Option<String>,
}

impl std::fmt::Debug for NewUser {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NewUser")
      .field("email", &self.email)
      .field("display_name", &self.display_name)
      .finish_non_exhaustive()
  }
}

/// A user record as held by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
  pub uid:            String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name:   Option<String>,
  #[serde(default)]
  pub email_verified: bool,
  #[serde(default)]
  pub disabled:       bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at:     Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub last_login_at:  Option<DateTime<Utc>>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum IdentityError {
  /// The provider answered and refused. Carries its message verbatim.
  #[error("{0}")]
  Rejected(String),

  /// The provider could not be reached or answered with something unreadable.
  #[error("identity provider request failed: {0}")]
  Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Capability interface over an external identity service.
///
/// Implementations make exactly one provider round trip per call and never
/// cache results.
pub trait IdentityProvider: Send + Sync {
  /// Verify a bearer token and decode the identity it carries.
  fn verify_token<'a>(
    &'a self,
    token: &'a str,
  ) -> impl Future<Output = Result<Identity, IdentityError>> + Send + 'a;

  /// Exchange email and password for an ID token.
  fn sign_in<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<String, IdentityError>> + Send + 'a;

  fn create_user<'a>(
    &'a self,
    user: NewUser,
  ) -> impl Future<Output = Result<UserRecord, IdentityError>> + Send + 'a;

  /// Fetch the record of the user behind `identity`.
  fn get_user<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<UserRecord, IdentityError>> + Send + 'a;

  fn update_password<'a>(
    &'a self,
    identity: &'a Identity,
    new_password: &'a str,
  ) -> impl Future<Output = Result<(), IdentityError>> + Send + 'a;

  fn delete_user<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<(), IdentityError>> + Send + 'a;
}
