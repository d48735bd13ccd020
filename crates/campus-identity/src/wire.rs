//! Request and response bodies of the Identity Toolkit v1 `accounts:*` API.

use campus_core::identity::UserRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest<'a> {
  pub email:               &'a str,
  pub password:            &'a str,
  pub return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
  pub id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
  pub id_token: &'a str,
}

#[derive(Deserialize)]
pub struct LookupResponse {
  #[serde(default)]
  pub users: Vec<RawUser>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest<'a> {
  pub email:        &'a str,
  pub password:     &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest<'a> {
  pub id_token:            &'a str,
  pub password:            &'a str,
  pub return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest<'a> {
  pub id_token: &'a str,
}

/// `{"error": {"code": 400, "message": "INVALID_PASSWORD"}}`
#[derive(Deserialize)]
pub struct ErrorResponse {
  pub error: ErrorDetail,
}

#[derive(Deserialize)]
pub struct ErrorDetail {
  pub message: String,
}

/// A user as returned by `accounts:lookup` and `accounts:signUp`.
///
/// Timestamps arrive as millisecond epoch strings.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
  pub local_id:       String,
  pub email:          Option<String>,
  pub display_name:   Option<String>,
  #[serde(default)]
  pub email_verified: bool,
  #[serde(default)]
  pub disabled:       bool,
  pub created_at:     Option<String>,
  pub last_login_at:  Option<String>,
}

fn decode_millis(s: &str) -> Option<DateTime<Utc>> {
  s.parse::<i64>().ok().and_then(DateTime::<Utc>::from_timestamp_millis)
}

impl RawUser {
  pub fn into_record(self) -> UserRecord {
    UserRecord {
      uid:            self.local_id,
      email:          self.email,
      display_name:   self.display_name,
      email_verified: self.email_verified,
      disabled:       self.disabled,
      created_at:     self.created_at.as_deref().and_then(decode_millis),
      last_login_at:  self.last_login_at.as_deref().and_then(decode_millis),
    }
  }
}
