//! Identity Toolkit client for Campus.
//!
//! Implements [`IdentityProvider`] against the Google Identity Toolkit v1 REST
//! API (the backend of Firebase Authentication). Every call authenticates with
//! the project's web API key; self-service calls are further scoped by the
//! caller's own ID token, so no service-account credentials are needed.

mod wire;

pub mod error;

pub use error::{Error, Result};

use std::time::Duration;

use campus_core::identity::{
  Identity, IdentityError, IdentityProvider, NewUser, UserRecord,
};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::{DeserializeOwned, IgnoredAny}};

use wire::{
  DeleteRequest, ErrorResponse, LookupRequest, LookupResponse, RawUser,
  SignInRequest, SignInResponse, SignUpRequest, UpdateRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

fn default_timeout_secs() -> u64 { 30 }

/// Connection settings for the Identity Toolkit API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
  /// Web API key of the project.
  pub api_key:      String,
  /// Override to point at an emulator or a test stub.
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

/// Async client for the Identity Toolkit `accounts:*` endpoints.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct IdentityToolkit {
  client: Client,
  config: IdentityConfig,
}

impl IdentityToolkit {
  pub fn new(config: IdentityConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, method: &str) -> String {
    format!(
      "{}/accounts:{method}",
      self.config.base_url.trim_end_matches('/')
    )
  }

  /// `POST accounts:<method>?key=<api key>` with a JSON body.
  ///
  /// Error bodies carrying a provider message become
  /// [`IdentityError::Rejected`]; anything else is
  /// [`IdentityError::Upstream`].
  async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, IdentityError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let resp = self
      .client
      .post(self.url(method))
      .query(&[("key", self.config.api_key.as_str())])
      .json(body)
      .send()
      .await
      .map_err(upstream)?;

    let status = resp.status();
    if !status.is_success() {
      let detail = resp.json::<ErrorResponse>().await.map_err(upstream)?;
      tracing::debug!(
        method,
        %status,
        message = %detail.error.message,
        "identity provider rejected request"
      );
      return Err(IdentityError::Rejected(detail.error.message));
    }

    resp.json().await.map_err(upstream)
  }

  async fn lookup(&self, id_token: &str) -> Result<RawUser, IdentityError> {
    let resp: LookupResponse = self.call("lookup", &LookupRequest { id_token }).await?;
    resp
      .users
      .into_iter()
      .next()
      .ok_or_else(|| IdentityError::Rejected("USER_NOT_FOUND".to_owned()))
  }
}

fn upstream(e: reqwest::Error) -> IdentityError {
  tracing::warn!(error = %e, "identity provider request failed");
  IdentityError::Upstream(Box::new(e))
}

impl IdentityProvider for IdentityToolkit {
  async fn verify_token(&self, token: &str) -> Result<Identity, IdentityError> {
    let user = self.lookup(token).await?;
    Ok(Identity {
      uid:   user.local_id,
      email: user.email,
      token: token.to_owned(),
    })
  }

  async fn sign_in(&self, email: &str, password: &str) -> Result<String, IdentityError> {
    let resp: SignInResponse = self
      .call(
        "signInWithPassword",
        &SignInRequest {
          email,
          password,
          return_secure_token: true,
        },
      )
      .await?;
    Ok(resp.id_token)
  }

  async fn create_user(&self, user: NewUser) -> Result<UserRecord, IdentityError> {
    let created: RawUser = self
      .call(
        "signUp",
        &SignUpRequest {
          email:        &user.email,
          password:     &user.password,
          display_name: user.display_name.as_deref(),
        },
      )
      .await?;
    Ok(created.into_record())
  }

  async fn get_user(&self, identity: &Identity) -> Result<UserRecord, IdentityError> {
    Ok(self.lookup(&identity.token).await?.into_record())
  }

  async fn update_password(
    &self,
    identity: &Identity,
    new_password: &str,
  ) -> Result<(), IdentityError> {
    let _: IgnoredAny = self
      .call(
        "update",
        &UpdateRequest {
          id_token:            &identity.token,
          password:            new_password,
          return_secure_token: false,
        },
      )
      .await?;
    Ok(())
  }

  async fn delete_user(&self, identity: &Identity) -> Result<(), IdentityError> {
    let _: IgnoredAny = self
      .call("delete", &DeleteRequest { id_token: &identity.token })
      .await?;
    Ok(())
  }
}
