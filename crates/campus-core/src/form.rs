//! A contact-form submission about a building.
//!
//! Anyone may submit one; reading them back requires authentication.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{Policy, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
  #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
  pub name:        Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:       Option<Value>,
  #[serde(rename = "texto", skip_serializing_if = "Option::is_none")]
  pub text:        Option<Value>,
  #[serde(rename = "buildingId", skip_serializing_if = "Option::is_none")]
  pub building_id: Option<Value>,
}

impl Resource for Form {
  const COLLECTION: &'static str = "forms";
  const NAME: &'static str = "Form";
  const FIELDS: &'static [&'static str] =
    &["nombre", "email", "texto", "buildingId"];
  const POLICY: Policy = Policy::PUBLIC_SUBMIT;
}
