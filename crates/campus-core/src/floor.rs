//! One storey of a building, rendered from one or more models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{Policy, Resource};

/// Wire key of [`Floor::building_id`], used for the by-building filter.
pub const BUILDING_ID_FIELD: &str = "buildingId";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
  #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
  pub name:        Option<Value>,
  #[serde(rename = "urlModelos", skip_serializing_if = "Option::is_none")]
  pub model_urls:  Option<Value>,
  #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
  pub description: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scale:       Option<Value>,
  #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
  pub active:      Option<Value>,
  /// Identifier of the owning building. Never checked for existence.
  #[serde(rename = "buildingId", skip_serializing_if = "Option::is_none")]
  pub building_id: Option<Value>,
}

impl Resource for Floor {
  const COLLECTION: &'static str = "floors";
  const NAME: &'static str = "Floor";
  const FIELDS: &'static [&'static str] = &[
    "nombre",
    "urlModelos",
    "descripcion",
    "scale",
    "activo",
    BUILDING_ID_FIELD,
  ];
  const POLICY: Policy = Policy::PUBLIC_READ;

  fn with_defaults(mut self) -> Self {
    self.model_urls.get_or_insert_with(|| Value::Array(Vec::new()));
    self.active.get_or_insert(Value::Bool(true));
    self
  }
}
