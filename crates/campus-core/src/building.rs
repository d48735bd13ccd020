//! A site with a 3D model and a map position.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{Policy, Resource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
  #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
  pub name:        Option<Value>,
  #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
  pub description: Option<Value>,
  #[serde(rename = "urlModelo", skip_serializing_if = "Option::is_none")]
  pub model_url:   Option<Value>,
  #[serde(rename = "urlWeb", skip_serializing_if = "Option::is_none")]
  pub web_url:     Option<Value>,
  #[serde(rename = "latitud", skip_serializing_if = "Option::is_none")]
  pub latitude:    Option<Value>,
  #[serde(rename = "longitud", skip_serializing_if = "Option::is_none")]
  pub longitude:   Option<Value>,
  /// Free-form location label, e.g. a street address.
  #[serde(rename = "ubicacion", skip_serializing_if = "Option::is_none")]
  pub location:    Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scale:       Option<Value>,
}

impl Resource for Building {
  const COLLECTION: &'static str = "buildings";
  const NAME: &'static str = "Building";
  const FIELDS: &'static [&'static str] = &[
    "nombre",
    "descripcion",
    "urlModelo",
    "urlWeb",
    "latitud",
    "longitud",
    "ubicacion",
    "scale",
  ];
  const POLICY: Policy = Policy::PUBLIC_READ;
}
