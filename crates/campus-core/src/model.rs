use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::{Policy, Resource};

/// A 3D model reference, shown in the viewer unless `visible` is false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url:     Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label:   Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub visible: Option<Value>,
}

impl Resource for Model {
  const COLLECTION: &'static str = "models";
  const NAME: &'static str = "Model";
  const FIELDS: &'static [&'static str] = &["url", "label", "visible"];
  const POLICY: Policy = Policy::PUBLIC;

  fn with_defaults(mut self) -> Self {
    self.visible.get_or_insert(Value::Bool(true));
    self
  }
}
