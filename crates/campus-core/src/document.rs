//! Documents: a store-assigned identifier plus an arbitrary field map.
//!
//! The store knows nothing about buildings or floors. It holds JSON objects
//! grouped into named collections; typed records live in [`crate::resource`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier assigned by the owning store, never by the client.
pub type DocumentId = String;

/// The top-level fields of a document.
pub type Fields = serde_json::Map<String, Value>;

/// One stored document. Serialises as `{ "id": ..., ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub id:     DocumentId,
  #[serde(flatten)]
  pub fields: Fields,
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A set of field writes against an existing document.
///
/// `Some(value)` sets the field, `None` removes it. Keys not named in the
/// patch are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(BTreeMap<String, Option<Value>>);

impl Patch {
  pub fn new() -> Self { Self::default() }

  pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
    self.0.insert(field.into(), Some(value));
    self
  }

  pub fn remove(mut self, field: impl Into<String>) -> Self {
    self.0.insert(field.into(), None);
    self
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
  }

  /// Apply every write in this patch to `fields` in place.
  pub fn apply_to(&self, fields: &mut Fields) {
    for (key, value) in &self.0 {
      match value {
        Some(v) => {
          fields.insert(key.clone(), v.clone());
        }
        None => {
          fields.remove(key);
        }
      }
    }
  }
}

impl FromIterator<(String, Option<Value>)> for Patch {
  fn from_iter<T: IntoIterator<Item = (String, Option<Value>)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}
