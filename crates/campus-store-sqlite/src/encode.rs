//! Encoding and decoding helpers between documents and SQLite columns.
//!
//! Ids are UUIDv4 in simple (unhyphenated) form. Fields are compact JSON.

use campus_core::document::{Document, DocumentId, Fields};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

pub fn new_id() -> DocumentId { Uuid::new_v4().simple().to_string() }

pub fn encode_fields(fields: &Fields) -> Result<String> {
  Ok(serde_json::to_string(fields)?)
}

/// `fields` parsed as an object, or `None` if it holds some other JSON value.
pub fn decode_fields(s: &str) -> serde_json::Result<Option<Fields>> {
  match serde_json::from_str(s)? {
    Value::Object(fields) => Ok(Some(fields)),
    _ => Ok(None),
  }
}

/// JSON path naming a top-level field. The key is quoted so names with dots
/// or dashes address a single field.
pub fn field_path(field: &str) -> String { format!("$.\"{field}\"") }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `documents` row.
pub struct RawDocument {
  pub id:     String,
  pub fields: String,
}

impl RawDocument {
  pub fn into_document(self, collection: &str) -> Result<Document> {
    let fields = decode_fields(&self.fields)?.ok_or_else(|| Error::NotAnObject {
      collection: collection.to_owned(),
      id:         self.id.clone(),
    })?;
    Ok(Document { id: self.id, fields })
  }
}
