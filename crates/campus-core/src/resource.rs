//! Typed resource records and their mapping onto documents.
//!
//! Each resource kind is a plain struct of optional fields. A field holds
//! whatever JSON value the client sent; only its presence is significant.
//! The store never sees these types; it only sees the [`Fields`] they
//! serialise to.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  Error, Result,
  document::{Document, DocumentId, Fields, Patch},
};

// ─── Access policy ───────────────────────────────────────────────────────────

/// Whether an operation requires a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Public,
  Authenticated,
}

/// Per-operation access for the five CRUD operations of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
  pub list:   Access,
  pub get:    Access,
  pub create: Access,
  pub update: Access,
  pub delete: Access,
}

impl Policy {
  /// Every operation is public.
  pub const PUBLIC: Self = Self {
    list:   Access::Public,
    get:    Access::Public,
    create: Access::Public,
    update: Access::Public,
    delete: Access::Public,
  };

  /// Reads are public, writes require authentication.
  pub const PUBLIC_READ: Self = Self {
    list:   Access::Public,
    get:    Access::Public,
    create: Access::Authenticated,
    update: Access::Authenticated,
    delete: Access::Authenticated,
  };

  /// Anyone may submit; everything else requires authentication.
  pub const PUBLIC_SUBMIT: Self = Self {
    list:   Access::Authenticated,
    get:    Access::Authenticated,
    create: Access::Public,
    update: Access::Authenticated,
    delete: Access::Authenticated,
  };
}

// ─── Resource ────────────────────────────────────────────────────────────────

/// A kind of record stored in its own collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
  /// Collection the records are stored in.
  const COLLECTION: &'static str;
  /// Human-readable name, e.g. `"Building"`.
  const NAME: &'static str;
  /// Wire keys of every recognised field.
  const FIELDS: &'static [&'static str];
  const POLICY: Policy;

  /// Fill in create-time defaults. The default implementation sets nothing.
  fn with_defaults(self) -> Self { self }

  /// The fields that are present on this record.
  fn to_fields(&self) -> Result<Fields> {
    match serde_json::to_value(self)? {
      Value::Object(fields) => Ok(fields),
      _ => Err(Error::NotAnObject(Self::NAME)),
    }
  }

  /// A patch covering every recognised field.
  ///
  /// Fields absent from `self` map to `None`, so applying the patch removes
  /// them from the stored document. Updates are a full overwrite of the
  /// recognised fields, not a merge.
  fn to_patch(&self) -> Result<Patch> {
    let mut fields = self.to_fields()?;
    Ok(
      Self::FIELDS
        .iter()
        .map(|key| ((*key).to_owned(), fields.remove(*key)))
        .collect(),
    )
  }

  /// Decode stored fields. Unknown keys are ignored.
  fn from_fields(fields: Fields) -> Result<Self> {
    Ok(serde_json::from_value(Value::Object(fields))?)
  }
}

/// A record together with its store-assigned identifier.
///
/// Serialises as `{ "id": ..., ...record }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<R> {
  pub id:     DocumentId,
  #[serde(flatten)]
  pub record: R,
}

impl<R: Resource> Stored<R> {
  pub fn from_document(document: Document) -> Result<Self> {
    Ok(Self {
      id:     document.id,
      record: R::from_fields(document.fields)?,
    })
  }
}
