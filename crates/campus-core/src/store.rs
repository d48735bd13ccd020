//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends ([`crate::memory::MemoryStore`]
//! and `campus-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::document::{Document, DocumentId, Fields, Patch};

/// Abstraction over a collection-oriented document store.
///
/// Every document lives in exactly one named collection and carries an
/// identifier assigned by the store on [`add`](Self::add).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every document in `collection`, in store-defined order.
  fn list<'a>(
    &'a self,
    collection: &'a str,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Documents in `collection` whose top-level `field` equals `value`.
  fn find_by<'a>(
    &'a self,
    collection: &'a str,
    field: &'a str,
    value: &'a Value,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Retrieve one document. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send + 'a;

  /// Persist a new document and return its freshly assigned identifier.
  fn add<'a>(
    &'a self,
    collection: &'a str,
    fields: Fields,
  ) -> impl Future<Output = Result<DocumentId, Self::Error>> + Send + 'a;

  /// Apply `patch` to an existing document.
  ///
  /// Returns `false`, and writes nothing, if the document does not exist.
  /// Fields the patch maps to `None` are removed from the stored document.
  fn update<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
    patch: Patch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Delete a document. Returns `false` if it did not exist.
  fn delete<'a>(
    &'a self,
    collection: &'a str,
    id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
