//! [`MemoryStore`]: an in-process implementation of [`DocumentStore`].
//!
//! Identifiers are drawn from a per-collection counter that only ever moves
//! forward, so an id is never handed out twice, even after deletions.

use std::{
  collections::{BTreeMap, HashMap},
  convert::Infallible,
};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
  document::{Document, DocumentId, Fields, Patch},
  store::DocumentStore,
};

#[derive(Debug, Default)]
struct Collection {
  last_id:   u64,
  documents: BTreeMap<u64, Fields>,
}

impl Collection {
  fn insert(&mut self, fields: Fields) -> u64 {
    self.last_id += 1;
    self.documents.insert(self.last_id, fields);
    self.last_id
  }

  fn snapshot(&self, id: u64) -> Option<Document> {
    self.documents.get(&id).map(|fields| Document {
      id:     id.to_string(),
      fields: fields.clone(),
    })
  }
}

/// A document store held entirely in memory.
///
/// Documents are listed in ascending id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
  collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed `collection` with `documents`, assigning ids in iteration order.
  pub fn with_documents(
    mut self,
    collection: &str,
    documents: impl IntoIterator<Item = Fields>,
  ) -> Self {
    let entry = self
      .collections
      .get_mut()
      .entry(collection.to_owned())
      .or_default();
    for fields in documents {
      entry.insert(fields);
    }
    self
  }
}

/// Ids are decimal counters; anything else cannot name a document.
fn parse_id(id: &str) -> Option<u64> { id.parse().ok() }

impl DocumentStore for MemoryStore {
  type Error = Infallible;

  async fn list(&self, collection: &str) -> Result<Vec<Document>, Infallible> {
    let collections = self.collections.read().await;
    Ok(
      collections
        .get(collection)
        .map(|c| {
          c.documents
            .keys()
            .filter_map(|id| c.snapshot(*id))
            .collect()
        })
        .unwrap_or_default(),
    )
  }

  async fn find_by(
    &self,
    collection: &str,
    field: &str,
    value: &Value,
  ) -> Result<Vec<Document>, Infallible> {
    let mut documents = self.list(collection).await?;
    documents.retain(|doc| doc.fields.get(field) == Some(value));
    Ok(documents)
  }

  async fn get(
    &self,
    collection: &str,
    id: &str,
  ) -> Result<Option<Document>, Infallible> {
    let Some(id) = parse_id(id) else { return Ok(None) };
    let collections = self.collections.read().await;
    Ok(collections.get(collection).and_then(|c| c.snapshot(id)))
  }

  async fn add(
    &self,
    collection: &str,
    fields: Fields,
  ) -> Result<DocumentId, Infallible> {
    let mut collections = self.collections.write().await;
    let id = collections
      .entry(collection.to_owned())
      .or_default()
      .insert(fields);
    Ok(id.to_string())
  }

  async fn update(
    &self,
    collection: &str,
    id: &str,
    patch: Patch,
  ) -> Result<bool, Infallible> {
    let Some(id) = parse_id(id) else { return Ok(false) };
    let mut collections = self.collections.write().await;
    match collections
      .get_mut(collection)
      .and_then(|c| c.documents.get_mut(&id))
    {
      Some(fields) => {
        patch.apply_to(fields);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<bool, Infallible> {
    let Some(id) = parse_id(id) else { return Ok(false) };
    let mut collections = self.collections.write().await;
    Ok(
      collections
        .get_mut(collection)
        .and_then(|c| c.documents.remove(&id))
        .is_some(),
    )
  }
}
