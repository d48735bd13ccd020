//! [`SqliteStore`]: the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use serde_json::Value;

use campus_core::{
  document::{Document, DocumentId, Fields, Patch},
  store::DocumentStore,
};

use crate::{
  Error, Result,
  encode::{RawDocument, decode_fields, encode_fields, field_path, new_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Campus document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT id, fields ...` query and decode every row.
  async fn query_documents(
    &self,
    collection: &str,
    sql: &'static str,
    params: Vec<String>,
  ) -> Result<Vec<Document>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawDocument {
              id:     row.get(0)?,
              fields: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_document(collection))
      .collect()
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = Error;

  async fn list(&self, collection: &str) -> Result<Vec<Document>> {
    self
      .query_documents(
        collection,
        "SELECT id, fields FROM documents WHERE collection = ?1 ORDER BY rowid",
        vec![collection.to_owned()],
      )
      .await
  }

  async fn find_by(
    &self,
    collection: &str,
    field: &str,
    value: &Value,
  ) -> Result<Vec<Document>> {
    // Both sides go through json_extract so strings, numbers and booleans
    // compare with the same SQL typing.
    self
      .query_documents(
        collection,
        "SELECT id, fields FROM documents
         WHERE collection = ?1 AND json_extract(fields, ?2) = json_extract(?3, '$')
         ORDER BY rowid",
        vec![collection.to_owned(), field_path(field), value.to_string()],
      )
      .await
  }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
    let collection_str = collection.to_owned();
    let id_str         = id.to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, fields FROM documents WHERE collection = ?1 AND id = ?2",
              rusqlite::params![collection_str, id_str],
              |row| {
                Ok(RawDocument {
                  id:     row.get(0)?,
                  fields: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|raw| raw.into_document(collection)).transpose()
  }

  async fn add(&self, collection: &str, fields: Fields) -> Result<DocumentId> {
    let id             = new_id();
    let id_str         = id.clone();
    let collection_str = collection.to_owned();
    let fields_str     = encode_fields(&fields)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (collection, id, fields) VALUES (?1, ?2, ?3)",
          rusqlite::params![collection_str, id_str, fields_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn update(&self, collection: &str, id: &str, patch: Patch) -> Result<bool> {
    let collection_str = collection.to_owned();
    let id_str         = id.to_owned();

    // Read, patch and write back inside one transaction.
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let current: Option<String> = tx
          .query_row(
            "SELECT fields FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection_str, id_str],
            |row| row.get(0),
          )
          .optional()?;

        let Some(current) = current else { return Ok(false) };

        let mut fields = decode_fields(&current)
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?
          .ok_or_else(|| {
            tokio_rusqlite::Error::Other(Box::new(Error::NotAnObject {
              collection: collection_str.clone(),
              id:         id_str.clone(),
            }))
          })?;
        patch.apply_to(&mut fields);
        let fields_str = serde_json::to_string(&fields)
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;

        tx.execute(
          "UPDATE documents SET fields = ?3 WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection_str, id_str, fields_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    Ok(updated)
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
    let collection_str = collection.to_owned();
    let id_str         = id.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
          rusqlite::params![collection_str, id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }
}
