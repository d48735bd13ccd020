//! Generic CRUD handlers, shared by every [`Resource`] kind.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/{collection}` | Every record, store order |
//! | `POST`   | `/{collection}` | Body: record fields; defaults applied; 201 |
//! | `GET`    | `/{collection}/{id}` | 404 if not found |
//! | `PUT`    | `/{collection}/{id}` | Full overwrite of the recognised fields |
//! | `DELETE` | `/{collection}/{id}` | Returns the deleted record |
//!
//! Which of these sit behind the authentication gate is decided by
//! [`Resource::POLICY`].
//!
//! Bodies are read as raw bytes and decoded as JSON whatever the
//! `Content-Type`; an empty body is an empty record.

use axum::{
  Json, Router,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  routing::{MethodRouter, delete, get, post, put},
};
use campus_core::{
  document::{Document, Fields},
  floor::{BUILDING_ID_FIELD, Floor},
  identity::IdentityProvider,
  resource::{Access, Resource, Stored},
  store::DocumentStore,
};
use serde_json::Value;

use crate::{AppState, auth, error::ApiError};

// ─── Routing ──────────────────────────────────────────────────────────────────

/// The five routes of `R`, with the authenticated ones behind the gate.
pub fn routes<S, I, R>(state: &AppState<S, I>) -> Router<AppState<S, I>>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let collection = format!("/{}", R::COLLECTION);
  let item       = format!("/{}/{{id}}", R::COLLECTION);
  let policy     = R::POLICY;

  let endpoints: [(Access, &str, MethodRouter<AppState<S, I>>); 5] = [
    (policy.list,   collection.as_str(), get(list::<S, I, R>)),
    (policy.create, collection.as_str(), post(create::<S, I, R>)),
    (policy.get,    item.as_str(),       get(get_one::<S, I, R>)),
    (policy.update, item.as_str(),       put(update::<S, I, R>)),
    (policy.delete, item.as_str(),       delete(delete_one::<S, I, R>)),
  ];

  let mut public    = Router::new();
  let mut protected = Router::new();
  let mut any_protected = false;
  for (access, path, endpoint) in endpoints {
    match access {
      Access::Public => public = public.route(path, endpoint),
      Access::Authenticated => {
        protected = protected.route(path, endpoint);
        any_protected = true;
      }
    }
  }

  // `route_layer` refuses an empty router.
  if any_protected {
    public.merge(auth::protect(protected, state))
  } else {
    public
  }
}

fn lower(name: &str) -> String { name.to_lowercase() }

fn decode_all<R: Resource>(
  documents: Vec<Document>,
  context: &str,
) -> Result<Vec<Stored<R>>, ApiError> {
  documents
    .into_iter()
    .map(Stored::<R>::from_document)
    .collect::<Result<_, _>>()
    .map_err(ApiError::store(context))
}

/// Decode a request body as `R`. Field values are not type-checked.
///
/// Fields are taken by name, so the body must be a JSON object.
fn decode_body<R: Resource>(body: &Bytes) -> Result<R, ApiError> {
  let invalid = |reason: String| {
    ApiError::BadRequest(format!("Invalid {} body: {reason}", lower(R::NAME)))
  };

  let fields = if body.is_empty() {
    Fields::new()
  } else {
    match serde_json::from_slice::<Value>(body).map_err(|e| invalid(e.to_string()))? {
      Value::Object(fields) => fields,
      _ => return Err(invalid("expected a JSON object".to_owned())),
    }
  };
  R::from_fields(fields).map_err(|e| invalid(e.to_string()))
}

/// Re-read a document after a write and decode it as `R`.
async fn read_back<S, R>(
  store: &S,
  id: &str,
  context: &str,
) -> Result<Stored<R>, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let document = store
    .get(R::COLLECTION, id)
    .await
    .map_err(ApiError::store(context))?
    .ok_or(ApiError::NotFound(R::NAME))?;
  Stored::<R>::from_document(document).map_err(ApiError::store(context))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{collection}`
pub async fn list<S, I, R>(
  State(state): State<AppState<S, I>>,
) -> Result<Json<Vec<Stored<R>>>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let context = format!("Error getting {}", R::COLLECTION);
  let documents = state
    .store
    .list(R::COLLECTION)
    .await
    .map_err(ApiError::store(context.clone()))?;
  Ok(Json(decode_all(documents, &context)?))
}

/// `GET /floors/building/{buildingId}`
pub async fn list_by_building<S, I>(
  State(state): State<AppState<S, I>>,
  Path(building_id): Path<String>,
) -> Result<Json<Vec<Stored<Floor>>>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  let context  = "Error getting floors by buildingId";
  let building = Value::String(building_id);
  let documents = state
    .store
    .find_by(Floor::COLLECTION, BUILDING_ID_FIELD, &building)
    .await
    .map_err(ApiError::store(context))?;
  Ok(Json(decode_all(documents, context)?))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{collection}/{id}`
pub async fn get_one<S, I, R>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<String>,
) -> Result<Json<Stored<R>>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let context = format!("Error getting {}", lower(R::NAME));
  Ok(Json(read_back::<S, R>(&state.store, &id, &context).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{collection}`: returns 201 with the stored record.
pub async fn create<S, I, R>(
  State(state): State<AppState<S, I>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let context = format!("Error creating {}", lower(R::NAME));
  let fields = decode_body::<R>(&body)?
    .with_defaults()
    .to_fields()
    .map_err(ApiError::store(context.clone()))?;

  let id = state
    .store
    .add(R::COLLECTION, fields)
    .await
    .map_err(ApiError::store(context.clone()))?;

  let stored = read_back::<S, R>(&state.store, &id, &context).await?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /{collection}/{id}`
///
/// Destructive: every recognised field missing from the body is removed from
/// the stored record. The id is looked up before the body is decoded.
pub async fn update<S, I, R>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<String>,
  body: Bytes,
) -> Result<Json<Stored<R>>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let context = format!("Error updating {}", lower(R::NAME));

  state
    .store
    .get(R::COLLECTION, &id)
    .await
    .map_err(ApiError::store(context.clone()))?
    .ok_or(ApiError::NotFound(R::NAME))?;

  let patch = decode_body::<R>(&body)?
    .to_patch()
    .map_err(ApiError::store(context.clone()))?;
  let updated = state
    .store
    .update(R::COLLECTION, &id, patch)
    .await
    .map_err(ApiError::store(context.clone()))?;
  if !updated {
    return Err(ApiError::NotFound(R::NAME));
  }

  Ok(Json(read_back::<S, R>(&state.store, &id, &context).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{collection}/{id}`: returns the record as it was before deletion.
pub async fn delete_one<S, I, R>(
  State(state): State<AppState<S, I>>,
  Path(id): Path<String>,
) -> Result<Json<Stored<R>>, ApiError>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
  R: Resource,
{
  let context = format!("Error deleting {}", lower(R::NAME));

  let snapshot = state
    .store
    .get(R::COLLECTION, &id)
    .await
    .map_err(ApiError::store(context.clone()))?
    .ok_or(ApiError::NotFound(R::NAME))?;

  state
    .store
    .delete(R::COLLECTION, &id)
    .await
    .map_err(ApiError::store(context.clone()))?;

  Ok(Json(
    Stored::<R>::from_document(snapshot).map_err(ApiError::store(context))?,
  ))
}
