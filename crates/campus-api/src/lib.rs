//! JSON REST API for Campus.
//!
//! Exposes an axum [`Router`] backed by any [`DocumentStore`] and any
//! [`IdentityProvider`]. TLS and listening are the caller's responsibility.
//!
//! # Routes
//!
//! | Path | Public | Authenticated |
//! |------|--------|---------------|
//! | `/buildings`, `/buildings/{id}` | `GET` | `POST`, `PUT`, `DELETE` |
//! | `/floors`, `/floors/{id}` | `GET` | `POST`, `PUT`, `DELETE` |
//! | `/floors/building/{buildingId}` | `GET` | |
//! | `/forms`, `/forms/{id}` | `POST` | `GET`, `PUT`, `DELETE` |
//! | `/models`, `/models/{id}` | all | |
//! | `/login` | `POST` | |
//! | `/user`, `/user/password` | | all |

pub mod auth;
pub mod error;
pub mod login;
pub mod resources;
pub mod user;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use campus_core::{
  building::Building, floor::Floor, form::Form, identity::IdentityProvider,
  model::Model, store::DocumentStore,
};
use tower_http::{
  cors::CorsLayer,
  trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, I> {
  pub store:    Arc<S>,
  pub identity: Arc<I>,
}

impl<S, I> AppState<S, I> {
  pub fn new(store: Arc<S>, identity: Arc<I>) -> Self { Self { store, identity } }
}

// Manual impl: cloning the state must not require `S: Clone` or `I: Clone`.
impl<S, I> Clone for AppState<S, I> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      identity: Arc::clone(&self.identity),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router, with CORS and request tracing applied.
///
/// The returned `Router<()>` can be served directly or nested into any parent
/// router regardless of its own state type.
pub fn router<S, I>(state: AppState<S, I>) -> Router<()>
where
  S: DocumentStore + 'static,
  I: IdentityProvider + 'static,
{
  Router::new()
    .merge(resources::routes::<S, I, Building>(&state))
    .merge(resources::routes::<S, I, Floor>(&state))
    .route(
      "/floors/building/{building_id}",
      get(resources::list_by_building::<S, I>),
    )
    .merge(resources::routes::<S, I, Form>(&state))
    .merge(resources::routes::<S, I, Model>(&state))
    .route("/login", post(login::handler::<S, I>))
    .merge(user::routes(&state))
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    // Any origin, mirrored back, with credentials allowed.
    .layer(CorsLayer::very_permissive())
    .with_state(state)
}
