//! campus-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) and the
//! `CAMPUS_*` environment, opens the configured document store, and serves the
//! Campus REST API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use campus_api::AppState;
use campus_core::{memory::MemoryStore, store::DocumentStore};
use campus_identity::IdentityToolkit;
use campus_server::{Backend, demo_models, expand_tilde, load_config};
use campus_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Campus REST API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Seed the memory backend with four demo models.
  #[arg(long)]
  seed_models: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  let identity = IdentityToolkit::new(server_cfg.identity.clone())
    .context("failed to build identity provider client")?;
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  match server_cfg.store.backend {
    Backend::Memory => {
      let mut store = MemoryStore::new();
      if cli.seed_models {
        store = store.with_documents(
          "models",
          demo_models().context("failed to build demo models")?,
        );
        tracing::info!("seeded 4 demo models");
      }
      serve(store, identity, &address).await
    }
    Backend::Sqlite => {
      if cli.seed_models {
        tracing::warn!("--seed-models only applies to the memory backend; ignoring");
      }
      let store_path = expand_tilde(&server_cfg.store.path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!(path = ?store_path, "opened sqlite store");
      serve(store, identity, &address).await
    }
  }
}

async fn serve<S>(store: S, identity: IdentityToolkit, address: &str) -> anyhow::Result<()>
where
  S: DocumentStore + 'static,
{
  let app = campus_api::router(AppState::new(Arc::new(store), Arc::new(identity)));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
