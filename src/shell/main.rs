use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use timesheets::shared::infrastructure::document_store::DocumentStore;
use timesheets::shared::infrastructure::document_store::http::HttpDocumentStore;
use timesheets::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
use timesheets::shared::infrastructure::intent_outbox::document_store::StoreIntentOutbox;
use timesheets::shell::config::Settings;
use timesheets::shell::http::router;
use timesheets::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = Settings::from_env().context("invalid configuration")?;

    let store: Arc<dyn DocumentStore> = match &settings.store_project_id {
        Some(project_id) => {
            tracing::info!(project_id = %project_id, dataset = %settings.store_dataset, "using remote document store");
            Arc::new(HttpDocumentStore::new(
                project_id,
                &settings.store_dataset,
                &settings.store_api_version,
                settings.store_api_token.clone(),
            ))
        }
        None => {
            tracing::warn!("STORE_PROJECT_ID not set, using the in memory document store");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    let outbox = Arc::new(StoreIntentOutbox::new(store.clone()));
    let state = AppState::new(store, outbox, settings.cron.clone());

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid BIND_ADDR {}", settings.bind_addr))?;
    tracing::info!("API listening on {} (GraphQL at {}/gql)", addr, settings.app_base_url);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
