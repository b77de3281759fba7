use std::sync::Arc;

use axum::http::request::Builder;

use crate::shared::auth::session::{USER_ID_HEADER, USER_ROLE_HEADER};
use crate::shared::inbound::cron_guard::CronSettings;
use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryIntentOutbox;
use crate::shell::state::AppState;

pub fn make_test_state(store: InMemoryDocumentStore) -> AppState {
    make_test_state_with_cron(store, CronSettings::default())
}

pub fn make_test_state_with_cron(store: InMemoryDocumentStore, cron: CronSettings) -> AppState {
    AppState::new(Arc::new(store), Arc::new(InMemoryIntentOutbox::new()), cron)
}

/// State over a store the test keeps a handle on, to inspect documents after requests.
pub fn make_shared_state(store: Arc<InMemoryDocumentStore>) -> AppState {
    AppState::new(store, Arc::new(InMemoryIntentOutbox::new()), CronSettings::default())
}

/// Attach the trusted session headers set by the upstream auth layer.
pub fn with_session(builder: Builder, user_id: &str, role: &str) -> Builder {
    builder
        .header(USER_ID_HEADER, user_id)
        .header(USER_ROLE_HEADER, role)
}
