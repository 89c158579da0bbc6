// SPDX-License-Identifier: MIT

use courtdesk::config::Config;
use courtdesk::directory::UserDirectory;
use courtdesk::routes::create_router;
use courtdesk::store::MemoryStore;
use courtdesk::AppState;
use std::sync::Arc;

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(MemoryStore::new());
    let directory = UserDirectory::load(store).expect("empty store always loads");

    let state = Arc::new(AppState {
        config: Config::default(),
        directory,
    });

    (create_router(state.clone()), state)
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body read");
    serde_json::from_slice(&body).expect("body is JSON")
}
