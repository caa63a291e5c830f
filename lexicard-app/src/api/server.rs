use axum::{routing::{get, post}, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tokio::net::TcpListener;
use tracing::info;

use lexicard_core::Repository;
use crate::api::routes::*;
use crate::api::sessions::SessionStore;
use crate::settings::EngineSettings;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/decks", get(list_decks))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", axum::routing::delete(delete_session))
        .route("/sessions/:id/decks", post(add_deck))
        .route("/sessions/:id/card", get(current_card))
        .route("/sessions/:id/next", post(next_card))
        .route("/sessions/:id/quiz", get(quiz))
        .route("/sessions/:id/judge", post(judge))
        .route("/sessions/:id/sizes", get(sizes))
        .route("/sessions/:id/forget", post(forget))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(repo: Arc<dyn Repository>, settings: EngineSettings, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState { repo, sessions: SessionStore::new(), settings });
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "api listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
