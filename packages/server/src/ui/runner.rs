//! Router construction and the serve loop.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    error::ServerError,
    ui::{config::ServerConfig, handler, signal::shutdown_signal, state::AppState},
};

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(handler::websocket_handler))
        .route("/api/health", get(handler::health_check))
        .route("/api/participants", get(handler::get_participants))
        .route("/api/messages", get(handler::get_messages))
        .route("/api/room", get(handler::get_room))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.addr` and serve until Ctrl+C / SIGTERM
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;
    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(
        "Listening on {} (session queue capacity: {}, leave on disconnect: {})",
        addr,
        config.session_queue_capacity,
        config.leave_on_disconnect
    );

    let state = Arc::new(AppState::new(config));
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}
