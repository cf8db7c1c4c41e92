use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get},
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::expenses;
use engine::ExpenseStore;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<ExpenseStore>,
}

/// Cross-origin policy for the single allowed front-end.
///
/// Credentials are allowed, so methods and headers are mirrored from the
/// preflight request instead of answered with a wildcard.
fn cors(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the expenses API on top of `store`, reachable from `cors_origin`.
pub fn app(store: Arc<ExpenseStore>, cors_origin: HeaderValue) -> Router {
    let state = ServerState { store };

    Router::new()
        .route("/api/expenses", get(expenses::list).post(expenses::create))
        .route("/api/expenses/export", get(expenses::export))
        .route("/api/expenses/summary", get(expenses::summary))
        .route("/api/expenses/{id}", delete(expenses::delete))
        .layer(TraceLayer::new_for_http())
        .layer(cors(cors_origin))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

pub async fn run_with_listener(
    store: Arc<ExpenseStore>,
    cors_origin: HeaderValue,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(store, cors_origin))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn spawn_with_listener(
    store: Arc<ExpenseStore>,
    cors_origin: HeaderValue,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, cors_origin, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
