use std::sync::Arc;

use axum::http::HeaderValue;
use engine::ExpenseStore;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter())
        .init();

    let cors_origin = HeaderValue::from_str(&settings.server.cors_origin)?;
    tracing::info!("Allowing cross-origin requests from {}", settings.server.cors_origin);

    let listener = match tokio::net::TcpListener::bind(settings.address()).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return Err(err.into());
        }
    };

    let store = Arc::new(ExpenseStore::builder().build());
    server::run_with_listener(store, cors_origin, listener).await?;

    Ok(())
}
