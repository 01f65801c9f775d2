//! Bedrox HTTP surface.
//!
//! Routes:
//! - `GET /` — front-end page from the configured static directory
//! - `GET /api/models` — model catalog
//! - `POST /api/invoke` — forward a prompt through the inference gateway
//! - `GET /api/health` — liveness probe

pub mod error;
pub mod http;
pub mod state;

use std::future::Future;
use std::sync::Arc;

use tracing::info;

pub use error::ServerError;
pub use http::create_router;
pub use state::AppState;

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve(
    addr: &str,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!(addr = %addr, static_dir = %state.static_dir.display(), "HTTP server listening");

    let router = create_router(Arc::new(state));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
