pub mod api;
pub mod router;

use std::future::Future;

use crate::app::SharedState;
use anyhow::Result;

/// Start the axum HTTP server.
pub async fn start_server(state: SharedState) -> Result<()> {
    let addr = state.config().listen_addr();
    let shutdown_token = state.shutdown_token().clone();
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Label server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await?;

    tracing::info!("Label server stopped");
    Ok(())
}

/// Serve until `shutdown` resolves, then stop gracefully.
///
/// A server task that ends first (bind failure, serve error) is returned as an error.
pub async fn run_until<F>(state: SharedState, shutdown: F) -> Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let mut server_handle = tokio::spawn(start_server(state.clone()));

    tokio::select! {
        joined = &mut server_handle => {
            joined??;
            anyhow::bail!("Label server stopped before shutdown was requested");
        }
        signal = shutdown => {
            signal?;
            tracing::info!("Shutting down...");
            state.shutdown_token().cancel();
            server_handle.await??;
        }
    }

    Ok(())
}
