use actix_web::dev::ServerHandle;
use tokio::signal;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

pub async fn shutdown_signal() -> ShutdownReason {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("🛑 Ctrl+C received, draining connections...");
            ShutdownReason::Interrupt
        },
        _ = terminate => {
            warn!("🛑 SIGTERM received, draining connections...");
            ShutdownReason::Terminate
        }
    }
}

/// Waits for a signal, then stops the server letting in-flight requests finish.
pub async fn stop_on_signal(handle: ServerHandle) {
    let reason = shutdown_signal().await;
    tracing::info!(?reason, "Stopping HTTP server");
    handle.stop(true).await;
}
