//! Graceful shutdown
//!
//! Resolves on Ctrl+C or SIGTERM. A listener that cannot be installed never
//! fires; it does not stop the server.

use std::fmt::Display;
use std::future::Future;

use tokio::signal;

/// Wait for the first shutdown signal
pub async fn shutdown_signal() {
    let ctrl_c = or_pending("Ctrl+C", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = or_pending("SIGTERM", async {
        let mut sig = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        sig.recv().await;
        Ok::<_, std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down server...");
}

/// Await a signal listener; on failure log and park forever
async fn or_pending<F, E>(name: &str, listener: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(err) = listener.await {
        tracing::error!(error = %err, signal = name, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_failed_listener_never_resolves() {
        let failed = or_pending("test", async { Err::<(), _>("no signal driver") });
        let outcome = tokio::time::timeout(Duration::from_millis(50), failed).await;
        assert!(outcome.is_err(), "a failed listener must not trigger shutdown");
    }

    #[tokio::test]
    async fn test_received_signal_resolves() {
        let received = or_pending("test", async { Ok::<(), &str>(()) });
        let outcome = tokio::time::timeout(Duration::from_millis(50), received).await;
        assert!(outcome.is_ok());
    }
}
