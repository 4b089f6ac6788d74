use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::Notify;

pub struct ShutdownManager {
    shutdown: AtomicBool,
    notify: Notify,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            notify: Notify::new(),
        }
    }

    /// Resolve on Ctrl-C, SIGTERM, or `signal_shutdown()`.
    pub async fn wait_for_shutdown(&self) {
        // Register interest before checking the flag so a signal between
        // the check and the await is not lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_shutting_down() {
            return;
        }

        tokio::select! {
            _ = signal::ctrl_c() => {},
            _ = terminate() => {},
            _ = notified => {},
        }

        self.shutdown.store(true, Ordering::SeqCst);
        tracing::info!("Shutting down gracefully...");
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn starts_running() {
        assert!(!ShutdownManager::new().is_shutting_down());
    }

    #[tokio::test]
    async fn signal_wakes_waiter() {
        let manager = Arc::new(ShutdownManager::new());
        let waiter = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.wait_for_shutdown().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        manager.signal_shutdown();

        let result = tokio::time::timeout(Duration::from_secs(1), waiter).await;
        assert!(result.is_ok());
        assert!(manager.is_shutting_down());
    }

    #[tokio::test]
    async fn wait_returns_immediately_after_signal() {
        let manager = ShutdownManager::new();
        manager.signal_shutdown();
        let result =
            tokio::time::timeout(Duration::from_millis(100), manager.wait_for_shutdown()).await;
        assert!(result.is_ok());
    }
}
