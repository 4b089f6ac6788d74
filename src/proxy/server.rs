use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ConfigStore;
use crate::proxy::error::ProxyError;
use crate::proxy::router::{build_router, RouterEngine};
use crate::proxy::shutdown::ShutdownManager;

/// How many ports past the configured one `try_bind` will try.
const PORT_FALLBACK_RANGE: u16 = 100;

pub struct ProxyServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    config: ConfigStore,
    router: RouterEngine,
    shutdown: Arc<ShutdownManager>,
}

impl ProxyServer {
    pub fn new(config: ConfigStore) -> Result<Self, ProxyError> {
        let router = RouterEngine::new(config.clone())?;
        Ok(Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            config,
            router,
            shutdown: Arc::new(ShutdownManager::new()),
        })
    }

    /// Bind to the configured address, falling back to following ports if busy.
    ///
    /// The listener is kept alive until run() so another process cannot
    /// claim the port in between.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, ProxyError> {
        let bind_addr_str = self.config.get().proxy.bind_addr;
        let bind_addr: SocketAddr = bind_addr_str.parse().map_err(|e| {
            ProxyError::InvalidRequest(format!("Invalid bind address '{}': {}", bind_addr_str, e))
        })?;

        let start_port = bind_addr.port();
        // Port 0 asks the OS for any free port; no fallback needed.
        let end_port = if start_port == 0 {
            0
        } else {
            start_port.saturating_add(PORT_FALLBACK_RANGE)
        };

        for port in start_port..=end_port {
            let try_addr = SocketAddr::new(bind_addr.ip(), port);
            match TcpListener::bind(try_addr).await {
                Ok(listener) => {
                    let actual_addr = listener.local_addr()?;
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    tracing::info!("Proxy bound to {}", actual_addr);
                    return Ok(actual_addr);
                }
                Err(e) => {
                    tracing::debug!("Port {} busy: {}", port, e);
                }
            }
        }

        Err(ProxyError::Io(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            format!("Could not find available port in range {}-{}", start_port, end_port),
        )))
    }

    pub fn handle(&self) -> ProxyHandle {
        ProxyHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Run the proxy server until shutdown.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ProxyError> {
        let listener = self.listener.ok_or_else(|| {
            ProxyError::Internal("try_bind() must be called before run()".to_string())
        })?;

        tracing::info!("Starting proxy server on {}", self.addr);

        let app = build_router(self.router.clone());
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
            .into_future()
            .await?;

        tracing::info!("Proxy stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProxyHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ProxyHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
