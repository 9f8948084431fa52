use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::store::ProduceStore;
use crate::web;

/// HTTP server exposing the produce store
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<ProduceStore>,
}

impl Server {
    /// Bind the HTTP server to the given address, serving the given store
    pub async fn bind(addr: &str, store: Arc<ProduceStore>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            store,
        })
    }

    /// Bind the configured address with a freshly seeded store
    pub async fn start(config: &Config) -> std::io::Result<Self> {
        let store = Arc::new(ProduceStore::seeded());
        info!("Seeded inventory with {} produce entries", store.len());
        Self::bind(&config.server_addr, store).await
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn router(&self) -> Router {
        web::routes(Arc::clone(&self.store)).layer(TraceLayer::new_for_http())
    }

    /// Serve requests until `shutdown` resolves, then drain open connections
    pub async fn run<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        info!("Server started, listening on {}", self.local_addr);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}
