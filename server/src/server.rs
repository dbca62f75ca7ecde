//! Server Lifecycle
//!
//! Runs the router on a tokio task with graceful shutdown. Meant for hosts
//! that may stop the app at any time: `stop` waits only up to a timeout for
//! in-flight requests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::error::ServerError;

/// Grace period used when `start` has to stop a running instance
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(100);

struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

pub struct Server {
    router: Router,
    running: Option<Running>,
}

impl Server {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            running: None,
        }
    }

    /// Bind `addr` and serve in the background.
    ///
    /// Returns the root URL without trailing slash, e.g.
    /// `http://127.0.0.1:41234`. A running instance is stopped first.
    pub async fn start(&mut self, addr: SocketAddr) -> Result<String, ServerError> {
        if self.running.is_some() {
            self.stop(DEFAULT_SHUTDOWN_TIMEOUT).await;
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let app = self.router.clone();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("listening on {}", local_addr);
        self.running = Some(Running {
            addr: local_addr,
            shutdown,
            task,
        });
        Ok(format!("http://{}", local_addr))
    }

    /// Address of the running instance
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.addr)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Signal shutdown and wait up to `timeout` for in-flight requests,
    /// then abort. No-op when not running.
    pub async fn stop(&mut self, timeout: Duration) {
        let Some(mut running) = self.running.take() else {
            return;
        };
        let _ = running.shutdown.send(());
        match tokio::time::timeout(timeout, &mut running.task).await {
            Ok(Ok(Ok(()))) => tracing::info!("server on {} stopped", running.addr),
            Ok(Ok(Err(e))) => tracing::error!("server on {} failed: {}", running.addr, e),
            Ok(Err(e)) => tracing::error!("server task on {} panicked: {}", running.addr, e),
            Err(_) => {
                tracing::warn!(
                    "server on {} still busy after {:?}, aborting",
                    running.addr,
                    timeout
                );
                running.task.abort();
            }
        }
    }
}
