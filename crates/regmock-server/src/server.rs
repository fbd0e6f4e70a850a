//! Server lifecycle: bind, serve in the background, readiness, shutdown.
//!
//! `start` returns only after the listener is observed accepting
//! requests, so callers can issue requests immediately. `stop` waits for
//! the background task and verifies it terminated because shutdown was
//! requested; any other exit is surfaced as an error instead of being
//! swallowed.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use regmock_common::config::RegistryConfig;
use regmock_common::error::{RegmockError, Result};

use crate::dataset::RegistryDataset;
use crate::routes;

/// A running mock registry instance.
///
/// Owns its listener for its whole lifetime; independent instances can
/// be started and stopped repeatedly within one process, each on its own
/// ephemeral port.
#[derive(Debug)]
pub struct MockRegistry {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    served: JoinHandle<std::io::Result<()>>,
}

impl MockRegistry {
    /// Binds the configured address, serves the dataset on a background
    /// task, and waits for the instance to answer its readiness probe.
    ///
    /// # Errors
    ///
    /// Returns [`RegmockError::Bind`] if the listener cannot be bound and
    /// [`RegmockError::NotReady`] if the server does not answer within
    /// the configured readiness budget. Both indicate a broken test
    /// environment rather than a retryable condition.
    pub async fn start(config: &RegistryConfig, dataset: Arc<RegistryDataset>) -> Result<Self> {
        let listener = TcpListener::bind(&config.bind_addr)
            .await
            .map_err(|e| RegmockError::Bind {
                addr: config.bind_addr.clone(),
                source: e,
            })?;
        let addr = listener.local_addr().map_err(|e| RegmockError::Bind {
            addr: config.bind_addr.clone(),
            source: e,
        })?;

        let app = routes::router(dataset);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let served = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!(addr = %addr, "mock registry listening");
        wait_until_ready(addr, config).await?;

        Ok(Self {
            addr,
            shutdown_tx,
            served,
        })
    }

    /// Starts an instance with the standard seeded dataset and default
    /// lifecycle configuration.
    ///
    /// # Errors
    ///
    /// See [`MockRegistry::start`].
    pub async fn start_default() -> Result<Self> {
        Self::start(
            &RegistryConfig::default(),
            Arc::new(RegistryDataset::seeded()),
        )
        .await
    }

    /// The bound `host:port` address of this instance.
    #[must_use]
    pub fn addr(&self) -> String {
        self.addr.to_string()
    }

    /// Requests graceful shutdown and waits for the server task to
    /// finish.
    ///
    /// # Errors
    ///
    /// Returns [`RegmockError::ServerExit`] if the task terminated for
    /// any reason other than the shutdown request — a serve error, a
    /// panic, or an exit that happened before shutdown was asked for.
    pub async fn stop(self) -> Result<()> {
        let shutdown_requested = self.shutdown_tx.send(()).is_ok();
        match self.served.await {
            Ok(Ok(())) if shutdown_requested => {
                tracing::info!(addr = %self.addr, "mock registry stopped");
                Ok(())
            }
            Ok(Ok(())) => Err(RegmockError::ServerExit {
                message: "server task exited before shutdown was requested".to_string(),
            }),
            Ok(Err(e)) => Err(RegmockError::ServerExit {
                message: e.to_string(),
            }),
            Err(e) => Err(RegmockError::ServerExit {
                message: format!("server task panicked: {e}"),
            }),
        }
    }
}

/// Polls the v2 root until it answers 200, with a fixed interval and a
/// hard ceiling on the total wait. Removes the race between `start`
/// returning and the listener actually accepting connections.
async fn wait_until_ready(addr: SocketAddr, config: &RegistryConfig) -> Result<()> {
    let url = format!("http://{addr}/v2/");
    let client = reqwest::Client::new();
    let deadline = tokio::time::Instant::now() + config.readiness_timeout;

    while tokio::time::Instant::now() < deadline {
        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(addr = %addr, "mock registry ready");
                return Ok(());
            }
            Ok(response) => {
                tracing::debug!(addr = %addr, status = %response.status(), "readiness probe refused");
            }
            Err(e) => {
                tracing::debug!(addr = %addr, error = %e, "readiness probe failed");
            }
        }
        tokio::time::sleep(config.readiness_poll_interval).await;
    }

    Err(RegmockError::NotReady {
        addr: addr.to_string(),
        waited: config.readiness_timeout,
    })
}
