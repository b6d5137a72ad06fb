use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{Instrument, info, info_span, warn};

use crate::config::{Config, Limits};
use crate::http::connection::Connection;
use crate::server::dispatch::Dispatcher;

/// Largest backlog we ask for; the kernel clamps it to its own maximum.
const BACKLOG: u32 = i32::MAX as u32;

/// The listening socket plus everything a connection needs.
pub struct Server {
    listener: TcpListener,
    limits: Limits,
    dispatcher: Dispatcher,
}

impl Server {
    /// Resolves the root and binds the listening socket with `SO_REUSEADDR`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let root = cfg.resolve_root()?;
        info!("Using {} for server's root", root.display());

        let addr = cfg.socket_addr()?;
        let socket = TcpSocket::new_v4().context("failed to create socket")?;
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr.into())
            .with_context(|| format!("failed to bind {addr}"))?;
        let listener = socket.listen(BACKLOG).context("failed to listen")?;

        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            limits: cfg.limits,
            dispatcher: Dispatcher::from_config(cfg, root),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts and serves connections one at a time until `shutdown`
    /// completes.
    ///
    /// `shutdown` is only polled while waiting for the next client; a request
    /// already being served always runs to completion.
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let (socket, peer) = tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting");
                    break;
                }

                accepted = self.listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!("Accept failed: {}", e);
                        continue;
                    }
                },
            };

            info!("Accepted connection from {}", peer);

            let mut conn = Connection::new(socket, peer, self.limits, &self.dispatcher);
            let span = info_span!("conn", %peer);
            if let Err(e) = conn.run().instrument(span).await {
                warn!("Connection from {} abandoned: {}", peer, e);
            }
        }

        Ok(())
    }
}
