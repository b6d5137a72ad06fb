use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::Limits;
use crate::http::reader::read_request;
use crate::http::request::RawRequest;
use crate::http::writer::ResponseWriter;
use crate::server::dispatch::Dispatcher;

/// One client connection, serviced for exactly one request.
pub struct Connection<'a, S> {
    stream: S,
    peer: SocketAddr,
    limits: Limits,
    dispatcher: &'a Dispatcher,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(RawRequest),
    Writing(ResponseWriter),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, limits: Limits, dispatcher: &'a Dispatcher) -> Self {
        Self {
            stream,
            peer,
            limits,
            dispatcher,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection from `Reading` to `Closed`.
    ///
    /// A framing failure returns an error before anything is written. The
    /// stream is released when the `Connection` is dropped, whatever the
    /// outcome.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let raw = read_request(&mut self.stream, &self.limits).await?;
                    ConnectionState::Processing(raw)
                }

                ConnectionState::Processing(raw) => {
                    let response = self.dispatcher.dispatch(&raw).await;
                    ConnectionState::Writing(ResponseWriter::new(&response))
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    let status = writer.status();
                    tracing::info!(
                        peer = %self.peer,
                        bytes = writer.written(),
                        "HTTP/1.1 {} {}",
                        status.as_u16(),
                        status.reason_phrase()
                    );

                    // No keep-alive: every response ends the connection.
                    self.stream.shutdown().await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }
}
