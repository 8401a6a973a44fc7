use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::transport::Transport;

const READ_CHUNK: usize = 4096;

/// TCP connection to the runtime.
///
/// The stream is wrapped in an `Option` so that closing is idempotent: the
/// first `close` (or `abort`) takes the stream out, later calls are no-ops.
pub struct TcpTransport {
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Connect to `host:port`.
    pub async fn connect(host: &str, port: u16) -> io::Result<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        debug!(host, port, "connected to runtime");
        Ok(Self {
            stream: Some(stream),
        })
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "connection closed"))?;
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    async fn recv(&mut self) -> io::Result<Option<Vec<u8>>> {
        let stream = match self.stream.as_mut() {
            Some(stream) => stream,
            None => return Ok(None),
        };
        let mut buf = vec![0u8; READ_CHUNK];
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(buf))
    }

    async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(err) = stream.shutdown().await {
                debug!(error = %err, "shutdown of resolved connection failed");
            }
        }
    }

    fn abort(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Linger zero turns the drop into an immediate reset instead of
            // a graceful shutdown that could wait on a hung peer.
            let _ = stream.set_linger(Some(Duration::from_secs(0)));
            drop(stream);
            debug!("connection aborted");
        }
    }
}
