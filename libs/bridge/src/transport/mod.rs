pub mod tcp;

pub use self::tcp::TcpTransport;

/// A single bidirectional byte-stream connection.
///
/// Each transport instance represents exactly one connection, owned by one
/// transaction for its entire lifetime. Phase-specific error classification
/// (connect vs. write vs. mid-transaction) happens in the transaction
/// driver, so methods report plain I/O errors.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write the complete request to the peer.
    async fn send(&mut self, bytes: &[u8]) -> std::io::Result<()>;

    /// Receive the next chunk of inbound bytes, in arrival order.
    /// `None` means the peer closed the connection.
    async fn recv(&mut self) -> std::io::Result<Option<Vec<u8>>>;

    /// Gracefully close the connection. Safe to call more than once or on
    /// an already-closed connection.
    async fn close(&mut self);

    /// Forcibly destroy the connection without a shutdown handshake.
    fn abort(&mut self);
}
