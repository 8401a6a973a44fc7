use lodestar_protocol::{ProtocolError, ReplyError};
use thiserror::Error;

/// Errors produced while running a single command transaction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("connect failed: {0}")]
    Connect(#[source] std::io::Error),

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[source] std::io::Error),

    #[error("connection closed before a complete reply")]
    ConnectionClosed,

    #[error("reply frame too large: {0} bytes buffered")]
    FrameTooLarge(usize),

    #[error("timed out waiting for the runtime")]
    Timeout,

    #[error("decode error: {0}")]
    Decode(#[from] ProtocolError),

    #[error("runtime error: {0}")]
    Runtime(ReplyError),
}

pub type Result<T> = std::result::Result<T, Error>;
