use lodestar_protocol::{ProtocolError, Reply};
use tracing::debug;

use crate::error::Error;

/// A transaction-level event competing to resolve the outcome.
#[derive(Debug)]
pub enum Event {
    /// A complete reply frame was decoded.
    Frame(Reply),
    /// A frame arrived but could not be decoded.
    Malformed(ProtocolError),
    /// The connection could not be established.
    ConnectFailed(std::io::Error),
    /// The request could not be fully written.
    WriteFailed(std::io::Error),
    /// The socket errored after connect.
    SocketError(std::io::Error),
    /// The peer closed the connection before a complete frame.
    PeerClosed,
    /// The accumulation buffer overflowed without a frame boundary.
    Oversize(usize),
    /// The transaction deadline elapsed.
    DeadlineElapsed,
}

/// Terminal result of a transaction.
#[derive(Debug)]
pub enum Outcome {
    Success(Reply),
    Error(Error),
    Timeout,
}

/// Enforces exactly-once resolution of a transaction.
///
/// The first event wins and becomes the outcome; every later event is
/// discarded, so a late error on an already-resolved transaction can never
/// override a success or complete the caller twice.
#[derive(Debug, Default)]
pub struct Arbiter {
    resolved: bool,
}

impl Arbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Feed one event. Returns the outcome if this event resolved the
    /// transaction, `None` if it arrived after resolution.
    pub fn handle(&mut self, event: Event) -> Option<Outcome> {
        if self.resolved {
            debug!(?event, "discarding event after resolution");
            return None;
        }
        self.resolved = true;

        Some(match event {
            Event::Frame(reply) => Outcome::Success(reply),
            Event::Malformed(err) => Outcome::Error(Error::Decode(err)),
            Event::ConnectFailed(err) => Outcome::Error(Error::Connect(err)),
            Event::WriteFailed(err) => Outcome::Error(Error::Write(err)),
            Event::SocketError(err) => Outcome::Error(Error::Transport(err)),
            Event::PeerClosed => Outcome::Error(Error::ConnectionClosed),
            Event::Oversize(len) => Outcome::Error(Error::FrameTooLarge(len)),
            Event::DeadlineElapsed => Outcome::Timeout,
        })
    }
}
