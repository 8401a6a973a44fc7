//! Lodestar Protocol - wire types for talking to a lodestar runtime
//!
//! The runtime speaks newline-delimited JSON: one request line in, one reply
//! line back. This crate holds the record types shared by anything that
//! speaks the protocol: the outgoing [`Request`] (generated `request_id`,
//! `cmd`, flattened payload) and the incoming [`Reply`] (a generic JSON
//! object with typed accessors for the runtime's `ok`/`data`/`error`
//! envelope).

pub mod error;
pub mod reply;
pub mod request;

pub use error::{ProtocolError, Result};
pub use reply::{Reply, ReplyError};
pub use request::Request;
