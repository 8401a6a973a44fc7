//! Lodestar Bridge - one-shot command client for a lodestar runtime
//!
//! The runtime answers newline-delimited JSON commands over TCP. Each call
//! opens a fresh connection, writes one request line, waits for one reply
//! line, and resolves exactly once with the reply, an error, or a timeout.
//! Connections are never pooled or reused.
//!
//! # Example
//!
//! ```no_run
//! use lodestar_bridge::{Client, Config};
//! use serde_json::Map;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(Config::from_env());
//!
//! let mut payload = Map::new();
//! payload.insert("path".into(), "/srv/app/build".into());
//! let data = client.call("set_build_dir", payload).await?;
//! println!("build dir is now {}", data["build_dir"]);
//! # Ok(())
//! # }
//! ```

pub mod arbiter;
pub mod client;
pub mod config;
pub mod error;
pub mod framer;
pub mod transport;

// Re-exports for convenience
pub use client::{send_command, Client};
pub use config::{CallOptions, Config};
pub use error::{Error, Result};
pub use lodestar_protocol::{Reply, ReplyError, Request};
