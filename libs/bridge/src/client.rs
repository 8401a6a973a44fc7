use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, warn};

use lodestar_protocol::{Reply, ReplyError, Request};

use crate::arbiter::{Arbiter, Event, Outcome};
use crate::config::{CallOptions, Config};
use crate::error::{Error, Result};
use crate::framer::{FeedOutcome, LineFramer};
use crate::transport::{TcpTransport, Transport};

/// Client for issuing one-shot commands to the runtime.
///
/// Each command opens a fresh connection, writes one request line, waits for
/// one reply line, and tears the connection down. Transactions are fully
/// independent, so a single client can run any number of them concurrently.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client configured from the environment (see [`Config::from_env`]).
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one request and return the raw reply record.
    pub async fn send(&self, request: Request) -> Result<Reply> {
        self.send_with(request, &CallOptions::default()).await
    }

    /// Send one request with per-call overrides.
    pub async fn send_with(&self, request: Request, options: &CallOptions) -> Result<Reply> {
        let config = self.config.merge(options);
        let deadline = Instant::now() + config.timeout;
        let line = request.to_line();
        debug!(
            request_id = request.request_id(),
            cmd = request.cmd(),
            host = %config.host,
            port = config.port,
            "sending command"
        );

        let mut arbiter = Arbiter::new();
        let outcome = match timeout_at(deadline, TcpTransport::connect(&config.host, config.port))
            .await
        {
            // No connection exists yet on these paths, so there is nothing
            // to tear down.
            Err(_) => arbiter.handle(Event::DeadlineElapsed),
            Ok(Err(err)) => arbiter.handle(Event::ConnectFailed(err)),
            Ok(Ok(transport)) => Some(run_transaction(transport, arbiter, &line, deadline).await),
        };

        match outcome {
            Some(Outcome::Success(reply)) => {
                if let Some(reply_id) = reply.request_id() {
                    if reply_id != request.request_id() {
                        warn!(
                            sent = request.request_id(),
                            received = reply_id,
                            "reply carries a different request_id"
                        );
                    }
                }
                Ok(reply)
            }
            Some(Outcome::Error(err)) => Err(err),
            Some(Outcome::Timeout) | None => Err(Error::Timeout),
        }
    }

    /// Send `cmd` with `payload` and unwrap the runtime's reply envelope.
    ///
    /// `ok: true` yields the `data` object (empty when absent), `ok: false`
    /// surfaces the runtime's error, and a reply without a boolean `ok`
    /// field is reported as a `BAD_RESPONSE` runtime error.
    pub async fn call(&self, cmd: &str, payload: Map<String, Value>) -> Result<Value> {
        let request = Request::new(cmd)?.payload(payload);
        let reply = self.send(request).await?;
        unwrap_envelope(reply)
    }

    /// Like [`call`](Self::call), deserializing the envelope data into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        cmd: &str,
        payload: Map<String, Value>,
    ) -> Result<T> {
        let data = self.call(cmd, payload).await?;
        serde_json::from_value(data).map_err(|err| Error::Decode(err.into()))
    }

    /// Probe the runtime with its `handshake` command.
    pub async fn handshake(&self) -> Result<Value> {
        self.call("handshake", Map::new()).await
    }

    /// Ask the runtime which commands it serves.
    pub async fn list_commands(&self) -> Result<Vec<String>> {
        let data = self.call("list_commands", Map::new()).await?;
        let commands = data
            .get("commands")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(commands)
    }
}

/// One-shot helper matching the runtime's call contract: send `command` with
/// `payload` using the environment configuration plus per-call overrides.
pub async fn send_command(
    command: &str,
    payload: Map<String, Value>,
    options: CallOptions,
) -> Result<Reply> {
    let request = Request::new(command)?.payload(payload);
    Client::from_env().send_with(request, &options).await
}

fn unwrap_envelope(reply: Reply) -> Result<Value> {
    match reply.ok_flag() {
        Some(true) => Ok(match reply.data().cloned() {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(data) => data,
        }),
        Some(false) => Err(Error::Runtime(
            reply.error().unwrap_or_else(ReplyError::unknown),
        )),
        None => Err(Error::Runtime(ReplyError::bad_response())),
    }
}

/// Drive one transaction on an established connection to resolution.
///
/// Every completion trigger is routed through the arbiter, and the
/// connection is released on every path: gracefully after success or error,
/// forcibly after a timeout.
async fn run_transaction<T: Transport>(
    mut transport: T,
    mut arbiter: Arbiter,
    line: &str,
    deadline: Instant,
) -> Outcome {
    let outcome = drive(&mut transport, &mut arbiter, line, deadline).await;
    match outcome {
        Outcome::Timeout => transport.abort(),
        _ => transport.close().await,
    }
    outcome
}

async fn drive<T: Transport>(
    transport: &mut T,
    arbiter: &mut Arbiter,
    line: &str,
    deadline: Instant,
) -> Outcome {
    let written = match timeout_at(deadline, transport.send(line.as_bytes())).await {
        Err(_) => arbiter.handle(Event::DeadlineElapsed),
        Ok(Err(err)) => arbiter.handle(Event::WriteFailed(err)),
        Ok(Ok(())) => None,
    };
    if let Some(outcome) = written {
        return outcome;
    }

    let mut framer = LineFramer::new();
    loop {
        let event = tokio::select! {
            _ = sleep_until(deadline) => Event::DeadlineElapsed,
            chunk = transport.recv() => match chunk {
                Err(err) => Event::SocketError(err),
                Ok(None) => Event::PeerClosed,
                Ok(Some(bytes)) => match framer.feed(&bytes) {
                    FeedOutcome::Incomplete => continue,
                    FeedOutcome::Overflow(len) => Event::Oversize(len),
                    FeedOutcome::FrameReady(raw) => match Reply::parse(&raw) {
                        Ok(reply) => Event::Frame(reply),
                        Err(err) => Event::Malformed(err),
                    },
                },
            },
        };
        if let Some(outcome) = arbiter.handle(event) {
            return outcome;
        }
    }
}
