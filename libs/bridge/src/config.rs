use std::time::Duration;

/// Default runtime port.
pub const DEFAULT_PORT: u16 = 42207;

/// Default transaction timeout, covering connect, write and the wait for a
/// reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Environment variable consulted by [`Config::from_env`] for the host.
pub const HOST_ENV: &str = "LODESTAR_HOST";

const DEFAULT_HOST: &str = "127.0.0.1";

/// Endpoint and timeout settings for a [`Client`](crate::Client).
///
/// The environment is only ever read in [`Config::from_env`]; transaction
/// logic sees nothing but this struct.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Defaults, with the host taken from `LODESTAR_HOST` when set.
    ///
    /// Call once at startup and inject the result.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var(HOST_ENV) {
            if !host.is_empty() {
                config.host = host;
            }
        }
        config
    }

    /// Set the host to connect to.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port to connect to.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the transaction timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply per-call overrides.
    pub(crate) fn merge(&self, options: &CallOptions) -> Config {
        Config {
            host: options.host.clone().unwrap_or_else(|| self.host.clone()),
            port: options.port.unwrap_or(self.port),
            timeout: options.timeout.unwrap_or(self.timeout),
        }
    }
}

/// Per-call overrides for a client's [`Config`].
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn options_override_config() {
        let config = Config::default();
        let options = CallOptions::new()
            .host("10.0.0.7")
            .port(9000)
            .timeout(Duration::from_millis(50));

        let merged = config.merge(&options);
        assert_eq!(merged.host, "10.0.0.7");
        assert_eq!(merged.port, 9000);
        assert_eq!(merged.timeout, Duration::from_millis(50));
    }

    #[test]
    fn empty_options_keep_config() {
        let config = Config::default().host("runtime.local").port(4000);
        let merged = config.merge(&CallOptions::new());
        assert_eq!(merged.host, "runtime.local");
        assert_eq!(merged.port, 4000);
        assert_eq!(merged.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn env_host_is_picked_up() {
        std::env::set_var(HOST_ENV, "192.168.7.2");
        let config = Config::from_env();
        std::env::remove_var(HOST_ENV);
        assert_eq!(config.host, "192.168.7.2");
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
