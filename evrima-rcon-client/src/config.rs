use std::time::Duration;

/// Port the dedicated server listens for RCON connections on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 8888;

/// Timeout applied to connecting and to each individual socket read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// Socket APIs reject a zero timeout.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Connection settings shared by the [`sync`](crate::sync) and [`async`](crate::r#async) clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        ClientConfig {
            host: host.into(),
            port,
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the timeout used for connecting, for the login reply and for every read while a
    /// command reply is being collected.
    ///
    /// A zero duration is raised to one millisecond.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(MIN_TIMEOUT);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
