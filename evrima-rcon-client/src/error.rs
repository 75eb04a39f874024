use crate::Request;

/// Error type for RCON operations.
///
/// Every failure is one of two kinds: the server could not be reached or refused the password
/// ([`Error::ConnectionFailed`]), or the server was reached but the command could not be
/// completed ([`Error::CommandFailed`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("RCON connection failed: {0}")]
    ConnectionFailed(#[from] ConnectionError),

    #[error("RCON command `{command}` failed: {source}")]
    CommandFailed {
        /// Name of the operation that was running.
        command: &'static str,
        /// Bytes that were (or would have been) written for the command.
        payload: Vec<u8>,
        #[source]
        source: CommandError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("could not resolve {addr}")]
    Resolve {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {0}")]
    ConnectTimeout(String),

    #[error("login rejected")]
    LoginRejected,

    #[error("IO error during login")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("no response received")]
    EmptyResponse,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("field `{field}` has non-numeric value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// [`Result`] alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn command_failed(request: Request<'_>, source: impl Into<CommandError>) -> Self {
        Error::CommandFailed {
            command: request.name(),
            payload: request.to_bytes(),
            source: source.into(),
        }
    }

    pub fn is_connection_failed(&self) -> bool {
        matches!(self, Error::ConnectionFailed(_))
    }

    pub fn is_command_failed(&self) -> bool {
        matches!(self, Error::CommandFailed { .. })
    }
}
