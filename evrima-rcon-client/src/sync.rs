//! Blocking client built on [`std::net::TcpStream`].

use crate::message::{decode_reply, join_playables, serialize_auth, serialize_request};
use crate::message::{AuthRequest, AuthResponse};
use crate::{response, ClientConfig, ConnectionError, Error, Request, READ_CHUNK_LEN};
use crate::{
    AnnouncementResponse, PlayablesUpdateResponse, PlayerDataResponse, PlayerListResponse,
    ServerDetailsResponse, ToggleHumansResponse, WipeCorpsesResponse,
};
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Blocking RCON client.
///
/// Every operation opens a new connection, logs in, sends a single command and reads the reply
/// until the server closes the connection or goes quiet for the configured timeout.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

/// A connection that has passed the login handshake. Closed when dropped.
struct Session {
    stream: TcpStream,
    timeout: Duration,
}

impl Client {
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        Client::with_config(ClientConfig::new(host, port, password))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Client { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get_server_details(&self) -> crate::Result<ServerDetailsResponse> {
        let raw = self.execute(Request::ServerDetails)?;
        response::server_details(raw)
    }

    pub fn send_announcement(&self, announcement: &str) -> crate::Result<AnnouncementResponse> {
        let raw = self.execute(Request::Announce {
            message: announcement,
        })?;
        Ok(response::announcement(announcement, raw))
    }

    pub fn wipe_corpses(&self) -> crate::Result<WipeCorpsesResponse> {
        let raw = self.execute(Request::WipeCorpses)?;
        Ok(response::wipe_corpses(raw))
    }

    pub fn get_players(&self) -> crate::Result<PlayerListResponse> {
        let raw = self.execute(Request::PlayerList)?;
        response::player_list(raw)
    }

    pub fn get_player_data(&self) -> crate::Result<PlayerDataResponse> {
        let raw = self.execute(Request::PlayerData)?;
        response::player_data(raw)
    }

    /// Sets the playable classes. The response lists the classes the server reports as enabled.
    pub fn update_playables<S: AsRef<str>>(
        &self,
        playables: &[S],
    ) -> crate::Result<PlayablesUpdateResponse> {
        let joined = join_playables(playables);
        let raw = self.execute(Request::UpdatePlayables { playables: &joined })?;
        Ok(response::playables_update(playables, raw))
    }

    pub fn toggle_humans(&self) -> crate::Result<ToggleHumansResponse> {
        let raw = self.execute(Request::ToggleHumans)?;
        Ok(response::toggle_humans(raw))
    }

    /// Runs a single request on a fresh connection and returns the decoded reply.
    ///
    /// The reply may be empty.
    pub fn execute(&self, request: Request<'_>) -> crate::Result<String> {
        let mut session = Session::connect(&self.config)?;
        session
            .execute(request)
            .map_err(|err| Error::command_failed(request, err))
    }
}

impl Session {
    fn connect(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let addr = config.address();
        let timeout = config.timeout();

        let addrs = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(|source| ConnectionError::Resolve {
                addr: addr.clone(),
                source,
            })?;

        let stream = match connect_before(addrs, Instant::now() + timeout) {
            Ok(stream) => stream,
            Err(err) if err.kind() == ErrorKind::TimedOut => {
                return Err(ConnectionError::ConnectTimeout(addr))
            }
            Err(source) => return Err(ConnectionError::Connect { addr, source }),
        };
        log::debug!("Connected to {}", addr);

        let mut session = Session { stream, timeout };
        session.authenticate(&config.password)?;
        Ok(session)
    }

    fn authenticate(&mut self, pass: &str) -> Result<(), ConnectionError> {
        let mut buf = Vec::new();
        serialize_auth(AuthRequest { pass }, &mut buf);
        self.stream.write_all(&buf)?;

        self.stream.set_read_timeout(Some(self.timeout))?;
        let mut reply = vec![0; READ_CHUNK_LEN];
        let reply_len = self.stream.read(&mut reply)?;
        reply.truncate(reply_len);

        match AuthResponse::from_reply(&reply) {
            AuthResponse::Accepted => Ok(()),
            AuthResponse::Rejected => {
                log::warn!("RCON login rejected: {:?}", decode_reply(&reply));
                Err(ConnectionError::LoginRejected)
            }
        }
    }

    fn execute(&mut self, request: Request<'_>) -> std::io::Result<String> {
        let mut buf = Vec::new();
        serialize_request(request, &mut buf);
        log::trace!("Sending {} ({:02x?})", request.name(), buf);
        self.stream.write_all(&buf)?;

        let mut buffer: Vec<u8> = Vec::new();
        loop {
            self.stream.set_read_timeout(Some(self.timeout))?;

            // Add some space to write into
            let write_start = buffer.len();
            buffer.resize(write_start + READ_CHUNK_LEN, 0);

            let write_len = match self.stream.read(&mut buffer[write_start..]) {
                Ok(len) => len,
                Err(err) if err.kind() == ErrorKind::Interrupted => {
                    buffer.truncate(write_start);
                    continue;
                }
                // The server has nothing more to send
                Err(err) if is_timeout(&err) => {
                    buffer.truncate(write_start);
                    break;
                }
                Err(err) => return Err(err),
            };

            // Shrink the buffer again so it only contains written data
            buffer.truncate(write_start + write_len);

            // Connection closed by the server
            if write_len == 0 {
                break;
            }
        }

        log::debug!("Received {} bytes for {}", buffer.len(), request.name());
        Ok(decode_reply(&buffer))
    }
}

/// Tries each address in turn, giving every attempt only the time left before `deadline`.
fn connect_before(
    addrs: impl IntoIterator<Item = SocketAddr>,
    deadline: Instant,
) -> std::io::Result<TcpStream> {
    let mut last_err = None;
    for socket_addr in addrs {
        let remaining = match deadline.checked_duration_since(Instant::now()) {
            Some(remaining) if !remaining.is_zero() => remaining,
            _ => return Err(ErrorKind::TimedOut.into()),
        };

        match TcpStream::connect_timeout(&socket_addr, remaining) {
            Ok(stream) => return Ok(stream),
            Err(err) => {
                log::debug!("Could not connect to {}: {}", socket_addr, err);
                last_err = Some(err);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| ErrorKind::NotFound.into()))
}

fn is_timeout(err: &std::io::Error) -> bool {
    // Platforms disagree on which kind a read timeout reports
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
