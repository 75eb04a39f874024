//! Asynchronous client built on [Tokio](https://tokio.rs/).

use crate::message::{decode_reply, join_playables, serialize_auth, serialize_request};
use crate::message::{AuthRequest, AuthResponse};
use crate::{response, ClientConfig, ConnectionError, Error, Request, READ_CHUNK_LEN};
use crate::{
    AnnouncementResponse, PlayablesUpdateResponse, PlayerDataResponse, PlayerListResponse,
    ServerDetailsResponse, ToggleHumansResponse, WipeCorpsesResponse,
};
use std::io::ErrorKind;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Asynchronous RCON client.
///
/// Every operation opens a new connection, logs in, sends a single command and reads the reply
/// until the server closes the connection or goes quiet for the configured timeout. Operations
/// share no state, so a client can be used from several tasks at once.
///
/// # Example
/// ```rust,no_run
/// use evrima_rcon_client::r#async::Client;
///
/// #[tokio::main]
/// async fn main() {
///     let client = Client::new("localhost", 8888, "password123");
///
///     let details = client.get_server_details().await.unwrap();
///     println!("{:?}", details.payload.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

#[derive(Debug)]
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

    pub async fn get_server_details(&self) -> crate::Result<ServerDetailsResponse> {
        let raw = self.execute(Request::ServerDetails).await?;
        response::server_details(raw)
    }

    pub async fn send_announcement(
        &self,
        announcement: &str,
    ) -> crate::Result<AnnouncementResponse> {
        let raw = self
            .execute(Request::Announce {
                message: announcement,
            })
            .await?;
        Ok(response::announcement(announcement, raw))
    }

    pub async fn wipe_corpses(&self) -> crate::Result<WipeCorpsesResponse> {
        let raw = self.execute(Request::WipeCorpses).await?;
        Ok(response::wipe_corpses(raw))
    }

    pub async fn get_players(&self) -> crate::Result<PlayerListResponse> {
        let raw = self.execute(Request::PlayerList).await?;
        response::player_list(raw)
    }

    pub async fn get_player_data(&self) -> crate::Result<PlayerDataResponse> {
        let raw = self.execute(Request::PlayerData).await?;
        response::player_data(raw)
    }

    /// Sets the playable classes. The response lists the classes the server reports as enabled.
    pub async fn update_playables<S: AsRef<str>>(
        &self,
        playables: &[S],
    ) -> crate::Result<PlayablesUpdateResponse> {
        let joined = join_playables(playables);
        let raw = self
            .execute(Request::UpdatePlayables { playables: &joined })
            .await?;
        Ok(response::playables_update(playables, raw))
    }

    pub async fn toggle_humans(&self) -> crate::Result<ToggleHumansResponse> {
        let raw = self.execute(Request::ToggleHumans).await?;
        Ok(response::toggle_humans(raw))
    }

    /// Runs a single request on a fresh connection and returns the decoded reply.
    ///
    /// The reply may be empty.
    pub async fn execute(&self, request: Request<'_>) -> crate::Result<String> {
        let mut session = Session::connect(&self.config).await?;
        session
            .execute(request)
            .await
            .map_err(|err| Error::command_failed(request, err))
    }
}

impl Session {
    async fn connect(config: &ClientConfig) -> Result<Self, ConnectionError> {
        let addr = config.address();
        let timeout_len = config.timeout();

        let stream = match timeout(
            timeout_len,
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ConnectionError::Connect { addr, source }),
            Err(_) => return Err(ConnectionError::ConnectTimeout(addr)),
        };
        log::debug!("Connected to {}", addr);

        let mut session = Session {
            stream,
            timeout: timeout_len,
        };
        session.authenticate(&config.password).await?;
        Ok(session)
    }

    async fn authenticate(&mut self, pass: &str) -> Result<(), ConnectionError> {
        let mut buf = Vec::new();
        serialize_auth(AuthRequest { pass }, &mut buf);
        self.stream.write_all(&buf).await?;

        let mut reply = vec![0; READ_CHUNK_LEN];
        let reply_len = match timeout(self.timeout, self.stream.read(&mut reply)).await {
            Ok(res) => res?,
            Err(_) => return Err(ConnectionError::Io(ErrorKind::TimedOut.into())),
        };
        reply.truncate(reply_len);

        match AuthResponse::from_reply(&reply) {
            AuthResponse::Accepted => Ok(()),
            AuthResponse::Rejected => {
                log::warn!("RCON login rejected: {:?}", decode_reply(&reply));
                Err(ConnectionError::LoginRejected)
            }
        }
    }

    async fn execute(&mut self, request: Request<'_>) -> std::io::Result<String> {
        let mut buf = Vec::new();
        serialize_request(request, &mut buf);
        log::trace!("Sending {} ({:02x?})", request.name(), buf);
        self.stream.write_all(&buf).await?;

        let mut buffer: Vec<u8> = Vec::new();
        loop {
            // Add some space to write into
            let write_start = buffer.len();
            buffer.resize(write_start + READ_CHUNK_LEN, 0);

            let read = timeout(self.timeout, self.stream.read(&mut buffer[write_start..])).await;
            let write_len = match read {
                Ok(res) => res?,
                // The server has nothing more to send
                Err(_) => {
                    buffer.truncate(write_start);
                    break;
                }
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
