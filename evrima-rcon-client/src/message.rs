/// Substring the server includes in its reply to a successful login.
pub const AUTH_ACCEPTED_MARKER: &str = "Accepted";

const AUTH_MARKER: u8 = 0x01;
const COMMAND_MARKER: u8 = 0x02;
const TERMINATOR: u8 = 0x00;

/// A single RCON command.
///
/// Arguments must not contain a NUL byte, since the server treats it as the end of the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    ServerDetails,
    Announce { message: &'a str },
    WipeCorpses,
    PlayerList,
    PlayerData,
    /// Playable class names, already joined with commas.
    UpdatePlayables { playables: &'a str },
    ToggleHumans,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AuthRequest<'a> {
    pub pass: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthResponse {
    Accepted,
    Rejected,
}

impl Request<'_> {
    pub fn opcode(&self) -> u8 {
        match self {
            Request::ServerDetails => 0x12,
            Request::Announce { .. } => 0x10,
            Request::WipeCorpses => 0x13,
            Request::PlayerList => 0x40,
            Request::PlayerData => 0x77,
            Request::UpdatePlayables { .. } => 0x15,
            Request::ToggleHumans => 0x86,
        }
    }

    /// Name of the client operation that issues this request.
    pub fn name(&self) -> &'static str {
        match self {
            Request::ServerDetails => "get_server_details",
            Request::Announce { .. } => "send_announcement",
            Request::WipeCorpses => "wipe_corpses",
            Request::PlayerList => "get_players",
            Request::PlayerData => "get_player_data",
            Request::UpdatePlayables { .. } => "update_playables",
            Request::ToggleHumans => "toggle_humans",
        }
    }

    fn argument(&self) -> Option<&str> {
        match self {
            Request::Announce { message } => Some(*message),
            Request::UpdatePlayables { playables } => Some(*playables),
            _ => None,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        serialize_request(*self, &mut buf);
        buf
    }
}

pub(crate) fn serialize_request(request: Request<'_>, buf: &mut Vec<u8>) {
    buf.push(COMMAND_MARKER);
    buf.push(request.opcode());
    if let Some(argument) = request.argument() {
        buf.extend_from_slice(argument.as_bytes());
    }
    buf.push(TERMINATOR);
}

pub(crate) fn serialize_auth(request: AuthRequest<'_>, buf: &mut Vec<u8>) {
    buf.push(AUTH_MARKER);
    buf.extend_from_slice(request.pass.as_bytes());
    buf.push(TERMINATOR);
}

impl AuthResponse {
    pub(crate) fn from_reply(reply: &[u8]) -> Self {
        if String::from_utf8_lossy(reply).contains(AUTH_ACCEPTED_MARKER) {
            AuthResponse::Accepted
        } else {
            AuthResponse::Rejected
        }
    }
}

/// Decodes a reply, dropping any invalid UTF-8 sequences.
pub(crate) fn decode_reply(reply: &[u8]) -> String {
    let mut text = String::with_capacity(reply.len());
    let mut rest = reply;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                return text;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => rest = &after[len..],
                    // Truncated sequence at the end of the reply
                    None => return text,
                }
            }
        }
    }
}

/// Joins playable class names the way the server expects them.
pub(crate) fn join_playables<S: AsRef<str>>(playables: &[S]) -> String {
    playables
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
