/// A player as listed by the player list command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Player {
    /// Opaque Steam identifier. Some server versions report an empty string.
    pub steam_id: String,
    pub name: String,
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Live telemetry for a single player.
///
/// Numeric fields are `None` when the server omitted them. Zero is a valid value for all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub player: Player,
    pub location: Option<Location>,
    /// Class of the creature the player is currently playing.
    pub dino: Option<String>,
    pub growth: Option<f64>,
    pub health: Option<f64>,
    pub stamina: Option<f64>,
    pub hunger: Option<f64>,
    pub thirst: Option<f64>,
}

/// Snapshot of a server's configuration. Fields the server did not report, or reported in an
/// unexpected format, are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerDetails {
    pub name: Option<String>,
    pub password: Option<String>,
    pub map: Option<String>,
    pub max_players: Option<i64>,
    pub current_players: Option<i64>,
    pub enable_mutations: Option<bool>,
    pub enable_humans: Option<bool>,
    pub server_password: Option<bool>,
    pub queue_enabled: Option<bool>,
    pub server_whitelist: Option<bool>,
    pub spawn_ai: Option<bool>,
    pub allow_recording_replay: Option<bool>,
    pub use_region_spawning: Option<bool>,
    pub use_region_spawn_cooldown: Option<bool>,
    pub region_spawn_cooldown_time_seconds: Option<i64>,
    pub day_length_minutes: Option<i64>,
    pub night_length_minutes: Option<i64>,
    pub enable_global_chat: Option<bool>,
}

/// Result of an RCON operation.
///
/// `raw` always holds the decoded server reply, whether or not it could be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    /// Always `true` for a returned response. Failures are reported as [`Error`](crate::Error).
    pub success: bool,
    pub raw: String,
    pub payload: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub announcement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayablesUpdate {
    pub requested: Vec<String>,
    /// Playable classes the server reported as enabled after the update.
    pub current: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleHumans {
    /// Whether human players are enabled after the toggle.
    pub status: bool,
}

pub type ServerDetailsResponse = Response<ServerDetails>;
pub type AnnouncementResponse = Response<Announcement>;
pub type WipeCorpsesResponse = Response<()>;
pub type PlayerListResponse = Response<Vec<Player>>;
pub type PlayerDataResponse = Response<Vec<PlayerData>>;
pub type PlayablesUpdateResponse = Response<PlayablesUpdate>;
pub type ToggleHumansResponse = Response<ToggleHumans>;

impl<T> Response<T> {
    pub(crate) fn new(raw: String, payload: T) -> Self {
        Response {
            success: true,
            raw,
            payload,
        }
    }
}
