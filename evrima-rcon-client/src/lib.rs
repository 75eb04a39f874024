//! This crate provides an RCON client for [The Isle: Evrima] dedicated servers.
//!
//! The Evrima RCON protocol is a raw TCP protocol with no framing: every command is sent on a
//! fresh connection after a password handshake, and the reply is considered complete once the
//! server closes the connection or stops writing for the configured timeout. Replies are free-form
//! text, which this crate parses into typed records such as [`Player`], [`PlayerData`] and
//! [`ServerDetails`].
//!
//! Two clients are available behind cargo features: a blocking client in [`sync`] (enabled by
//! default) and a [Tokio](https://tokio.rs/) client in [`r#async`].
//!
//! # Example
//! ```rust,no_run
//! use evrima_rcon_client::sync::Client;
//!
//! let client = Client::new("localhost", 8888, "password123");
//!
//! let players = client.get_players().unwrap();
//! for player in &players.payload {
//!     println!("{} ({})", player.name, player.steam_id);
//! }
//!
//! client.send_announcement("Server restart in 5 minutes").unwrap();
//! ```
//!
//! [The Isle: Evrima]: https://survivetheisle.com/

mod config;
mod error;
mod message;
mod model;
mod parse;
mod response;

#[cfg(feature = "sync")]
pub mod sync;

#[cfg(feature = "async")]
pub mod r#async;

pub use self::config::*;
pub use self::error::*;
pub use self::message::{Request, AUTH_ACCEPTED_MARKER};
pub use self::model::*;
pub use self::parse::{
    are_humans_enabled, parse_playables_update, parse_player_data, parse_player_list,
    parse_server_details,
};

/// Maximum number of bytes requested from the socket by a single read.
pub(crate) const READ_CHUNK_LEN: usize = 8192;
