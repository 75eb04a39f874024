//! Turns a raw reply into the response for each operation. Shared by the sync and async clients.

use crate::parse::{
    are_humans_enabled, parse_playables_update, parse_player_data, parse_player_list,
    parse_server_details,
};
use crate::{
    Announcement, AnnouncementResponse, CommandError, Error, PlayablesUpdate,
    PlayablesUpdateResponse, PlayerDataResponse, PlayerListResponse, Request, Response,
    ServerDetailsResponse, ToggleHumans, ToggleHumansResponse, WipeCorpsesResponse,
};

/// Fails with [`CommandError::EmptyResponse`] for requests that always get a reply.
fn require_reply(request: Request<'_>, raw: String) -> crate::Result<String> {
    if raw.is_empty() {
        log::debug!("Empty reply to {}", request.name());
        return Err(Error::command_failed(request, CommandError::EmptyResponse));
    }
    Ok(raw)
}

pub(crate) fn server_details(raw: String) -> crate::Result<ServerDetailsResponse> {
    let raw = require_reply(Request::ServerDetails, raw)?;
    let details = parse_server_details(&raw);
    Ok(Response::new(raw, details))
}

pub(crate) fn announcement(announcement: &str, raw: String) -> AnnouncementResponse {
    Response::new(
        raw,
        Announcement {
            announcement: announcement.to_string(),
        },
    )
}

pub(crate) fn wipe_corpses(raw: String) -> WipeCorpsesResponse {
    Response::new(raw, ())
}

pub(crate) fn player_list(raw: String) -> crate::Result<PlayerListResponse> {
    let raw = require_reply(Request::PlayerList, raw)?;
    let players = parse_player_list(&raw);
    Ok(Response::new(raw, players))
}

pub(crate) fn player_data(raw: String) -> crate::Result<PlayerDataResponse> {
    let raw = require_reply(Request::PlayerData, raw)?;
    let players = parse_player_data(&raw)
        .map_err(|err| Error::command_failed(Request::PlayerData, err))?;
    Ok(Response::new(raw, players))
}

pub(crate) fn playables_update<S: AsRef<str>>(
    requested: &[S],
    raw: String,
) -> PlayablesUpdateResponse {
    let current = parse_playables_update(&raw);
    Response::new(
        raw,
        PlayablesUpdate {
            requested: requested.iter().map(|name| name.as_ref().to_string()).collect(),
            current,
        },
    )
}

pub(crate) fn toggle_humans(raw: String) -> ToggleHumansResponse {
    let status = are_humans_enabled(&raw);
    Response::new(raw, ToggleHumans { status })
}
