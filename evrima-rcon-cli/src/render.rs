use ansi_term::Colour::{Fixed, Green, Red, Yellow};
use evrima_rcon_client::{
    AnnouncementResponse, Location, PlayablesUpdateResponse, PlayerDataResponse,
    PlayerListResponse, ServerDetails, ServerDetailsResponse, ToggleHumansResponse,
    WipeCorpsesResponse,
};
use std::fmt::Display;

fn heading(text: &str) -> String {
    Yellow.paint(text).to_string()
}

fn field<T: Display>(name: &str, value: Option<T>) -> String {
    match value {
        Some(value) => format!("    {:<36}{}", name, value),
        None => format!("    {:<36}{}", name, Fixed(8).paint("-")),
    }
}

fn ack(raw: &str, message: &str) -> String {
    if raw.is_empty() {
        format!("{} {} (empty reply)", Red.paint("??"), message)
    } else {
        format!("{} {}", Green.paint("ok"), message)
    }
}

pub fn server_details(response: &ServerDetailsResponse) -> String {
    let ServerDetails {
        name,
        password,
        map,
        max_players,
        current_players,
        enable_mutations,
        enable_humans,
        server_password,
        queue_enabled,
        server_whitelist,
        spawn_ai,
        allow_recording_replay,
        use_region_spawning,
        use_region_spawn_cooldown,
        region_spawn_cooldown_time_seconds,
        day_length_minutes,
        night_length_minutes,
        enable_global_chat,
    } = &response.payload;

    [
        heading("SERVER"),
        field("name", name.as_ref()),
        field("password", password.as_ref()),
        field("map", map.as_ref()),
        field("max players", max_players.as_ref()),
        field("current players", current_players.as_ref()),
        field("mutations", enable_mutations.as_ref()),
        field("humans", enable_humans.as_ref()),
        field("password protected", server_password.as_ref()),
        field("queue", queue_enabled.as_ref()),
        field("whitelist", server_whitelist.as_ref()),
        field("spawn AI", spawn_ai.as_ref()),
        field("replay recording", allow_recording_replay.as_ref()),
        field("region spawning", use_region_spawning.as_ref()),
        field("region spawn cooldown", use_region_spawn_cooldown.as_ref()),
        field("region spawn cooldown (s)", region_spawn_cooldown_time_seconds.as_ref()),
        field("day length (min)", day_length_minutes.as_ref()),
        field("night length (min)", night_length_minutes.as_ref()),
        field("global chat", enable_global_chat.as_ref()),
    ]
    .join("\n")
}

pub fn announcement(response: &AnnouncementResponse) -> String {
    ack(
        &response.raw,
        &format!("announced {:?}", response.payload.announcement),
    )
}

pub fn wipe_corpses(response: &WipeCorpsesResponse) -> String {
    ack(&response.raw, "corpses wiped")
}

pub fn players(response: &PlayerListResponse) -> String {
    let mut lines = vec![heading(&format!("PLAYERS ({})", response.payload.len()))];
    lines.extend(
        response
            .payload
            .iter()
            .map(|player| format!("    {:<20}{}", player.steam_id, Green.paint(&player.name))),
    );
    lines.join("\n")
}

fn location(location: &Location) -> String {
    format!("{:.0} {:.0} {:.0}", location.x, location.y, location.z)
}

pub fn player_data(response: &PlayerDataResponse) -> String {
    let mut lines = vec![heading(&format!("PLAYERS ({})", response.payload.len()))];
    for data in &response.payload {
        lines.push(format!(
            "{} {}",
            Green.paint(&data.player.name),
            Fixed(8).paint(&data.player.steam_id)
        ));
        lines.push(field("class", data.dino.as_ref()));
        lines.push(field("location", data.location.as_ref().map(location)));
        lines.push(field("growth", data.growth));
        lines.push(field("health", data.health));
        lines.push(field("stamina", data.stamina));
        lines.push(field("hunger", data.hunger));
        lines.push(field("thirst", data.thirst));
    }
    lines.join("\n")
}

pub fn playables_update(response: &PlayablesUpdateResponse) -> String {
    [
        ack(&response.raw, "playables updated"),
        field("requested", Some(response.payload.requested.join(", "))),
        field("enabled", Some(response.payload.current.join(", "))),
    ]
    .join("\n")
}

pub fn toggle_humans(response: &ToggleHumansResponse) -> String {
    let status = if response.payload.status { "on" } else { "off" };
    ack(&response.raw, &format!("humans are now {}", status))
}
