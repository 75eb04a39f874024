//! Parsers for the text replies of each command.
//!
//! Replies are loosely structured and vary between server versions, so missing or malformed fields
//! are generally left out of the result instead of failing the whole parse. The one exception is
//! a telemetry number that is present but not numeric, see [`parse_player_data`].

use crate::{Location, ParseError, Player, PlayerData, ServerDetails};
use std::collections::HashMap;

const PLAYER_LIST_HEADER: &str = "PlayerList";

/// Strips a leading `[...] ` tag, such as a timestamp.
fn strip_tag(text: &str) -> &str {
    if !text.starts_with('[') {
        return text;
    }
    match text.split_once("] ") {
        Some((_, rest)) => rest,
        None => text,
    }
}

/// Parses the reply to [`Request::PlayerList`](crate::Request::PlayerList).
///
/// The reply lists every Steam ID followed by every name, all comma separated. The tokens are split
/// in half by count, so an odd number of tokens drops the last one.
pub fn parse_player_list(raw: &str) -> Vec<Player> {
    let stripped = raw.replace(PLAYER_LIST_HEADER, "").replace('\n', "");
    let tokens: Vec<&str> = stripped
        .trim()
        .split(',')
        .filter(|token| !token.is_empty())
        .collect();

    let (steam_ids, names) = tokens.split_at(tokens.len() / 2);
    steam_ids
        .iter()
        .zip(names)
        .map(|(steam_id, name)| Player {
            steam_id: steam_id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// What happens to a telemetry field whose value cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnMalformed {
    /// The field is left as `None`.
    Absent,
    /// The whole parse fails.
    Fail,
}

const LOCATION_POLICY: OnMalformed = OnMalformed::Absent;
const NUMBER_POLICY: OnMalformed = OnMalformed::Fail;

fn apply_policy<T>(
    policy: OnMalformed,
    field: &'static str,
    value: &str,
    parsed: Option<T>,
) -> Result<Option<T>, ParseError> {
    match (parsed, policy) {
        (Some(parsed), _) => Ok(Some(parsed)),
        (None, OnMalformed::Absent) => Ok(None),
        (None, OnMalformed::Fail) => Err(ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

/// Parses the reply to [`Request::PlayerData`](crate::Request::PlayerData).
///
/// Each line describing a player becomes one [`PlayerData`]. Lines are sequences of `Key: Value`
/// pairs separated by `", "`, optionally prefixed with a `[...] ` tag. Lines without a `Name` or
/// `PlayerDataName` key are skipped.
///
/// A malformed `Location` leaves the location empty, but a numeric field such as `Growth` that is
/// present with a non-numeric value fails with [`ParseError::InvalidNumber`].
pub fn parse_player_data(raw: &str) -> Result<Vec<PlayerData>, ParseError> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_tag)
        .filter(|line| line.contains("Name:") || line.contains("PlayerDataName:"))
        .map(parse_player_data_line)
        .collect()
}

fn parse_player_data_line(line: &str) -> Result<PlayerData, ParseError> {
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for part in line.split(", ") {
        let (key, value) = match part.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => continue,
        };
        let key = if key == "PlayerDataName" { "Name" } else { key };
        fields.insert(key, value);
    }

    let number = |field: &'static str| -> Result<Option<f64>, ParseError> {
        match fields.get(field) {
            Some(value) => apply_policy(NUMBER_POLICY, field, value, value.parse().ok()),
            None => Ok(None),
        }
    };
    let location = match fields.get("Location") {
        Some(value) => apply_policy(LOCATION_POLICY, "Location", value, parse_location(value))?,
        None => None,
    };

    Ok(PlayerData {
        player: Player {
            steam_id: fields.get("PlayerID").unwrap_or(&"").to_string(),
            name: fields.get("Name").unwrap_or(&"").to_string(),
        },
        location,
        dino: fields.get("Class").map(|value| strip_class_markers(value)),
        growth: number("Growth")?,
        health: number("Health")?,
        stamina: number("Stamina")?,
        hunger: number("Hunger")?,
        thirst: number("Thirst")?,
    })
}

/// Parses `X=1.0 Y=2.0 Z=3.0`. Either all three axes parse or there is no location.
fn parse_location(value: &str) -> Option<Location> {
    let mut axes = value.split_whitespace().map(|token| {
        token
            .split('=')
            .nth(1)
            .and_then(|number| number.parse::<f64>().ok())
    });

    match (axes.next(), axes.next(), axes.next()) {
        (Some(Some(x)), Some(Some(y)), Some(Some(z))) => Some(Location { x, y, z }),
        _ => None,
    }
}

/// Class names are wrapped in three leading and two trailing marker characters.
fn strip_class_markers(value: &str) -> String {
    let chars: Vec<char> = value.trim().chars().collect();
    if chars.len() <= 5 {
        return String::new();
    }
    chars[3..chars.len() - 2].iter().collect()
}

/// Parses the reply to [`Request::ServerDetails`](crate::Request::ServerDetails).
///
/// Boolean fields are `true` only for a case-insensitive `true`, `false` for any other value, and
/// `None` when absent. Integer fields are `None` when absent or not a number.
pub fn parse_server_details(raw: &str) -> ServerDetails {
    let mut fields: HashMap<&str, &str> = HashMap::new();
    for part in strip_tag(raw).split(',') {
        if let Some((key, value)) = part.trim().split_once(':') {
            fields.insert(key.trim(), value.trim());
        }
    }

    let string = |key: &str| fields.get(key).map(|value| value.to_string());
    let boolean = |key: &str| fields.get(key).map(|value| value.eq_ignore_ascii_case("true"));
    let integer = |key: &str| fields.get(key).and_then(|value| value.parse::<i64>().ok());

    ServerDetails {
        name: string("ServerDetailsServerName"),
        password: string("ServerPassword"),
        map: string("ServerMap"),
        max_players: integer("ServerMaxPlayers"),
        current_players: integer("ServerCurrentPlayers"),
        enable_mutations: boolean("bEnableMutations"),
        enable_humans: boolean("bEnableHumans"),
        server_password: boolean("bServerPassword"),
        queue_enabled: boolean("bQueueEnabled"),
        server_whitelist: boolean("bServerWhitelist"),
        spawn_ai: boolean("bSpawnAI"),
        allow_recording_replay: boolean("bAllowRecordingReplay"),
        use_region_spawning: boolean("bUseRegionSpawning"),
        use_region_spawn_cooldown: boolean("bUseRegionSpawnCooldown"),
        region_spawn_cooldown_time_seconds: integer("RegionSpawnCooldownTimeSeconds"),
        day_length_minutes: integer("ServerDayLengthMinutes"),
        night_length_minutes: integer("ServerNightLengthMinutes"),
        enable_global_chat: boolean("bEnableGlobalChat"),
    }
}

/// Reads the reply to [`Request::ToggleHumans`](crate::Request::ToggleHumans).
///
/// Humans are considered enabled if `On` appears anywhere in the reply.
pub fn are_humans_enabled(raw: &str) -> bool {
    raw.contains("On")
}

/// Parses the reply to [`Request::UpdatePlayables`](crate::Request::UpdatePlayables) into the
/// list of enabled playable classes, e.g. `Playables: Rex, Stego`.
///
/// Everything after the first `:` is the list, so later colons stay part of a class name. A reply
/// without any `:` yields an empty list.
pub fn parse_playables_update(raw: &str) -> Vec<String> {
    let list = match raw.split_once(':') {
        Some((_, list)) => list,
        None => return Vec::new(),
    };

    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(steam_id: &str, name: &str) -> Player {
        Player {
            steam_id: steam_id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn player_list_pairs_ids_with_names() {
        let players =
            parse_player_list("PlayerList76561190000000001,76561190000000002,Alice,Bob");
        assert_eq!(
            players,
            vec![
                player("76561190000000001", "Alice"),
                player("76561190000000002", "Bob"),
            ]
        );
    }

    #[test]
    fn player_list_ignores_newlines_and_empty_tokens() {
        let players = parse_player_list("PlayerList\n1,2,\nAlice,Bob,\n");
        assert_eq!(players, vec![player("1", "Alice"), player("2", "Bob")]);
    }

    #[test]
    fn player_list_with_odd_token_count_drops_last_token() {
        // Halving 5 tokens gives ids [A, B] and names [C, Alice, Bob]; zipping stops after two.
        let players = parse_player_list("PlayerListA,B,C,Alice,Bob");
        assert_eq!(players, vec![player("A", "C"), player("B", "Alice")]);
    }

    #[test]
    fn empty_player_list() {
        assert!(parse_player_list("PlayerList\n").is_empty());
        assert!(parse_player_list("").is_empty());
    }

    #[test]
    fn player_data_line() {
        let players = parse_player_data(
            "PlayerDataName: Rex, PlayerID: 123, Location: X=1.0 Y=2.0 Z=3.0, Growth: 0.5, Class: BP_Rex_C",
        )
        .unwrap();

        assert_eq!(
            players,
            vec![PlayerData {
                player: player("123", "Rex"),
                location: Some(Location {
                    x: 1.0,
                    y: 2.0,
                    z: 3.0
                }),
                dino: Some("Rex".to_string()),
                growth: Some(0.5),
                health: None,
                stamina: None,
                hunger: None,
                thirst: None,
            }]
        );
    }

    #[test]
    fn player_data_strips_tags_and_skips_unrelated_lines() {
        let raw = "[2024.01.01-12.00.00] PlayerDataName: Alice, PlayerID: 1, Health: 0, Thirst: 0.25\n\
                   \n\
                   PlayerData\n\
                   [2024.01.01-12.00.00] Name: Bob, PlayerID: 2, Hunger: 1.0, Stamina: 0.75\n";
        let players = parse_player_data(raw).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].player, player("1", "Alice"));
        assert_eq!(players[0].health, Some(0.0));
        assert_eq!(players[0].thirst, Some(0.25));
        assert_eq!(players[0].growth, None);
        assert_eq!(players[1].player, player("2", "Bob"));
        assert_eq!(players[1].hunger, Some(1.0));
        assert_eq!(players[1].stamina, Some(0.75));
        assert_eq!(players[1].location, None);
    }

    #[test]
    fn malformed_location_is_absent_but_line_still_parses() {
        let players =
            parse_player_data("Name: Rex, PlayerID: 1, Location: X=1.0 Y=2.0, Growth: 0.9").unwrap();
        assert_eq!(players[0].location, None);
        assert_eq!(players[0].growth, Some(0.9));

        let players = parse_player_data("Name: Rex, Location: X=1.0 Y=abc Z=3.0").unwrap();
        assert_eq!(players[0].location, None);
    }

    #[test]
    fn non_numeric_number_fails_parse() {
        let err = parse_player_data("Name: Rex, PlayerID: 1, Growth: lots").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                field: "Growth",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn missing_identity_fields_are_empty() {
        let players = parse_player_data("Name: Rex, Growth: 1").unwrap();
        assert_eq!(players[0].player, player("", "Rex"));
    }

    #[test]
    fn class_markers() {
        assert_eq!(strip_class_markers("BP_Rex_C"), "Rex");
        assert_eq!(strip_class_markers(" BP_Stegosaurus_C "), "Stegosaurus");
        assert_eq!(strip_class_markers("BP_C"), "");
    }

    #[test]
    fn server_details() {
        let raw = "[2024.01.01-12.00.00] ServerDetailsServerName: My Server, ServerPassword: , \
                   ServerMap: Gateway, ServerMaxPlayers: 100, ServerCurrentPlayers: 12, \
                   bEnableMutations: true, bEnableHumans: False, bServerPassword: yes, \
                   RegionSpawnCooldownTimeSeconds: abc, ServerDayLengthMinutes: 45";
        let details = parse_server_details(raw);

        assert_eq!(details.name.as_deref(), Some("My Server"));
        assert_eq!(details.password.as_deref(), Some(""));
        assert_eq!(details.map.as_deref(), Some("Gateway"));
        assert_eq!(details.max_players, Some(100));
        assert_eq!(details.current_players, Some(12));
        assert_eq!(details.enable_mutations, Some(true));
        assert_eq!(details.enable_humans, Some(false));
        assert_eq!(details.server_password, Some(false));
        assert_eq!(details.queue_enabled, None);
        assert_eq!(details.region_spawn_cooldown_time_seconds, None);
        assert_eq!(details.day_length_minutes, Some(45));
        assert_eq!(details.night_length_minutes, None);
    }

    #[test]
    fn server_details_from_garbage_is_empty() {
        assert_eq!(parse_server_details("nothing useful"), ServerDetails::default());
    }

    #[test]
    fn humans_status() {
        assert!(are_humans_enabled("Humans are now: On"));
        assert!(!are_humans_enabled("Humans are now: Off"));
        assert!(!are_humans_enabled(""));
    }

    #[test]
    fn playables_update() {
        assert_eq!(parse_playables_update("Playables: Rex, Stego"), vec!["Rex", "Stego"]);
        assert_eq!(parse_playables_update("Playables: Rex,, Stego ,"), vec!["Rex", "Stego"]);
        assert!(parse_playables_update("Playables:").is_empty());
        assert!(parse_playables_update("no list here").is_empty());
    }

    #[test]
    fn playables_update_keeps_text_after_later_colons() {
        assert_eq!(
            parse_playables_update("Playables: Rex, Stego: x"),
            vec!["Rex", "Stego: x"]
        );
    }
}
