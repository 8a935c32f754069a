use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Successful,
    Unsuccessful,
    Other,
}

impl Outcome {
    fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Successful") => Outcome::Successful,
            Some("Unsuccessful") => Outcome::Unsuccessful,
            _ => Outcome::Other,
        }
    }
}

/// One parsed event row, kept in original file order. `row` is the
/// position within the file and serves as the stable ordering tie-break.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub row: usize,
    pub team: String,
    pub player_id: Option<u32>,
    pub player_name: Option<String>,
    pub kind: String,
    pub outcome: Outcome,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub related_player_id: Option<u32>,
    pub expanded_minute: u32,
    pub second: u32,
}

/// An event narrowed to type "Pass", with the related-player recipient
/// resolved against the player reference table. The network builder does
/// not use this recipient; it infers its own from the event sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub team: String,
    pub player_id: Option<u32>,
    pub player_name: Option<String>,
    pub outcome: Outcome,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub recipient_id: Option<u32>,
    pub recipient_name: Option<String>,
    pub expanded_minute: u32,
    pub second: u32,
}

/// Owned, immutable session data. Loaded once at startup; every view is a
/// pure function over this plus the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub events: Vec<Event>,
    pub players: HashMap<u32, String>,
    pub passes: Vec<Pass>,
    pub teams: Vec<String>,
    pub skipped_events: usize,
    pub skipped_players: usize,
}

impl Dataset {
    pub fn load(events_path: &Path, players_path: &Path) -> Result<Dataset> {
        let mut missing = Vec::new();
        for path in [events_path, players_path] {
            if !path.exists() {
                missing.push(path.display().to_string());
            }
        }
        if !missing.is_empty() {
            return Err(anyhow!("input file(s) not found: {}", missing.join(", ")));
        }

        let (players, skipped_players) = load_players(players_path)?;
        let (events, skipped_events) = load_events(events_path)?;

        let passes = derive_passes(&events, &players);
        let teams = distinct_teams(&events);

        Ok(Dataset {
            events,
            players,
            passes,
            teams,
            skipped_events,
            skipped_players,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(rename = "teamName")]
    team: String,
    #[serde(rename = "playerId", deserialize_with = "numeric_id", default)]
    player_id: Option<u32>,
    #[serde(rename = "playerName")]
    player_name: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "outcomeType")]
    outcome: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    #[serde(rename = "endX")]
    end_x: Option<f64>,
    #[serde(rename = "endY")]
    end_y: Option<f64>,
    #[serde(rename = "relatedPlayerId", deserialize_with = "numeric_id", default)]
    related_player_id: Option<u32>,
    #[serde(rename = "expandedMinute", deserialize_with = "numeric_id", default)]
    expanded_minute: Option<u32>,
    #[serde(deserialize_with = "numeric_id", default)]
    second: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PlayerRow {
    #[serde(rename = "playerId", deserialize_with = "numeric_id", default)]
    player_id: Option<u32>,
    name: Option<String>,
}

/// Id columns in pandas-exported CSVs show up as "8653", "8653.0", or an
/// empty cell. Anything else is treated as absent rather than fatal.
fn numeric_id<'de, D>(de: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    let Some(raw) = raw else { return Ok(None) };
    Ok(parse_numeric_id(&raw))
}

fn parse_numeric_id(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) {
            return Some(f as u32);
        }
    }
    None
}

fn load_events(path: &Path) -> Result<(Vec<Event>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open events file {}", path.display()))?;

    let mut events = Vec::new();
    let mut skipped = 0usize;
    for record in reader.deserialize::<EventRow>() {
        let row = match record {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        // Events without ordering keys cannot be placed in the sequence.
        let (Some(expanded_minute), Some(second)) = (row.expanded_minute, row.second) else {
            skipped += 1;
            continue;
        };
        events.push(Event {
            row: events.len(),
            team: row.team.trim().to_string(),
            player_id: row.player_id,
            player_name: normalize_name(row.player_name),
            kind: row.kind.trim().to_string(),
            outcome: Outcome::from_raw(row.outcome.as_deref()),
            x: row.x,
            y: row.y,
            end_x: row.end_x,
            end_y: row.end_y,
            related_player_id: row.related_player_id,
            expanded_minute,
            second,
        });
    }
    Ok((events, skipped))
}

fn load_players(path: &Path) -> Result<(HashMap<u32, String>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open players file {}", path.display()))?;

    let mut players = HashMap::new();
    let mut skipped = 0usize;
    for record in reader.deserialize::<PlayerRow>() {
        let row = match record {
            Ok(row) => row,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let (Some(id), Some(name)) = (row.player_id, normalize_name(row.name)) else {
            skipped += 1;
            continue;
        };
        // First occurrence wins on duplicate ids.
        players.entry(id).or_insert(name);
    }
    Ok((players, skipped))
}

fn normalize_name(raw: Option<String>) -> Option<String> {
    let name = raw?.trim().to_string();
    if name.is_empty() { None } else { Some(name) }
}

fn derive_passes(events: &[Event], players: &HashMap<u32, String>) -> Vec<Pass> {
    events
        .iter()
        .filter(|e| e.kind == "Pass")
        .map(|e| {
            let recipient_id = e.related_player_id;
            let recipient_name = recipient_id.and_then(|id| players.get(&id).cloned());
            Pass {
                team: e.team.clone(),
                player_id: e.player_id,
                player_name: e.player_name.clone(),
                outcome: e.outcome,
                x: e.x,
                y: e.y,
                end_x: e.end_x,
                end_y: e.end_y,
                recipient_id,
                recipient_name,
                expanded_minute: e.expanded_minute,
                second: e.second,
            }
        })
        .collect()
}

fn distinct_teams(events: &[Event]) -> Vec<String> {
    let mut teams: Vec<String> = events
        .iter()
        .map(|e| e.team.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    teams.sort();
    teams.dedup();
    teams
}
