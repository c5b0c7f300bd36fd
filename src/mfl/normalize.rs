//! Projection of export JSON into the client's keyed views.
//!
//! MFL serialises a one-element list as a bare object, so every list path
//! here accepts either shape.

use chrono::{TimeZone, Utc};
use chrono_tz::America::Chicago;
use serde_json::{Map, Value};

use super::models::{Franchise, FranchiseMap, FranchiseScoring, LivePlayer, PlayerMap, PlayerRecord};
use crate::error::{MflError, Result};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render Unix seconds as a Chicago wall-clock string.
pub fn parse_unix_timestamp(secs: i64) -> Result<String> {
    let utc = Utc
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| MflError::MalformedResponse(format!("timestamp {} out of range", secs)))?;
    Ok(utc.with_timezone(&Chicago).format(DISPLAY_FORMAT).to_string())
}

/// Records found at a JSON pointer, whether a list or a single object.
fn records<'a>(raw: &'a Value, pointer: &str) -> Result<Vec<&'a Map<String, Value>>> {
    let node = raw
        .pointer(pointer)
        .ok_or_else(|| MflError::MalformedResponse(format!("missing `{}`", pointer)))?;

    let items: Vec<&Value> = match node {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    items
        .into_iter()
        .map(|item| {
            item.as_object().ok_or_else(|| {
                MflError::MalformedResponse(format!("non-object record under `{}`", pointer))
            })
        })
        .collect()
}

/// A scalar field as text; MFL sends most numbers as strings but not all.
fn text(record: &Map<String, Value>, key: &str) -> Result<String> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(MflError::MalformedResponse(format!("`{}` is not a scalar", key))),
        None => Err(MflError::MalformedResponse(format!("missing `{}`", key))),
    }
}

/// `league` export → franchises keyed by id.
pub fn parse_franchises(raw: &Value) -> Result<FranchiseMap> {
    let mut franchises = FranchiseMap::new();
    for row in records(raw, "/league/franchises/franchise")? {
        let last_visit = text(row, "lastVisit")?;
        let secs: i64 = last_visit.trim().parse().map_err(|_| {
            MflError::MalformedResponse(format!("lastVisit `{}` is not Unix seconds", last_visit))
        })?;

        let franchise = Franchise {
            id: text(row, "id")?,
            name: text(row, "name")?,
            owner_name: text(row, "owner_name")?,
            last_visit: parse_unix_timestamp(secs)?,
        };
        franchises.insert(franchise.id.clone(), franchise);
    }
    Ok(franchises)
}

/// `players` export → full player records keyed by id.
pub fn parse_players(raw: &Value) -> Result<PlayerMap> {
    records(raw, "/players/player")?
        .into_iter()
        .map(|record| Ok((text(record, "id")?, record.clone())))
        .collect()
}

fn live_player(live: &Map<String, Value>, players: &PlayerMap) -> Result<LivePlayer> {
    let id = text(live, "id")?;
    let record = players
        .get(&id)
        .ok_or_else(|| MflError::Lookup(format!("player {} not in player data", id)))?;

    // live fields win over the bulk player record
    let mut merged: PlayerRecord = record.clone();
    merged.extend(live.iter().map(|(k, v)| (k.clone(), v.clone())));

    Ok(LivePlayer {
        id,
        name: text(&merged, "name")?,
        team: text(&merged, "team")?,
        position: text(&merged, "position")?,
        score: text(&merged, "score")?,
        game_seconds_remaining: text(&merged, "gameSecondsRemaining")?,
    })
}

/// `liveScoring` export → per-franchise live lines, in response order.
pub fn parse_live_scoring(
    raw: &Value,
    franchises: &FranchiseMap,
    players: &PlayerMap,
) -> Result<Vec<FranchiseScoring>> {
    let mut scoring = Vec::new();
    for block in records(raw, "/liveScoring/franchise")? {
        let franchise_id = text(block, "id")?;
        let franchise = franchises.get(&franchise_id).ok_or_else(|| {
            MflError::Lookup(format!("franchise {} not in league data", franchise_id))
        })?;

        // a franchise with nobody active yet has no `players` node
        let lines = match block.get("players") {
            Some(node) => records(node, "/player")?
                .into_iter()
                .map(|live| live_player(live, players))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        scoring.push(FranchiseScoring {
            franchise_name: franchise.name.clone(),
            manager_name: franchise.owner_name.clone(),
            players: lines,
        });
    }
    Ok(scoring)
}
