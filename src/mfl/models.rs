use std::collections::{BTreeMap, HashMap};

/// Full upstream player object, kept as delivered.
pub type PlayerRecord = serde_json::Map<String, serde_json::Value>;

/// franchise id → franchise, ordered by id
pub type FranchiseMap = BTreeMap<String, Franchise>;

/// player id → full player record
pub type PlayerMap = HashMap<String, PlayerRecord>;

/// A league franchise as shown on the league page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Franchise {
    /// MFL franchise id, e.g. "0001"
    pub id: String,
    pub name: String,
    pub owner_name: String,
    /// Last site visit, `YYYY-MM-DD HH:MM:SS` in America/Chicago
    pub last_visit: String,
}

/// One rostered player's live line for the in-progress week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivePlayer {
    pub id: String,
    pub name: String,
    /// NFL team abbreviation
    pub team: String,
    pub position: String,
    /// Live fantasy score as reported upstream, e.g. "12.40"
    pub score: String,
    pub game_seconds_remaining: String,
}

/// Live scoring for one franchise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FranchiseScoring {
    pub franchise_name: String,
    pub manager_name: String,
    pub players: Vec<LivePlayer>,
}
