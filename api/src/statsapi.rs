/// MLB Stats API raw wire types: serde shapes for the v1 endpoints.
/// These map to the clean domain types in client.rs.
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Schedule  (/api/v1/schedule)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleDate {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub game_pk: u64,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
    pub teams: Option<ScheduleTeams>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Broadcast {
    #[serde(rename = "type")]
    pub broadcast_type: Option<String>, // "TV", "AM", "FM"
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleTeams {
    pub home: Option<ScheduleTeam>,
    pub away: Option<ScheduleTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeam {
    pub probable_pitcher: Option<PersonRef>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    #[serde(default)]
    pub id: u64,
    pub full_name: Option<String>,
    /// Present on boxscore players ("Cole"), absent elsewhere.
    pub boxscore_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Boxscore  (/api/v1/game/{gamePk}/boxscore)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscoreResponse {
    pub teams: Option<BoxscoreTeams>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscoreTeams {
    pub home: Option<BoxscoreTeam>,
    pub away: Option<BoxscoreTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscoreTeam {
    pub team: Option<TeamRef>,
    /// Pitcher ids in order of appearance.
    #[serde(default)]
    pub pitchers: Vec<u64>,
    /// Keyed "ID{personId}".
    #[serde(default)]
    pub players: HashMap<String, BoxscorePlayer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BoxscorePlayer {
    pub person: Option<PersonRef>,
    pub stats: Option<PlayerStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerStats {
    pub pitching: Option<PitchingStats>,
}

/// Counting stats arrive as numbers, innings as a string ("6.0"); both are
/// kept as raw JSON and rendered as display tokens.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    pub innings_pitched: Option<Value>,
    pub hits: Option<Value>,
    pub base_on_balls: Option<Value>,
    pub strike_outs: Option<Value>,
    pub earned_runs: Option<Value>,
    pub note: Option<String>, // "(W, 1-0)"
}

// ---------------------------------------------------------------------------
// People  (/api/v1/people/{personId})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Option<u64>,
    pub first_name: Option<String>,
    pub use_name: Option<String>,
    pub last_name: Option<String>,
}
