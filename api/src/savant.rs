/// Wire types for the Baseball Savant game feed.
/// Endpoint: https://baseballsavant.mlb.com/gf?game_pk={gamePk}
use serde::Deserialize;
use serde_json::Value;

/// Savant's status code for a cancelled game.
pub const CANCELLED_STATUS_CODE: &str = "C";

#[derive(Deserialize, Default, Debug)]
pub struct GameFeedResponse {
    pub game_status_code: Option<String>,
    pub scoreboard: Option<Scoreboard>,
}

#[derive(Deserialize, Default, Debug)]
pub struct Scoreboard {
    pub stats: Option<ScoreboardStats>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardStats {
    pub pitch_velocity: Option<PitchVelocity>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PitchVelocity {
    /// Empty or missing when the game has no pitch tracking.
    pub top_pitches: Option<Vec<Value>>,
}

impl GameFeedResponse {
    pub fn is_cancelled(&self) -> bool {
        self.game_status_code.as_deref() == Some(CANCELLED_STATUS_CODE)
    }

    pub fn has_top_pitches(&self) -> bool {
        self.scoreboard
            .as_ref()
            .and_then(|s| s.stats.as_ref())
            .and_then(|s| s.pitch_velocity.as_ref())
            .and_then(|v| v.top_pitches.as_ref())
            .map(|pitches| !pitches.is_empty())
            .unwrap_or(false)
    }
}
