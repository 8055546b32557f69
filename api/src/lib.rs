pub mod client;
pub mod savant;
pub mod statsapi;

pub type GameId = u64;
pub type PersonId = u64;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the Stats API / Savant wire format
// ---------------------------------------------------------------------------

/// Whether a scheduled game had any TV broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameBroadcastInfo {
    pub game_id: GameId,
    pub on_tv: bool,
}

/// A scheduled game with the probable starters announced for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduledGame {
    pub game_id: GameId,
    pub home_probable_pitcher: Option<String>,
    pub away_probable_pitcher: Option<String>,
}

/// Pitch-tracking availability for a single game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatcastStatus {
    StatcastGames,
    #[default]
    NoStatcast,
    Cancelled,
}

impl StatcastStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StatcastStatus::StatcastGames => "Statcast Games",
            StatcastStatus::NoStatcast => "No Statcast",
            StatcastStatus::Cancelled => "Cancelled",
        }
    }
}

/// Pitching lines for both sides of one game.
#[derive(Debug, Clone, Default)]
pub struct Boxscore {
    pub game_id: GameId,
    pub home: TeamPitching,
    pub away: TeamPitching,
}

impl Boxscore {
    /// True when neither side recorded a pitching line.
    pub fn is_empty(&self) -> bool {
        self.home.pitchers.is_empty() && self.away.pitchers.is_empty()
    }

    /// "HOME vs. AWAY"
    pub fn game_info(&self) -> String {
        format!("{} vs. {}", self.home.abbreviation, self.away.abbreviation)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamPitching {
    pub abbreviation: String,
    /// Tabular rows as the boxscore source lays them out. The first row of a
    /// non-empty side is the "{team} Pitchers" summary placeholder.
    pub pitchers: Vec<PitcherLine>,
}

/// One boxscore pitching row. Stats are display tokens, never parsed: the
/// source sometimes leaves them blank (no out recorded) or non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitcherLine {
    pub person_id: PersonId,
    pub namefield: String,
    pub ip: String,
    pub h: String,
    pub bb: String,
    pub k: String,
    pub er: String,
}
