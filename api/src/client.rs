use crate::savant::GameFeedResponse;
use crate::statsapi::{BoxscoreResponse, BoxscoreTeam, PeopleResponse, ScheduleResponse};
use crate::{
    Boxscore, GameBroadcastInfo, GameId, PersonId, PitcherLine, ScheduledGame, StatcastStatus,
    TeamPitching,
};
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STATS_API: &str = "https://statsapi.mlb.com";
const SAVANT: &str = "https://baseballsavant.mlb.com";
const MLB_SPORT_ID: u32 = 1;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the MLB Stats API and the Baseball Savant game feed.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    timeout: Duration,
    stats_base: String,
    savant_base: String,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("spnotes/0.1 (spring training pitcher notes)")
                .build()
                .unwrap_or_default(),
            timeout: DEFAULT_TIMEOUT,
            stats_base: STATS_API.to_owned(),
            savant_base: SAVANT.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
            ApiError::NotFound(_) | ApiError::Other(_) => None,
        }
    }
}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at alternate hosts (a local mock server in tests).
    pub fn with_base_urls(mut self, stats_base: &str, savant_base: &str) -> Self {
        self.stats_base = stats_base.trim_end_matches('/').to_owned();
        self.savant_base = savant_base.trim_end_matches('/').to_owned();
        self
    }

    /// Per-request timeout. A request that exceeds it fails as `ApiError::Network`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Broadcast presence for every game scheduled on `date`.
    pub async fn fetch_broadcasts(&self, date: NaiveDate) -> ApiResult<Vec<GameBroadcastInfo>> {
        let url = self.schedule_url(date, "broadcasts");
        let raw: ScheduleResponse = self.get(&url).await?;
        Ok(map_broadcasts(raw))
    }

    /// Games scheduled on `date` with their probable starters.
    pub async fn fetch_schedule(&self, date: NaiveDate) -> ApiResult<Vec<ScheduledGame>> {
        let url = self.schedule_url(date, "probablePitcher(note)");
        let raw: ScheduleResponse = self.get(&url).await?;
        Ok(map_schedule(raw))
    }

    /// Pitching lines for a game. `None` when the source has no boxscore for it.
    pub async fn fetch_boxscore(&self, game_id: GameId) -> ApiResult<Option<Boxscore>> {
        let url = format!("{}/api/v1/game/{game_id}/boxscore", self.stats_base);
        let raw: BoxscoreResponse = self.get(&url).await?;
        Ok(map_boxscore(game_id, raw))
    }

    /// Whether Savant has pitch tracking for a game, or the game was cancelled.
    pub async fn fetch_statcast_status(&self, game_id: GameId) -> ApiResult<StatcastStatus> {
        let url = format!("{}/gf?game_pk={game_id}", self.savant_base);
        let raw: GameFeedResponse = self.get(&url).await?;
        Ok(statcast_status(&raw))
    }

    /// Resolve a person id to "First Last".
    pub async fn fetch_player_name(&self, person_id: PersonId) -> ApiResult<String> {
        let url = format!("{}/api/v1/people/{person_id}", self.stats_base);
        let raw: PeopleResponse = self.get(&url).await?;
        map_player_name(person_id, raw)
    }

    fn schedule_url(&self, date: NaiveDate, hydrate: &str) -> String {
        format!(
            "{}/api/v1/schedule?sportId={MLB_SPORT_ID}&date={}&hydrate={hydrate}",
            self.stats_base,
            date.format("%Y-%m-%d")
        )
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            // The timeout also covers reading the body.
            Ok(res) => res.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    ApiError::Network(e, url.to_owned())
                } else {
                    ApiError::Parsing(e, url.to_owned())
                }
            }),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: Stats API / Savant wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_broadcasts(raw: ScheduleResponse) -> Vec<GameBroadcastInfo> {
    raw.dates
        .into_iter()
        .flat_map(|d| d.games)
        .map(|g| GameBroadcastInfo {
            game_id: g.game_pk,
            on_tv: g
                .broadcasts
                .iter()
                .any(|b| b.broadcast_type.as_deref() == Some("TV")),
        })
        .collect()
}

fn map_schedule(raw: ScheduleResponse) -> Vec<ScheduledGame> {
    raw.dates
        .into_iter()
        .flat_map(|d| d.games)
        .map(|g| {
            let teams = g.teams.unwrap_or_default();
            let probable = |side: Option<crate::statsapi::ScheduleTeam>| {
                side.and_then(|t| t.probable_pitcher)
                    .and_then(|p| p.full_name)
                    .filter(|name| !name.trim().is_empty())
            };
            ScheduledGame {
                game_id: g.game_pk,
                home_probable_pitcher: probable(teams.home),
                away_probable_pitcher: probable(teams.away),
            }
        })
        .collect()
}

fn map_boxscore(game_id: GameId, raw: BoxscoreResponse) -> Option<Boxscore> {
    let teams = raw.teams?;
    if teams.home.is_none() && teams.away.is_none() {
        return None;
    }
    Some(Boxscore {
        game_id,
        home: teams.home.map(map_team_pitching).unwrap_or_default(),
        away: teams.away.map(map_team_pitching).unwrap_or_default(),
    })
}

/// Lay out one side the way the boxscore table does: a "{team} Pitchers"
/// heading row, then one row per pitcher in order of appearance.
fn map_team_pitching(side: BoxscoreTeam) -> TeamPitching {
    let team = side.team.unwrap_or_default();
    let abbreviation = team
        .abbreviation
        .clone()
        .or_else(|| team.team_name.clone())
        .unwrap_or_default();

    let mut pitchers = Vec::with_capacity(side.pitchers.len() + 1);
    if !side.pitchers.is_empty() {
        let team_name = team.team_name.or(team.name).unwrap_or_default();
        pitchers.push(heading_row(&team_name));
    }

    for person_id in &side.pitchers {
        let Some(player) = side.players.get(&format!("ID{person_id}")) else {
            continue;
        };
        let person = player.person.clone().unwrap_or_default();
        let pitching = player
            .stats
            .as_ref()
            .and_then(|s| s.pitching.clone())
            .unwrap_or_default();

        let name = person
            .boxscore_name
            .or(person.full_name)
            .unwrap_or_default();
        let namefield = match pitching.note.as_deref() {
            Some(note) if !note.is_empty() => format!("{name} {note}"),
            _ => name,
        };

        pitchers.push(PitcherLine {
            person_id: *person_id,
            namefield,
            ip: display_token(pitching.innings_pitched.as_ref()),
            h: display_token(pitching.hits.as_ref()),
            bb: display_token(pitching.base_on_balls.as_ref()),
            k: display_token(pitching.strike_outs.as_ref()),
            er: display_token(pitching.earned_runs.as_ref()),
        });
    }

    TeamPitching { abbreviation, pitchers }
}

fn heading_row(team_name: &str) -> PitcherLine {
    PitcherLine {
        person_id: 0,
        namefield: format!("{team_name} Pitchers").trim_start().to_owned(),
        ip: "IP".into(),
        h: "H".into(),
        bb: "BB".into(),
        k: "K".into(),
        er: "ER".into(),
    }
}

/// Render a raw stat as it would print, without interpreting it.
fn display_token(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn statcast_status(raw: &GameFeedResponse) -> StatcastStatus {
    if raw.is_cancelled() {
        StatcastStatus::Cancelled
    } else if raw.has_top_pitches() {
        StatcastStatus::StatcastGames
    } else {
        StatcastStatus::NoStatcast
    }
}

fn map_player_name(person_id: PersonId, raw: PeopleResponse) -> ApiResult<String> {
    let person = raw
        .people
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(format!("no person with id {person_id}")))?;
    let first = person
        .use_name
        .filter(|n| !n.is_empty())
        .or(person.first_name)
        .ok_or_else(|| ApiError::Other(format!("person {person_id} has no first name")))?;
    let last = person
        .last_name
        .ok_or_else(|| ApiError::Other(format!("person {person_id} has no last name")))?;
    Ok(format!("{first} {last}"))
}
