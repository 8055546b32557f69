use crate::report::{GameSource, Notice};
use anyhow::Context;
use chrono::NaiveDate;
use futures_util::future::join_all;
use log::{debug, warn};
use mlb_api::{Boxscore, GameBroadcastInfo, GameId, PitcherLine, StatcastStatus};
use std::collections::HashMap;

/// Display name used when a person id cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Marker the boxscore source puts in its per-team summary rows.
const PLACEHOLDER_MARKER: &str = "Pitchers";

/// A boxscore row tagged with the game it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitcherAppearance {
    pub line: PitcherLine,
    pub team: String,
    /// "HOME vs. AWAY"
    pub game_info: String,
    pub game_id: GameId,
    pub statcast: StatcastStatus,
}

impl PitcherAppearance {
    pub fn is_placeholder(&self) -> bool {
        self.line.namefield.contains(PLACEHOLDER_MARKER)
    }
}

/// An appearance joined with its broadcast flag and resolved display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPitcher {
    pub full_name: String,
    pub on_tv: bool,
    pub appearance: PitcherAppearance,
}

/// Gather, join, filter and name every pitcher who appeared on `report_date`.
///
/// Returns `Ok(None)` when there is nothing to report; the reason has been
/// pushed to `notices`. Per-game fetch failures are skipped with a warning.
/// `Err` means the report as a whole cannot be built.
pub async fn collect_report_rows<S: GameSource>(
    source: &S,
    report_date: NaiveDate,
    notices: &mut Vec<Notice>,
) -> anyhow::Result<Option<Vec<ResolvedPitcher>>> {
    let game_ids: Vec<GameId> = source
        .schedule(report_date)
        .await
        .with_context(|| format!("fetching schedule for {report_date}"))?
        .into_iter()
        .map(|g| g.game_id)
        .collect();

    if game_ids.is_empty() {
        notices.push(Notice::warning(format!(
            "No games found for {report_date}. The yesterday's pitcher file cannot be generated."
        )));
        return Ok(None);
    }

    let broadcasts = source
        .broadcasts(report_date)
        .await
        .with_context(|| format!("fetching broadcasts for {report_date}"))?;

    let appearances = gather_appearances(source, &game_ids, notices).await;
    if appearances.is_empty() {
        notices.push(Notice::warning(
            "No pitcher data could be retrieved for yesterday's games.",
        ));
        return Ok(None);
    }

    let joined: Vec<_> = join_broadcasts(appearances, &broadcasts)
        .into_iter()
        .filter(|(appearance, _)| !appearance.is_placeholder())
        .collect();

    if joined.is_empty() {
        notices.push(Notice::warning(format!(
            "No pitchers from {report_date} matched a scheduled broadcast."
        )));
        return Ok(None);
    }

    Ok(Some(resolve_names(source, joined).await))
}

/// Fetch the Savant status and boxscore of each game, in the order given.
/// A game that fails or has no pitching lines contributes nothing.
pub async fn gather_appearances<S: GameSource>(
    source: &S,
    game_ids: &[GameId],
    notices: &mut Vec<Notice>,
) -> Vec<PitcherAppearance> {
    let mut appearances = Vec::new();

    for &game_id in game_ids {
        debug!("loading game {game_id}");
        let fetched = async {
            let status = source.statcast_status(game_id).await?;
            let boxscore = source.boxscore(game_id).await?;
            Ok::<_, mlb_api::client::ApiError>((status, boxscore))
        }
        .await;

        let (status, boxscore) = match fetched {
            Ok(found) => found,
            Err(e) => {
                warn!("game {game_id} skipped: {e}");
                notices.push(Notice::warning(format!(
                    "Error processing game {game_id}: {e}. Skipping."
                )));
                continue;
            }
        };

        let Some(boxscore) = boxscore else {
            notices.push(Notice::warning(format!(
                "No boxscore data for game {game_id}. Skipping."
            )));
            continue;
        };
        if boxscore.is_empty() {
            notices.push(Notice::warning(format!(
                "No pitcher data for game {game_id}. Skipping."
            )));
            continue;
        }

        appearances.extend(tag_boxscore(game_id, boxscore, status));
    }

    appearances
}

/// Home rows followed by away rows, each tagged with team, matchup and status.
pub fn tag_boxscore(
    game_id: GameId,
    boxscore: Boxscore,
    statcast: StatcastStatus,
) -> Vec<PitcherAppearance> {
    let game_info = boxscore.game_info();
    [boxscore.home, boxscore.away]
        .into_iter()
        .flat_map(|side| {
            let team = side.abbreviation;
            let game_info = game_info.clone();
            side.pitchers.into_iter().map(move |line| PitcherAppearance {
                line,
                team: team.clone(),
                game_info: game_info.clone(),
                game_id,
                statcast,
            })
        })
        .collect()
}

/// Inner join on game id: appearances whose game has no broadcast row are
/// dropped. Row order is preserved.
pub fn join_broadcasts(
    appearances: Vec<PitcherAppearance>,
    broadcasts: &[GameBroadcastInfo],
) -> Vec<(PitcherAppearance, bool)> {
    let mut on_tv: HashMap<GameId, bool> = HashMap::with_capacity(broadcasts.len());
    for b in broadcasts {
        on_tv.entry(b.game_id).or_insert(b.on_tv);
    }

    appearances
        .into_iter()
        .filter_map(|a| on_tv.get(&a.game_id).map(|&tv| (a, tv)))
        .collect()
}

/// Look up every display name concurrently. Output order matches input
/// order; a failed lookup yields [`UNKNOWN_NAME`] for that row only.
pub async fn resolve_names<S: GameSource>(
    source: &S,
    rows: Vec<(PitcherAppearance, bool)>,
) -> Vec<ResolvedPitcher> {
    let names = join_all(
        rows.iter()
            .map(|(appearance, _)| source.player_name(appearance.line.person_id)),
    )
    .await;

    rows.into_iter()
        .zip(names)
        .map(|((appearance, on_tv), name)| {
            let full_name = name.unwrap_or_else(|e| {
                warn!("could not resolve person {}: {e}", appearance.line.person_id);
                UNKNOWN_NAME.to_owned()
            });
            ResolvedPitcher { full_name, on_tv, appearance }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoticeLevel;
    use crate::report::testing::*;

    fn two_game_source() -> FakeSource {
        let day = date(2025, 3, 1);
        FakeSource::default()
            .with_game(
                day,
                1,
                true,
                StatcastStatus::StatcastGames,
                Some(boxscore(
                    1,
                    side("NYY", "Yankees", vec![line(10, "Smith", ["6.0", "4", "1", "7", "2"])]),
                    side("BOS", "Red Sox", vec![line(20, "Brown", ["3.0", "5", "2", "1", "4"])]),
                )),
            )
            .with_game(
                day,
                2,
                false,
                StatcastStatus::NoStatcast,
                Some(boxscore(
                    2,
                    side("SF", "Giants", vec![line(30, "Webb", ["2.0", "1", "0", "3", "0"])]),
                    side("LAD", "Dodgers", vec![]),
                )),
            )
            .with_name(10, "J. Smith")
            .with_name(20, "T. Brown")
            .with_name(30, "Logan Webb")
    }

    fn appearance(game_id: GameId, person_id: u64, namefield: &str) -> PitcherAppearance {
        PitcherAppearance {
            line: line(person_id, namefield, ["1.0", "0", "0", "1", "0"]),
            team: "NYY".into(),
            game_info: "NYY vs. BOS".into(),
            game_id,
            statcast: StatcastStatus::NoStatcast,
        }
    }

    #[tokio::test]
    async fn rows_follow_game_order_home_then_away() {
        let source = two_game_source();
        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, date(2025, 3, 1), &mut notices)
            .await
            .unwrap()
            .expect("rows");

        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["J. Smith", "T. Brown", "Logan Webb"]);
        assert!(notices.is_empty(), "{notices:?}");

        assert_eq!(rows[0].appearance.team, "NYY");
        assert_eq!(rows[1].appearance.team, "BOS");
        assert_eq!(rows[1].appearance.game_info, "NYY vs. BOS");
        assert!(rows[0].on_tv);
        assert!(!rows[2].on_tv);
        assert_eq!(rows[2].appearance.statcast, StatcastStatus::NoStatcast);
    }

    #[tokio::test]
    async fn placeholder_rows_never_survive() {
        let source = two_game_source();
        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, date(2025, 3, 1), &mut notices)
            .await
            .unwrap()
            .unwrap();
        assert!(rows.iter().all(|r| !r.appearance.line.namefield.contains("Pitchers")));
        assert!(rows.iter().all(|r| r.appearance.line.person_id != 0));
    }

    #[tokio::test]
    async fn failed_and_missing_games_are_skipped_with_warnings() {
        let day = date(2025, 3, 1);
        let mut source = two_game_source()
            .with_game(day, 3, true, StatcastStatus::StatcastGames, None);
        source.failing_games.insert(1);

        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, day, &mut notices)
            .await
            .unwrap()
            .unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["Logan Webb"]);
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.level == NoticeLevel::Warning));
        assert!(notices[0].message.contains("Error processing game 1"));
        assert!(notices[1].message.contains("No boxscore data for game 3"));
    }

    #[tokio::test]
    async fn empty_boxscore_is_skipped() {
        let day = date(2025, 3, 1);
        let source = FakeSource::default().with_game(
            day,
            4,
            true,
            StatcastStatus::NoStatcast,
            Some(Boxscore { game_id: 4, ..Default::default() }),
        );
        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, day, &mut notices).await.unwrap();
        assert!(rows.is_none());
        assert!(notices[0].message.contains("No pitcher data for game 4"));
        assert!(notices[1].message.contains("No pitcher data could be retrieved"));
    }

    #[tokio::test]
    async fn games_missing_from_broadcasts_vanish() {
        let day = date(2025, 3, 1);
        let mut source = two_game_source();
        source.broadcasts.get_mut(&day).unwrap().retain(|b| b.game_id != 1);

        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, day, &mut notices)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].appearance.game_id, 2);
        assert!(notices.is_empty(), "inner join drops silently");
    }

    #[tokio::test]
    async fn no_games_scheduled_warns() {
        let source = FakeSource::default();
        let mut notices = Vec::new();
        let rows = collect_report_rows(&source, date(2025, 3, 1), &mut notices)
            .await
            .unwrap();
        assert!(rows.is_none());
        assert_eq!(
            notices,
            vec![Notice::warning(
                "No games found for 2025-03-01. The yesterday's pitcher file cannot be generated."
            )]
        );
    }

    #[test]
    fn join_is_inner_and_keeps_order() {
        let appearances = vec![
            appearance(1, 10, "A"),
            appearance(2, 20, "B"),
            appearance(1, 11, "C"),
            appearance(3, 30, "D"),
        ];
        let broadcasts = [
            GameBroadcastInfo { game_id: 3, on_tv: true },
            GameBroadcastInfo { game_id: 1, on_tv: false },
        ];
        let joined = join_broadcasts(appearances, &broadcasts);
        let summary: Vec<_> = joined
            .iter()
            .map(|(a, tv)| (a.line.namefield.as_str(), *tv))
            .collect();
        assert_eq!(summary, [("A", false), ("C", false), ("D", true)]);
    }

    #[test]
    fn tag_boxscore_labels_each_side() {
        let tagged = tag_boxscore(
            7,
            boxscore(
                7,
                side("NYY", "Yankees", vec![line(10, "Smith", ["6.0", "4", "1", "7", "2"])]),
                side("BOS", "Red Sox", vec![line(20, "Brown", ["3.0", "5", "2", "1", "4"])]),
            ),
            StatcastStatus::Cancelled,
        );
        let teams: Vec<_> = tagged.iter().map(|a| (a.team.as_str(), a.is_placeholder())).collect();
        assert_eq!(teams, [("NYY", true), ("NYY", false), ("BOS", true), ("BOS", false)]);
        assert!(tagged.iter().all(|a| a.game_info == "NYY vs. BOS" && a.game_id == 7));
        assert!(tagged.iter().all(|a| a.statcast == StatcastStatus::Cancelled));
    }

    #[tokio::test]
    async fn one_bad_name_does_not_leak_into_others() {
        let source = FakeSource::default().with_name(10, "J. Smith").with_name(30, "Logan Webb");
        let rows = vec![
            (appearance(1, 10, "Smith"), true),
            (appearance(1, 99, "Ghost"), true),
            (appearance(1, 30, "Webb"), false),
        ];
        let resolved = resolve_names(&source, rows).await;
        let names: Vec<_> = resolved.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["J. Smith", UNKNOWN_NAME, "Logan Webb"]);
    }
}
