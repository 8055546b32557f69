use crate::report::{GameSource, Notice};
use anyhow::Context;
use chrono::NaiveDate;
use mlb_api::{GameBroadcastInfo, GameId, ScheduledGame};
use std::collections::HashMap;

pub const TV_LIST_HEADER: &str = "SPs to watch on TV today #SpringSPnotes

Get morning updates to EVERY SP via my daily Plus Pitch Podcast AND SP Roundup article on the Pitcher List site.
";

/// A scheduled game with its broadcast flag attached; `None` when the
/// broadcast query had no row for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvGame {
    pub game: ScheduledGame,
    pub on_tv: Option<bool>,
}

/// Build the TV starter list for `date`. `Ok(None)` means there was nothing
/// to list; the reason is in `notices`.
pub async fn build_tv_list<S: GameSource>(
    source: &S,
    date: NaiveDate,
    notices: &mut Vec<Notice>,
) -> anyhow::Result<Option<String>> {
    let broadcasts = source
        .broadcasts(date)
        .await
        .with_context(|| format!("fetching broadcasts for {date}"))?;
    let schedule = source
        .schedule(date)
        .await
        .with_context(|| format!("fetching schedule for {date}"))?;

    if schedule.is_empty() {
        notices.push(Notice::warning(format!(
            "No games scheduled for {date}. The today's TV pitcher list cannot be generated."
        )));
        return Ok(None);
    }

    let on_tv: Vec<ScheduledGame> = attach_broadcasts(schedule, &broadcasts)
        .into_iter()
        .filter(|g| g.on_tv == Some(true))
        .map(|g| g.game)
        .collect();

    if on_tv.is_empty() {
        notices.push(Notice::warning("No TV games found for today."));
        return Ok(None);
    }

    Ok(Some(render_tv_list(&on_tv)))
}

/// Left join: every scheduled game is kept, with the broadcast flag when one
/// exists for its id.
pub fn attach_broadcasts(
    schedule: Vec<ScheduledGame>,
    broadcasts: &[GameBroadcastInfo],
) -> Vec<TvGame> {
    let mut flags: HashMap<GameId, bool> = HashMap::with_capacity(broadcasts.len());
    for b in broadcasts {
        flags.entry(b.game_id).or_insert(b.on_tv);
    }

    schedule
        .into_iter()
        .map(|game| {
            let on_tv = flags.get(&game.game_id).copied();
            TvGame { game, on_tv }
        })
        .collect()
}

/// Header banner, then every home probable followed by every away probable,
/// one `"{name} - "` per line. Games without a named starter are skipped.
pub fn render_tv_list(games: &[ScheduledGame]) -> String {
    let home = games.iter().map(|g| g.home_probable_pitcher.as_deref());
    let away = games.iter().map(|g| g.away_probable_pitcher.as_deref());

    let lines: Vec<String> = home
        .chain(away)
        .flatten()
        .filter(|name| !name.is_empty())
        .map(|name| format!("{name} - "))
        .collect();

    format!("{TV_LIST_HEADER}\n{}", lines.join("\n"))
}
