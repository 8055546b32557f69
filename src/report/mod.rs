//! Yesterday's pitcher report and today's TV starter list.
//!
//! Both artifacts are built from the same four collaborators (schedule,
//! boxscore, Savant feed, people lookup) behind [`GameSource`]. Each
//! generation is independent: a failure in one never touches the other.

pub mod artifact;
pub mod join;
pub mod render;
pub mod source;
pub mod tv_list;

use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

pub use source::GameSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-visible message produced while generating an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        write!(f, "{tag}: {}", self.message)
    }
}

/// A finished text file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

/// Outcome of one artifact pipeline: the file, if any, and what happened.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub artifact: Option<Artifact>,
    pub notices: Vec<Notice>,
}

impl Generation {
    fn skipped(notices: Vec<Notice>) -> Self {
        Self { artifact: None, notices }
    }
}

/// Rendering switches that do not change what is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Append the column label to each stat ("6.0 IP" instead of "6.0").
    pub stat_labels: bool,
}

pub fn report_file_name(report_date: NaiveDate) -> String {
    format!("output_{}.txt", report_date.format("%Y-%m-%d"))
}

pub fn tv_list_file_name(date: NaiveDate) -> String {
    format!("pitcher_list_on_tv_{}.txt", date.format("%Y-%m-%d"))
}

/// Performance report for the games played the day before `selected`.
pub async fn generate_report<S: GameSource>(
    source: &S,
    selected: NaiveDate,
    options: ReportOptions,
) -> Generation {
    let Some(report_date) = selected.pred_opt() else {
        return Generation::skipped(vec![Notice::error(format!(
            "{selected} has no previous day"
        ))]);
    };

    let mut notices = Vec::new();
    match join::collect_report_rows(source, report_date, &mut notices).await {
        Ok(Some(rows)) => {
            let contents = render::render_report(&rows, options);
            notices.push(Notice::info(format!(
                "Pitcher performances for {report_date}: {} pitchers",
                rows.len()
            )));
            Generation {
                artifact: Some(Artifact { file_name: report_file_name(report_date), contents }),
                notices,
            }
        }
        Ok(None) => Generation::skipped(notices),
        Err(e) => {
            log::error!("report for {report_date} failed: {e:#}");
            notices.push(Notice::error(format!("Error building yesterday's pitcher file: {e:#}")));
            Generation::skipped(notices)
        }
    }
}

/// Probable starters on TV for `selected`.
pub async fn generate_tv_list<S: GameSource>(source: &S, selected: NaiveDate) -> Generation {
    let mut notices = Vec::new();
    match tv_list::build_tv_list(source, selected, &mut notices).await {
        Ok(Some(contents)) => {
            notices.push(Notice::info(format!("TV starters for {selected} ready")));
            Generation {
                artifact: Some(Artifact { file_name: tv_list_file_name(selected), contents }),
                notices,
            }
        }
        Ok(None) => Generation::skipped(notices),
        Err(e) => {
            log::error!("tv list for {selected} failed: {e:#}");
            notices.push(Notice::error(format!("Error building today's TV pitcher list: {e:#}")));
            Generation::skipped(notices)
        }
    }
}

/// Both files for one selected date.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub selected: NaiveDate,
    pub report: Generation,
    pub tv_list: Generation,
    pub written: Vec<PathBuf>,
}

impl RunOutcome {
    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.report.notices.iter().chain(self.tv_list.notices.iter())
    }
}

/// Generate yesterday's report and today's TV list for `selected` and write
/// whichever were produced into `out_dir`. The two never affect each other.
pub async fn generate_and_save<S: GameSource>(
    source: &S,
    selected: NaiveDate,
    options: ReportOptions,
    out_dir: &Path,
) -> RunOutcome {
    let (mut report, mut tv_list) = tokio::join!(
        generate_report(source, selected, options),
        generate_tv_list(source, selected),
    );

    let written = [&mut report, &mut tv_list]
        .into_iter()
        .filter_map(|generation| artifact::save(out_dir, generation))
        .collect();

    RunOutcome { selected, report, tv_list, written }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use mlb_api::StatcastStatus;

    #[tokio::test]
    async fn report_is_named_for_the_previous_day() {
        let yesterday = date(2025, 3, 1);
        let source = FakeSource::default()
            .with_game(
                yesterday,
                1,
                true,
                StatcastStatus::StatcastGames,
                Some(boxscore(
                    1,
                    side("NYY", "Yankees", vec![line(10, "Smith", ["6.0", "4", "1", "7", "2"])]),
                    side("BOS", "Red Sox", vec![]),
                )),
            )
            .with_name(10, "J. Smith");

        let generation = generate_report(&source, date(2025, 3, 2), ReportOptions::default()).await;
        let artifact = generation.artifact.expect("report generated");
        assert_eq!(artifact.file_name, "output_2025-03-01.txt");
        assert!(artifact.contents.contains("<strong>J. Smith (NYY) - 6.0, 2, 4, 1, 7.</strong>"));
        assert!(artifact.contents.contains("NYY vs. BOS"));
    }

    #[tokio::test]
    async fn no_games_yesterday_skips_report_but_not_tv_list() {
        let today = date(2025, 3, 2);
        let mut source = FakeSource::default().with_game(
            today,
            5,
            true,
            StatcastStatus::NoStatcast,
            None,
        );
        source.schedules.get_mut(&today).unwrap()[0].home_probable_pitcher = Some("A. Jones".into());

        let report = generate_report(&source, today, ReportOptions::default()).await;
        assert!(report.artifact.is_none());
        assert_eq!(report.notices.len(), 1);
        assert_eq!(report.notices[0].level, NoticeLevel::Warning);
        assert!(report.notices[0].message.contains("2025-03-01"));

        let tv = generate_tv_list(&source, today).await;
        let artifact = tv.artifact.expect("tv list generated");
        assert_eq!(artifact.file_name, "pitcher_list_on_tv_2025-03-02.txt");
        assert!(artifact.contents.ends_with("A. Jones - "));
    }

    #[tokio::test]
    async fn stage_failure_is_reported_as_error_for_that_artifact_only() {
        let yesterday = date(2025, 3, 1);
        let mut source = FakeSource::default().with_game(
            yesterday,
            1,
            true,
            StatcastStatus::StatcastGames,
            Some(boxscore(
                1,
                side("NYY", "Yankees", vec![line(10, "Smith", ["6.0", "4", "1", "7", "2"])]),
                side("BOS", "Red Sox", vec![]),
            )),
        );
        source.broadcasts_fail = true;

        let report = generate_report(&source, date(2025, 3, 2), ReportOptions::default()).await;
        assert!(report.artifact.is_none());
        let last = report.notices.last().unwrap();
        assert_eq!(last.level, NoticeLevel::Error);
        assert!(last.message.contains("schedule service unavailable"), "{}", last.message);
    }

    #[tokio::test]
    async fn run_writes_both_files() {
        let (yesterday, today) = (date(2025, 3, 1), date(2025, 3, 2));
        let mut source = FakeSource::default()
            .with_game(
                yesterday,
                1,
                false,
                StatcastStatus::NoStatcast,
                Some(boxscore(
                    1,
                    side("SF", "Giants", vec![line(30, "Webb", ["2.0", "1", "0", "3", "0"])]),
                    side("LAD", "Dodgers", vec![]),
                )),
            )
            .with_game(today, 2, true, StatcastStatus::NoStatcast, None)
            .with_name(30, "Logan Webb");
        source.schedules.get_mut(&today).unwrap()[0].away_probable_pitcher = Some("Logan Webb".into());

        let temp = tempfile::tempdir().expect("tempdir");
        let outcome = generate_and_save(&source, today, ReportOptions::default(), temp.path()).await;

        assert_eq!(
            outcome.written,
            vec![
                temp.path().join("output_2025-03-01.txt"),
                temp.path().join("pitcher_list_on_tv_2025-03-02.txt"),
            ]
        );
        let report = std::fs::read_to_string(&outcome.written[0]).unwrap();
        assert!(report.contains("No Statcast - No TV"));
        assert!(report.contains("<strong>Logan Webb (SF) - 2.0, 0, 1, 0, 3.</strong>"));
        assert_eq!(outcome.selected, today);
        assert!(outcome.notices().all(|n| n.level == NoticeLevel::Info));
    }

    #[test]
    fn notice_display_tags_level() {
        assert_eq!(Notice::warning("careful").to_string(), "warning: careful");
        assert_eq!(Notice::error("boom").to_string(), "error: boom");
    }
}
