use crate::report::RunOutcome;
use chrono::{Local, NaiveDate};

#[derive(Debug)]
pub struct AppState {
    /// The date the user picked. Today's TV list is for this date,
    /// the performance report for the day before it.
    pub selected_date: NaiveDate,
    pub last_run: Option<RunOutcome>,
    pub show_logs: bool,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl AppState {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self { selected_date, last_run: None, show_logs: false, show_help: false }
    }
}
