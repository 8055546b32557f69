use crate::report::RunOutcome;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::{Days, Local, NaiveDate};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Date selection
    // -----------------------------------------------------------------------

    pub fn shift_days(&mut self, days: i64) {
        let date = self.state.selected_date;
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(shifted) = shifted {
            self.state.selected_date = shifted;
        }
    }

    pub fn select_today(&mut self) {
        self.state.selected_date = Local::now().date_naive();
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.state.selected_date
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_generated(&mut self, outcome: RunOutcome) {
        self.state.last_run = Some(outcome);
    }

    // -----------------------------------------------------------------------
    // Toggles
    // -----------------------------------------------------------------------

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_help(&mut self) {
        self.state.show_help = !self.state.show_help;
    }
}
