use crate::app::App;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.show_help {
        match (key_event.code, key_event.modifiers) {
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (Char('?') | KeyCode::Esc | KeyCode::Enter, _) => guard.toggle_help(),
            _ => {}
        }
        return;
    }

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Date selection
        (Char('l') | KeyCode::Right, _) => guard.shift_days(1),
        (Char('h') | KeyCode::Left, _) => guard.shift_days(-1),
        (Char('j') | KeyCode::Down, _) => guard.shift_days(7),
        (Char('k') | KeyCode::Up, _) => guard.shift_days(-7),
        (Char('t'), _) => guard.select_today(),

        // Generate both files
        (Char('g') | KeyCode::Enter, _) => {
            let date = guard.selected_date();
            drop(guard);
            let _ = network_requests.send(NetworkRequest::Generate { date }).await;
        }

        // Global
        (Char('f'), _) => guard.toggle_full_screen(),
        (Char('"'), _) => guard.toggle_show_logs(),
        (Char('?'), _) => guard.toggle_help(),

        _ => {}
    }
}
