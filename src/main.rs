mod app;
mod draw;
mod keys;
mod report;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use chrono::NaiveDate;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::error;
use mlb_api::client::MlbApi;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, PartialEq, Eq)]
enum CliCommand {
    Help,
    Version,
    Run(CliArgs),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    /// Generate once for this date without the terminal UI.
    date: Option<NaiveDate>,
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("spnotes {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Ok(CliCommand::Run(args)) => args,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    let mut settings = AppSettings::load();
    if let Some(out_dir) = args.out_dir {
        settings.out_dir = out_dir;
    }

    if let Some(date) = args.date {
        run_headless(&settings, date).await;
        return Ok(());
    }

    run_tui(settings).await
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliCommand, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "-d" | "--date" => {
                let value = args.next().ok_or("--date needs a value (YYYY-MM-DD)")?;
                let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|e| format!("invalid date {value:?}: {e}"))?;
                parsed.date = Some(date);
            }
            "-o" | "--out" => {
                let value = args.next().ok_or("--out needs a directory")?;
                parsed.out_dir = Some(PathBuf::from(value));
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    Ok(CliCommand::Run(parsed))
}

fn usage_text() -> &'static str {
    "spnotes - spring training pitcher notes

Usage:
  spnotes                       interactive date picker
  spnotes --date YYYY-MM-DD     generate both files once and exit
  spnotes --out DIR             write files into DIR
  spnotes --help
  spnotes --version

Files:
  output_<selected date - 1>.txt        pitcher performances, grouped by Statcast/TV
  pitcher_list_on_tv_<selected>.txt     probable starters on TV

Environment:
  SPNOTES_OUT_DIR        Output directory (default .)
  SPNOTES_TIMEOUT_SECS   Per-request timeout in seconds (default 10)
  SPNOTES_STAT_LABELS    Append IP/ER/H/BB/K labels to stat lines (default off)
  SPNOTES_LOG            Log level for the log pane (error, warn, info, debug)"
}

/// Generate both files for `date`, print what happened, and return. Nothing
/// here is fatal: missing data and failures are reported as notices.
async fn run_headless(settings: &AppSettings, date: NaiveDate) {
    let client = MlbApi::new().with_timeout(settings.timeout);
    let outcome = report::generate_and_save(&client, date, settings.report, &settings.out_dir).await;

    for notice in outcome.notices() {
        eprintln!("{notice}");
    }
    for path in &outcome.written {
        println!("{}", path.display());
    }
}

async fn run_tui(settings: AppSettings) -> anyhow::Result<()> {
    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    tui_logger::init_logger(log::LevelFilter::Trace)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    setup_panic_hook();
    setup_terminal()?;

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    let network_worker = NetworkWorker::new(&settings, network_req_rx, network_resp_tx);
    let app = Arc::new(Mutex::new(App::new(settings)));

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_task = tokio::spawn(network_worker.run());

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    cleanup_terminal();

    Ok(())
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    {
        let mut app_guard = app.lock().await;
        draw::draw(&mut terminal, &mut app_guard, loading);
    }

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                match ui_event {
                    UiEvent::KeyPressed(key_event) => {
                        keys::handle_key_bindings(key_event, &app, &network_requests).await;
                    }
                    UiEvent::Resize => {}
                }
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        NetworkResponse::Generated { outcome } => {
            for notice in outcome.notices() {
                if notice.level == report::NoticeLevel::Error {
                    error!("{}", notice.message);
                }
            }
            let mut guard = app.lock().await;
            guard.on_generated(outcome);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let read = tokio::task::spawn_blocking(crossterm_event::read).await;
        if let Ok(Ok(event)) = read {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
