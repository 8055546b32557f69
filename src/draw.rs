use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::report::{NoticeLevel, RunOutcome, report_file_name, tv_list_file_name};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

const KEY_LEGEND: &str = "←/→ day  ↑/↓ week  t today  Enter generate  \" logs  ? help  q quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app);
        }
        draw_main(f, layout.main, app);
        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        if app.state.show_help {
            draw_help(f, f.area());
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let date = app.selected_date();
    let line = Line::from(vec![
        Span::styled(
            " Spring Training Pitcher File Generator ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Date: "),
        Span::styled(
            date.format("%Y/%m/%d").to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(line).block(default_border(Color::White));
    f.render_widget(header, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Files ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = pending_lines(app);
    lines.push(Line::default());
    match &app.state.last_run {
        Some(outcome) => lines.extend(outcome_lines(outcome)),
        None => lines.push(Line::styled(
            "Press Enter to generate both files.",
            Style::default().fg(Color::Gray),
        )),
    }
    lines.push(Line::default());
    lines.push(Line::styled(KEY_LEGEND, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// What the next run would produce for the selected date.
fn pending_lines(app: &App) -> Vec<Line<'static>> {
    let date = app.selected_date();
    let out_dir = app.settings.out_dir.display();
    let report = date
        .pred_opt()
        .map(report_file_name)
        .unwrap_or_else(|| "-".into());
    vec![
        Line::from(format!("Yesterday's pitcher performances → {out_dir}/{report}")),
        Line::from(format!(
            "Today's pitchers on TV           → {out_dir}/{}",
            tv_list_file_name(date)
        )),
    ]
}

fn outcome_lines(outcome: &RunOutcome) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::styled(
        format!("Last run for {}", outcome.selected),
        Style::default().add_modifier(Modifier::UNDERLINED),
    ));
    for path in &outcome.written {
        lines.push(Line::styled(
            format!("saved {}", path.display()),
            Style::default().fg(Color::Green),
        ));
    }
    for notice in outcome.notices() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Gray,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        lines.push(Line::styled(notice.to_string(), Style::default().fg(color)));
    }
    lines
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default().block(default_border(Color::DarkGray).title(" Logs "));
    f.render_widget(logs, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let width = area.width.min(64);
    let height = area.height.min(14);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let text = vec![
        Line::from("←/→ or h/l   previous / next day"),
        Line::from("↑/↓ or k/j   previous / next week"),
        Line::from("t            back to today"),
        Line::from("Enter or g   generate both files"),
        Line::from("f            toggle full screen"),
        Line::from("\"            toggle log pane"),
        Line::from("q            quit"),
        Line::default(),
        Line::from("The report covers the day before the selected date;"),
        Line::from("the TV list covers the selected date."),
    ];
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Left)
            .block(default_border(Color::White).title(" Help ")),
        popup,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(3), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
