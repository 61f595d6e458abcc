use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use daybook::app::{AppState, Mode};
use crate::tui::{calendar_views, dialogs};

const SIDEBAR_WIDTH: u16 = 48;

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(0),
        ])
        .split(main_chunks[1]);

    let title_text = format!("daybook - {:?} Mode", app.mode);
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::day::render(f, app, content_chunks[0]);

    let main_content = Paragraph::new("Main Content Comes Here")
        .style(Style::default().fg(app.theme.hour_label))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(main_content, content_chunks[1]);

    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.to_string(), app.theme.command_mode)
    } else if let Some(notice) = &app.notice {
        (notice.clone(), app.theme.notice)
    } else {
        let loading = if app.is_loading { "Loading... | " } else { "" };
        (
            format!(
                "{}Appointments: {} | Press 'q' to quit, '?' for help",
                loading,
                app.appointments.len()
            ),
            app.theme.status_bar,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.dialog.is_some() {
        dialogs::appointment::render(f, app);
    }

    if app.show_help {
        dialogs::help::render(f, app);
    }
}
