use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode, StubAction};
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    Goto(NaiveDate),
    Today,
    NewAppointment,
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "r" | "reload" => Command::Reload,
        "help" => Command::Help,
        "today" => Command::Today,
        "new" => Command::NewAppointment,
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto requires a date argument".to_string())
            } else if let Ok(date) = NaiveDate::parse_from_str(parts[1], "%Y-%m-%d") {
                Command::Goto(date)
            } else {
                Command::Error(format!("Invalid date format: {}", parts[1]))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

/// Handles a key typed in command mode. Returns `true` when the user quits.
pub fn handle_key(code: KeyCode, state: &mut AppState) -> bool {
    match code {
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            execute(command, state)
        }
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            false
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
            false
        }
        KeyCode::Char(c) => {
            state.command_buffer.push(c);
            false
        }
        _ => false,
    }
}

fn execute(command: Command, state: &mut AppState) -> bool {
    match command {
        Command::Quit => return true,
        Command::Reload => state.request_reload(),
        Command::Goto(date) => state.go_to_date(date),
        Command::Today => state.go_to_date(chrono::Local::now().date_naive()),
        Command::NewAppointment => state.notify_not_implemented(StubAction::NewAppointment),
        Command::Theme(name) => state.theme = Theme::get_by_name(&name),
        Command::Help => state.show_help = !state.show_help,
        Command::Error(message) => {
            tracing::warn!("{}", message);
            state.notice = Some(message);
        }
    }
    false
}
