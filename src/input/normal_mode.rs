use crossterm::event::KeyCode;

use crate::app::{AppState, Mode, StubAction};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.previous_day(),
        KeyCode::Char('l') | KeyCode::Right => state.next_day(),
        KeyCode::Char('j') | KeyCode::Down => state.move_group_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_group_selection_up(),
        KeyCode::Char('J') | KeyCode::PageDown => scroll_grid_down(state),
        KeyCode::Char('K') | KeyCode::PageUp => scroll_grid_up(state),
        KeyCode::Char('t') => jump_to_today(state),
        KeyCode::Char('r') => state.request_reload(),
        KeyCode::Char('n') => state.notify_not_implemented(StubAction::NewAppointment),
        KeyCode::Char('i') | KeyCode::Enter => state.open_details(),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => show_help(state),
        _ => {}
    }
}

fn jump_to_today(state: &mut AppState) {
    state.go_to_date(chrono::Local::now().date_naive());
}

fn scroll_grid_down(state: &mut AppState) {
    let max_scroll = state.grid.hour_rows as usize * state.rows_per_hour as usize;
    state.grid_scroll = (state.grid_scroll + state.rows_per_hour as usize).min(max_scroll);
}

fn scroll_grid_up(state: &mut AppState) {
    state.grid_scroll = state.grid_scroll.saturating_sub(state.rows_per_hour as usize);
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

fn show_help(state: &mut AppState) {
    state.show_help = true;
    state.help_scroll = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::appointment::test_support::{appointment, at, jan};
    use crate::sync::requests::Request;

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.replace_appointments(
            vec![
                appointment(1, jan(15), (9, 0), (10, 0)),
                appointment(2, jan(15), (11, 0), (12, 0)),
            ],
            at(jan(15), 7, 0),
        );
        state
    }

    #[test]
    fn h_key_moves_to_previous_day() {
        let mut state = AppState::new();
        state.selected_date = jan(15);

        handle_key(KeyCode::Char('h'), &mut state);

        assert_eq!(state.selected_date, jan(14));
    }

    #[test]
    fn l_key_moves_to_next_day() {
        let mut state = AppState::new();
        state.selected_date = jan(15);

        handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(state.selected_date, jan(16));
    }

    #[test]
    fn next_day_crosses_month_boundary() {
        let mut state = AppState::new();
        state.selected_date = jan(31);

        handle_key(KeyCode::Char('l'), &mut state);

        assert_eq!(state.selected_date, chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn j_and_k_move_group_selection() {
        let mut state = loaded_state();

        handle_key(KeyCode::Char('j'), &mut state);
        assert_eq!(state.selected_group_index, 1);

        handle_key(KeyCode::Char('k'), &mut state);
        assert_eq!(state.selected_group_index, 0);
    }

    #[test]
    fn t_key_jumps_to_today() {
        let mut state = AppState::new();
        state.selected_date = jan(1);

        handle_key(KeyCode::Char('t'), &mut state);

        assert_eq!(state.selected_date, chrono::Local::now().date_naive());
    }

    #[test]
    fn enter_opens_details_of_selected_group() {
        let mut state = loaded_state();
        handle_key(KeyCode::Char('j'), &mut state);

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Dialog);
        let requests: Vec<_> = state.take_pending_requests().into_iter().map(|(_, r)| r).collect();
        assert_eq!(requests, vec![Request::AppointmentDetails(2)]);
    }

    #[test]
    fn r_key_requests_reload() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('r'), &mut state);

        let requests: Vec<_> = state.take_pending_requests().into_iter().map(|(_, r)| r).collect();
        assert_eq!(requests, vec![Request::Appointments]);
    }

    #[test]
    fn n_key_reports_not_implemented() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('n'), &mut state);

        assert_eq!(state.notice.as_deref(), Some("New appointment (not implemented)"));
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char(':'), &mut state);

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }

    #[test]
    fn grid_scroll_is_bounded() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('K'), &mut state);
        assert_eq!(state.grid_scroll, 0);

        for _ in 0..40 {
            handle_key(KeyCode::Char('J'), &mut state);
        }
        assert_eq!(state.grid_scroll, 32);
    }
}
