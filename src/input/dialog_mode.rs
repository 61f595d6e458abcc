use crossterm::event::KeyCode;

use crate::app::{AppState, StubAction};

/// Keys inside the appointment dialog. While the dialog is still loading only
/// closing it is possible.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    if matches!(key, KeyCode::Esc | KeyCode::Char('q')) {
        state.close_dialog();
        return;
    }

    let Some(dialog) = state.dialog.as_mut() else { return };
    if dialog.is_loading {
        return;
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => dialog.move_department_cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => dialog.move_department_cursor_up(),
        KeyCode::Enter => state.choose_department(),
        KeyCode::Char('a') => state.notify_not_implemented(StubAction::AddParticipant),
        KeyCode::Char('x') => state.notify_not_implemented(StubAction::RemoveParticipant),
        KeyCode::Char('s') => state.notify_not_implemented(StubAction::Save),
        KeyCode::Char('u') => state.notify_not_implemented(StubAction::Update),
        _ => {}
    }
}
