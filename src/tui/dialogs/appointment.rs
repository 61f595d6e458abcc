use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use daybook::app::{AppState, AppointmentDialog};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(dialog) = &app.dialog else {
        return;
    };

    let area = f.size();
    let dialog_width = 70.min(area.width);
    let dialog_height = 26.min(area.height);
    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = ratatui::layout::Rect {
        x,
        y,
        width: dialog_width,
        height: dialog_height,
    };

    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Appointment #{} ", dialog.appointment_id))
        .style(Style::default().bg(app.theme.dialog_bg));

    if dialog.is_loading {
        let loading = Paragraph::new("Loading...")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(loading, dialog_area);
        return;
    }

    let paragraph = Paragraph::new(dialog_lines(app, dialog))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, dialog_area);
}

fn dialog_lines<'a>(app: &AppState, dialog: &'a AppointmentDialog) -> Vec<Line<'a>> {
    let label = Style::default().fg(Color::DarkGray);
    let section = Style::default().fg(app.theme.help_section).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(appointment) = &dialog.appointment {
        lines.push(Line::from(Span::styled(
            appointment.title.as_str(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Start:    ", label),
            Span::raw(appointment.start.format(DATE_TIME_FORMAT).to_string()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("End:      ", label),
            Span::raw(appointment.end.format(DATE_TIME_FORMAT).to_string()),
        ]));
        if !appointment.description.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Details:  ", label),
                Span::raw(appointment.description.as_str()),
            ]));
        }
        let assigned = dialog
            .assigned_employee()
            .map(|employee| employee.display_name())
            .unwrap_or_else(|| "Unassigned".to_string());
        lines.push(Line::from(vec![
            Span::styled("Employee: ", label),
            Span::raw(assigned),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Departments", section)));
    if dialog.departments.is_empty() {
        lines.push(Line::from(Span::styled("  No departments", label)));
    }
    for (idx, department) in dialog.departments.iter().enumerate() {
        let cursor = if idx == dialog.department_cursor { "> " } else { "  " };
        let chosen = dialog
            .selected_department
            .as_ref()
            .is_some_and(|selected| selected.id == department.id);
        let style = if chosen {
            Style::default().fg(app.theme.selected_fg).bg(app.theme.selected_bg)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::raw(cursor),
            Span::styled(department.name.as_str(), style),
        ];
        if let Some(manager) = department.manager_name(&dialog.department_employees) {
            spans.push(Span::styled(format!(" (manager: {})", manager), label));
        }
        lines.push(Line::from(spans));
    }

    if let Some(department) = &dialog.selected_department {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("Employees of {}", department.name), section)));
        if dialog.department_employees.is_empty() {
            lines.push(Line::from(Span::styled(
                "  There are no participants for this appointment",
                label,
            )));
        }
        for employee in &dialog.department_employees {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::raw(employee.name.as_str()),
                Span::styled(" ×", Style::default().fg(Color::Red)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k select | Enter load employees | a add | x remove | s save | u update | Esc close",
        label,
    )));

    lines
}
