use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use daybook::{
    app::AppState,
    ui::day_view::{self, GroupBox},
};

const LABEL_WIDTH: u16 = 6;

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let layout = day_view::calculate_layout(app);

    let date_style = if layout.is_today {
        Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)
    };
    let title = Line::from(vec![
        Span::raw(" ◀ "),
        Span::styled(layout.date.format(&app.date_format).to_string(), date_style),
        Span::raw(" ▶ "),
    ]);

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width <= LABEL_WIDTH || inner.height == 0 {
        return;
    }

    let scroll = app.grid_scroll as i32;
    let rows_per_hour = app.rows_per_hour as i32;
    let grid_width = inner.width - LABEL_WIDTH;

    for (idx, label) in layout.hour_labels.iter().enumerate() {
        let row = idx as i32 * rows_per_hour - scroll;
        if row < 0 || row >= inner.height as i32 {
            continue;
        }

        let line = Line::from(vec![
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH as usize), Style::default().fg(app.theme.hour_label)),
            Span::styled("┄".repeat(grid_width as usize), Style::default().fg(app.theme.grid_line)),
        ]);
        let row_area = Rect { x: inner.x, y: inner.y + row as u16, width: inner.width, height: 1 };
        f.render_widget(Paragraph::new(line), row_area);
    }

    if app.is_loading {
        return;
    }

    for group_box in &layout.boxes {
        let Some(box_area) = box_area(app, group_box, inner, scroll) else { continue };
        let selected = group_box.group_index == app.selected_group_index;
        render_box(f, app, group_box, box_area, selected);
    }

    if layout.off_grid > 0 {
        let note = format!("{} outside the grid", layout.off_grid);
        let note_area = Rect { x: inner.x, y: inner.y + inner.height - 1, width: inner.width, height: 1 };
        f.render_widget(
            Paragraph::new(Span::styled(note, Style::default().fg(app.theme.more_indicator))),
            note_area,
        );
    }
}

fn box_area(app: &AppState, group_box: &GroupBox, inner: Rect, scroll: i32) -> Option<Rect> {
    let top = app.grid.px_to_rows(group_box.geometry.top, app.rows_per_hour) - scroll;
    let height = app.grid.px_to_rows(group_box.geometry.height, app.rows_per_hour).max(1);

    let visible_top = top.max(0);
    let visible_bottom = (top + height).min(inner.height as i32);
    if visible_bottom <= visible_top {
        return None;
    }

    Some(Rect {
        x: inner.x + LABEL_WIDTH,
        y: inner.y + visible_top as u16,
        width: inner.width - LABEL_WIDTH,
        height: (visible_bottom - visible_top) as u16,
    })
}

fn render_box(f: &mut Frame, app: &AppState, group_box: &GroupBox, area: Rect, selected: bool) {
    let (bg, fg) = if selected {
        (app.theme.selected_bg, app.theme.selected_fg)
    } else {
        (app.theme.appointment_bg, app.theme.appointment_fg)
    };
    let base = Style::default().bg(bg).fg(fg);

    let mut first_line = vec![Span::styled(group_box.title.clone(), base.add_modifier(Modifier::BOLD))];
    if let Some(more) = group_box.more_label() {
        first_line.push(Span::raw(" "));
        first_line.push(Span::styled(more, base.fg(app.theme.more_indicator)));
    }

    let mut lines = vec![Line::from(first_line)];
    lines.push(Line::from(Span::styled(
        group_box.time_label.clone(),
        base.fg(if selected { fg } else { Color::Gray }),
    )));
    if group_box.geometry.clipped {
        lines.push(Line::from(Span::styled("continues off grid", base.add_modifier(Modifier::ITALIC))));
    }

    f.render_widget(Paragraph::new(lines).style(base), area);
}
