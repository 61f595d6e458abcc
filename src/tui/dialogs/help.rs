use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use daybook::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60.min(area.width);
    let help_height = 23.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.help_section);
    let help_text = vec![
        Line::from(vec![Span::styled("daybook Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Day Navigation:", section)]),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Select appointment group"),
        Line::from("  J/K      - Scroll the hour grid"),
        Line::from("  t        - Jump to today"),
        Line::from("  r        - Reload appointments"),
        Line::from(""),
        Line::from(vec![Span::styled("Appointments:", section)]),
        Line::from("  i/Enter  - Open appointment details"),
        Line::from("  n        - New appointment"),
        Line::from(""),
        Line::from(vec![Span::styled("Details Dialog:", section)]),
        Line::from("  j/k      - Move department cursor"),
        Line::from("  Enter    - Load department employees"),
        Line::from("  a/x      - Add/remove participant"),
        Line::from("  s/u      - Save/update appointment"),
        Line::from("  q/Esc    - Close dialog"),
        Line::from(""),
        Line::from(vec![Span::styled("Commands:", section)]),
        Line::from("  :q       - Quit"),
        Line::from("  :r       - Reload appointments"),
        Line::from("  :goto    - Jump to date (:goto 2025-12-25)"),
        Line::from("  :today   - Jump to today"),
        Line::from("  :new     - New appointment"),
        Line::from("  :theme   - Change theme (:theme gruvbox)"),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(app.theme.dialog_bg)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
