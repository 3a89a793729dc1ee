use crate::app::App;
use crate::ui::centered_rect;
use ratatui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Masked password prompt for a restore. The typed password never appears on
/// screen; only its length does.
pub fn draw<B: Backend>(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 8, f.size());

    let record_name = app
        .restore
        .selected_record()
        .map(|r| r.name.clone())
        .unwrap_or_default();
    let masked = "*".repeat(app.restore.password_len());

    let lines = vec![
        Line::from(Span::styled(
            record_name,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::Gray)),
            Span::styled(masked, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Restore  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Restore Backup")
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
