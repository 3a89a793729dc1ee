use crate::app::{App, LoginField};
use crate::ui::centered_rect;
use ratatui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 12, f.size());

    let form = &app.login_form;
    let mode_title = if form.register_mode {
        " NimbusVault - Sign Up "
    } else {
        " NimbusVault - Login "
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Unleashing the Power of Your Data",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        field_line("Username", &form.username, form.field == LoginField::Username),
        field_line(
            "Password",
            &"*".repeat(form.password.chars().count()),
            form.field == LoginField::Password,
        ),
    ];
    if form.register_mode {
        lines.push(field_line(
            "Confirm ",
            &"*".repeat(form.confirm.chars().count()),
            form.field == LoginField::Confirm,
        ));
    }
    lines.push(Line::from(""));
    if app.is_authenticating {
        lines.push(Line::from(Span::styled(
            "Processing...",
            Style::default().fg(Color::Cyan),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            if form.register_mode {
                "[Enter] Sign Up  [Ctrl+R] Have an account?  [Esc] Quit"
            } else {
                "[Enter] Login  [Ctrl+R] Register  [Esc] Quit"
            },
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(mode_title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

fn field_line<'a>(label: &'a str, value: &str, active: bool) -> Line<'a> {
    let marker = if active { "> " } else { "  " };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}{}", value, if active { "_" } else { "" }),
            Style::default().fg(if active { Color::White } else { Color::Gray }),
        ),
    ])
}
