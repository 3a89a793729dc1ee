use crate::app::{ActivePanel, App};
use crate::format;
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_panel == ActivePanel::Files;
    let title = if app.browser.is_at_root() {
        " Files: ~/ ".to_string()
    } else {
        format!(" Files: ~/{} ", app.browser.current_path())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if app.browser.is_loading() {
        let loading = Paragraph::new("Loading...")
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(loading, area);
        return;
    }

    if app.browser.entries().is_empty() {
        let empty = Paragraph::new("No files or folders found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = app
        .browser
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_selected = is_active && i == app.browser.selected_index();

            let mut text = vec![];
            text.push(Span::styled(
                if is_selected { "> " } else { "  " },
                Style::default().fg(Color::Green),
            ));
            text.push(Span::styled(
                if entry.is_directory() { "[D] " } else { "[F] " },
                Style::default().fg(if entry.is_directory() {
                    Color::Cyan
                } else {
                    Color::Gray
                }),
            ));
            text.push(Span::styled(
                entry.name.clone(),
                Style::default().fg(if is_selected {
                    Color::Black
                } else {
                    Color::White
                }),
            ));
            if !entry.is_directory() {
                text.push(Span::styled(
                    format!("  {}", format::human_size_opt(entry.size)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if app.dispatcher.is_in_flight(&entry.path) {
                text.push(Span::styled(
                    "  [backing up...]",
                    Style::default().fg(Color::Yellow),
                ));
            }

            let style = if is_selected {
                Style::default()
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(text)).style(style)
        })
        .collect();

    let list = List::new(list_items).block(block);
    f.render_widget(list, area);
}
