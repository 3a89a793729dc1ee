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
    let is_active = app.active_panel == ActivePanel::Vault;
    let count = app.vault.records().len();
    let mut title = format!(
        " My Vault: {} backup{} ",
        count,
        if count == 1 { "" } else { "s" }
    );
    if let Some(storage) = &app.storage {
        let used = storage
            .used_pretty
            .clone()
            .or_else(|| storage.used_bytes.map(format::human_size));
        if let Some(used) = used {
            title = format!("{}- {} used ", title, used);
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    if app.vault.is_loading() {
        let loading = Paragraph::new("Loading...")
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(loading, area);
        return;
    }

    if app.vault.records().is_empty() {
        let empty = Paragraph::new("No backups yet\nUse the file browser to create your first backup")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let restoring = app.restore.is_restoring();
    let list_items: Vec<ListItem> = app
        .vault
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let is_selected = is_active && i == app.vault.selected_index();

            let mut text = vec![];
            text.push(Span::styled(
                if is_selected { "> " } else { "  " },
                Style::default().fg(Color::Green),
            ));
            text.push(Span::styled(
                record.name.clone(),
                Style::default().fg(if is_selected {
                    Color::Black
                } else {
                    Color::White
                }),
            ));
            if let Some(saved_at) = &record.saved_at {
                text.push(Span::styled(
                    format!("  {}", format::human_time(saved_at)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            text.push(Span::styled(
                format!("  {}", format::human_size_opt(record.size)),
                Style::default().fg(Color::DarkGray),
            ));

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

    let mut list = List::new(list_items).block(block);
    if restoring {
        list = list.style(Style::default().add_modifier(Modifier::DIM));
    }
    f.render_widget(list, area);
}
