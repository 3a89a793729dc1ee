use crate::app::App;
use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_status_bar<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    if let Some((message, timestamp)) = &app.status_message {
        // Keep the message up while something is still running.
        let busy = app.is_authenticating
            || app.dispatcher.any_in_flight()
            || app.restore.is_restoring();
        let should_show = busy || timestamp.elapsed().as_secs() < 5;

        if should_show {
            let style = if message.to_lowercase().contains("error")
                || message.to_lowercase().contains("failed")
                || message.to_lowercase().contains("required")
            {
                Style::default().fg(Color::Red)
            } else if message.to_lowercase().contains("success")
                || message.to_lowercase().contains("welcome")
            {
                Style::default().fg(Color::Green)
            } else if message.to_lowercase().contains("...") {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Yellow)
            };

            let paragraph = Paragraph::new(message.as_str())
                .style(style)
                .alignment(ratatui::layout::Alignment::Center);
            f.render_widget(paragraph, area);
        } else {
            // Clear the status message if it's expired
            app.clear_status_message();
        }
    }
}
