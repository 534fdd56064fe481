//! Log tab - session messages, newest last

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .messages
        .iter()
        .map(|message| {
            let color = if message.contains("ERROR") {
                Color::Red
            } else {
                Color::White
            };
            Line::from(Span::styled(message.clone(), Style::default().fg(color)))
        })
        .collect();

    let title = format!(" Log ({}) - full log in {} ", app.messages.len(), app.config.log_path.display());
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((app.log_scroll as u16, 0));

    f.render_widget(paragraph, area);
}
