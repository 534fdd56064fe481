//! Best Set tab - exhaustive search over the required slots

use super::{section_header, stat_line};
use crate::app::App;
use dps_core::types::StatKind;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![
        section_header("Search"),
        stat_line("Slots", app.config.required_slots.join(", ")),
        stat_line("Combinations", format!("{} (limit {})", app.search_size(), app.config.max_combinations)),
        stat_line("Model", app.model_label()),
        Line::from(""),
    ];

    match &app.best_set {
        Some(best) => {
            lines.push(Line::from(Span::styled(
                format!("Best: {:.2} DPS", best.dps),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(section_header("Pieces"));
            for (slot, name) in best.selection.iter() {
                lines.push(stat_line(slot, name.to_string()));
            }
            lines.push(Line::from(""));
            lines.push(section_header("Combined Stats"));
            for kind in StatKind::all() {
                lines.push(stat_line(kind.name(), best.combined.get(*kind).to_string()));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {} combinations evaluated. [a] copies this set to Simulate.", best.evaluated),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Press Enter to search using the current base stats",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Best Set "));

    f.render_widget(paragraph, area);
}
