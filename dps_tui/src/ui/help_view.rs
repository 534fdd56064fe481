//! Help tab view

use crate::app::{App, STAT_STEP};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "═══ Navigation ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("1-5", "Jump to tab (Simulate/Calc/Best Set/Log/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Move between fields / scroll"),
        key_line("Esc / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Simulate ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("0-9 / - / Backspace", "Edit the focused base stat (other keys keep their meaning)"),
        key_line("←/→ on a stat", &format!("Change it by {}", STAT_STEP)),
        key_line("←/→ on a slot", "Cycle through the top pieces for that slot"),
        key_line("x / Delete", "Clear the slot's selection"),
        key_line("Enter / s", "Run the simulation"),
        key_line("r", "Reload the gear file"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Best Set ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        key_line("Enter / b", "Try every combination of the required slots"),
        key_line("a", "Copy the best set into the Simulate tab"),
        Line::from(""),
        Line::from(Span::styled(
            "═══ Rules ═══",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("  Required slots: {}", app.config.required_slots.join(", "))),
        Line::from("  Blank stat boxes count as 0; anything else must be a whole number"),
        Line::from("  Combined stat = base + every selected piece"),
        Line::from(format!(
            "  Slots offer the best {} pieces by total substats",
            app.config.top_n
        )),
        Line::from(format!("  Supported range: 0-{} per stat", app.config.range.max_stat)),
        Line::from(format!("  Scoring model: {}", app.model_label())),
        Line::from(format!(
            "  Best set keeps your other slots and tries at most {} combinations",
            app.config.max_combinations
        )),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
