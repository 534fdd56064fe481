//! Simulate tab view - base stat inputs, slot choices and the result line

use super::{section_header, stat_line, stat_line_with_base};
use crate::app::{App, Field};
use dps_core::types::StatKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_inputs(f, app, chunks[0]);
    draw_result(f, app, chunks[1]);
}

fn draw_inputs(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focused_field();
    let mut lines: Vec<Line> = vec![section_header("Base Stats"), Line::from("")];

    for kind in StatKind::all() {
        let is_selected = focused == Field::Stat(*kind);
        let (prefix, style) = selection_style(is_selected);
        let text = app.stat_text.get(*kind);
        let cursor = if is_selected { "▏" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:16}", kind.name()), style),
            Span::styled(format!("[{:>9}{}]", text, cursor), Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(section_header("Gear"));
    lines.push(Line::from(""));

    for (i, choice) in app.slot_choices.iter().enumerate() {
        let is_selected = focused == Field::Slot(i);
        let (prefix, style) = selection_style(is_selected);
        let marker = if choice.required { "*" } else { " " };

        let piece = match choice.selected_name() {
            Some(name) => Span::styled(name.to_string(), Style::default().fg(Color::Green)),
            None if choice.options.is_empty() => {
                Span::styled("No gear", Style::default().fg(Color::DarkGray))
            }
            None => Span::styled("(none)", Style::default().fg(Color::DarkGray)),
        };

        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:12}{} ", choice.slot, marker), style),
            piece,
        ];
        if let (true, Some(index)) = (is_selected, choice.selected) {
            spans.push(Span::styled(
                format!("  ({}/{})", index + 1, choice.options.len()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  * required slot",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Inputs "),
    );

    f.render_widget(paragraph, area);
}

fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            app.result_text.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match &app.last_report {
        Some(report) => {
            lines.push(section_header("Combined Stats"));
            let base = app.stat_text.parse().ok();
            for kind in StatKind::all() {
                let computed = report.combined.get(*kind);
                let line = match &base {
                    Some(base) => stat_line_with_base(kind.name(), base.get(*kind), computed),
                    None => stat_line(kind.name(), computed.to_string()),
                };
                lines.push(line);
            }
            lines.push(Line::from(""));
            lines.push(section_header("Gear Used"));
            for (slot, name) in &report.gear {
                lines.push(stat_line(slot, name.clone()));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Press Enter to simulate",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(section_header("Gear File"));
    lines.push(stat_line("Path", app.config.gear_path.display().to_string()));
    lines.push(stat_line("Slots", app.pool.slot_count().to_string()));
    lines.push(stat_line("Pieces", app.pool.len().to_string()));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Result "));

    f.render_widget(paragraph, area);
}

fn selection_style(is_selected: bool) -> (&'static str, Style) {
    if is_selected {
        ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    }
}
