//! Calc tab - every term of the last formula evaluation

use super::{section_header, stat_line};
use crate::app::App;
use dps_core::config::ModelKind;
use dps_core::estimator::{FormulaBreakdown, RangeMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_terms(f, app, chunks[0]);
    draw_formulas(f, app, chunks[1]);
}

fn draw_terms(f: &mut Frame, app: &App, area: Rect) {
    let lines = match &app.last_breakdown {
        Some(b) => breakdown_lines(b),
        None if app.config.model.kind == ModelKind::WeightedScore => vec![Line::from(Span::styled(
            format!("{} has no formula terms", app.model_label()),
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            "Run a simulation to see the breakdown",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Last Simulation "));

    f.render_widget(paragraph, area);
}

fn breakdown_lines(b: &FormulaBreakdown) -> Vec<Line<'static>> {
    vec![
        section_header("Cast Rate"),
        stat_line("GCD", format!("{:.2}s", b.gcd)),
        stat_line("Casts / min", format!("{:.2}", b.casts_per_minute)),
        stat_line("Potency / sec", format!("{:.2}", b.potency_per_second)),
        Line::from(""),
        section_header("Multipliers"),
        stat_line("Crit rate", format!("{:.1}%", b.crit_rate * 100.0)),
        stat_line("Crit bonus", format!("×{:.3}", b.crit_bonus)),
        stat_line("Direct hit rate", format!("{:.1}%", b.direct_hit_rate * 100.0)),
        stat_line("Determination", format!("×{:.3}", b.determination_bonus)),
        stat_line("Spell speed", format!("×{:.3}", b.spell_speed_bonus)),
        stat_line("Total", format!("×{:.4}", b.multiplier)),
        Line::from(""),
        Line::from(Span::styled(
            format!("DPS = {:.2}", b.dps),
            Style::default().fg(Color::Yellow),
        )),
    ]
}

fn draw_formulas(f: &mut Frame, app: &App, area: Rect) {
    let c = &app.config.formula;
    let white = Style::default().fg(Color::White);
    let gray = Style::default().fg(Color::Gray);

    let lines = vec![
        section_header("Formula"),
        Line::from(""),
        Line::from(Span::styled(
            "DPS = Potency / GCD × Det × Crit × DH × SpS",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  n(stat) = (stat - {}) / {}", c.base_sub, c.level_div),
            white,
        )),
        Line::from(Span::styled(
            format!("  GCD  = {} - {} × n(SpS) ms", c.base_gcd_ms, c.gcd_coefficient),
            white,
        )),
        Line::from(Span::styled(
            format!("  Crit = 1 + rate × (bonus - 1), rate = ({}n + {}) / 1000", c.crit_rate_coefficient, c.crit_rate_base),
            white,
        )),
        Line::from(Span::styled(
            format!("         bonus = ({}n + {}) / 1000", c.crit_bonus_coefficient, c.crit_bonus_base),
            white,
        )),
        Line::from(Span::styled(
            format!("  DH   = 1 + {} × {}n / 1000", c.direct_hit_bonus, c.direct_hit_coefficient),
            white,
        )),
        Line::from(Span::styled(
            format!("  Det  = ({}n + {}) / 1000", c.determination_coefficient, c.determination_base),
            white,
        )),
        Line::from(Span::styled(
            format!("  SpS  = 1 + (SpS - {}) / {}", c.base_sub, c.spell_speed_divisor),
            white,
        )),
        Line::from(""),
        section_header("Range"),
        Line::from(Span::styled(
            format!("  Stats above {} are {}", app.config.range.max_stat, range_action(app.config.range.mode)),
            gray,
        )),
        Line::from(Span::styled(format!("  Potency per cast: {}", c.potency), gray)),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Reference "));

    f.render_widget(paragraph, area);
}

fn range_action(mode: RangeMode) -> &'static str {
    match mode {
        RangeMode::Clamp => "clamped",
        RangeMode::Reject => "rejected",
    }
}
