//! Application state

use dps_core::{
    config::{ConfigError, ModelKind, SimConfig},
    estimator::{CasterFormula, DpsEstimator, FormulaBreakdown},
    gear::{GearPool, GearSelection},
    optimizer::{combination_count, BestSet},
    simulation::{SimulationReport, SimulationRequest, Simulator},
    stat_block::StatText,
    types::StatKind,
};

/// Longest stat text accepted from the keyboard
const MAX_STAT_TEXT: usize = 9;

/// Amount added or removed by ←/→ on a stat field
pub const STAT_STEP: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Simulate,
    Breakdown,
    BestSet,
    Log,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Simulate, Tab::Breakdown, Tab::BestSet, Tab::Log, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Simulate => "Simulate",
            Tab::Breakdown => "Calc",
            Tab::BestSet => "Best Set",
            Tab::Log => "Log",
            Tab::Help => "Help",
        }
    }
}

/// Which input on the Simulate tab has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Stat(StatKind),
    Slot(usize),
}

/// Ranked options offered for one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChoice {
    pub slot: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub required: bool,
}

impl SlotChoice {
    pub fn selected_name(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|name| name.as_str())
    }
}

pub struct App {
    pub current_tab: Tab,
    pub config: SimConfig,
    pub pool: GearPool,
    pub stat_text: StatText,
    pub slot_choices: Vec<SlotChoice>,
    pub selected_field: usize,
    pub result_text: String,
    pub last_report: Option<SimulationReport>,
    pub last_breakdown: Option<FormulaBreakdown>,
    pub best_set: Option<BestSet>,
    pub messages: Vec<String>,
    pub popup: Option<String>,
    pub log_scroll: usize,
}

impl App {
    /// Load the gear file named by the config and build the initial state
    pub fn new(config: SimConfig, config_error: Option<ConfigError>) -> Self {
        let (pool, gear_error) = GearPool::load_or_empty(&config.gear_path);
        let mut app = App::with_pool(config, pool);

        if let Some(err) = config_error {
            app.messages.push(format!("Config ERROR: {}", err));
            app.popup = Some("Settings file is invalid; using defaults.".to_string());
        }
        match gear_error {
            Some(err) => {
                app.messages.push(format!("LoadGear ERROR: {}", err));
                app.popup = Some(err.user_message());
            }
            None => app.messages.push("Gear loaded successfully.".to_string()),
        }
        app
    }

    /// Build state around an already loaded pool
    pub fn with_pool(config: SimConfig, pool: GearPool) -> Self {
        let slot_choices = build_slot_choices(&config, &pool);
        App {
            current_tab: Tab::Simulate,
            config,
            pool,
            stat_text: StatText::new("0", "0", "0", "0"),
            slot_choices,
            selected_field: 0,
            result_text: "Estimated DPS: ".to_string(),
            last_report: None,
            last_breakdown: None,
            best_set: None,
            messages: vec!["Application started.".to_string()],
            popup: None,
            log_scroll: 0,
        }
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn toggle_help(&mut self) {
        self.current_tab = if self.current_tab == Tab::Help {
            Tab::Simulate
        } else {
            Tab::Help
        };
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    fn field_count(&self) -> usize {
        StatKind::all().len() + self.slot_choices.len()
    }

    pub fn focused_field(&self) -> Field {
        let stats = StatKind::all();
        if self.selected_field < stats.len() {
            Field::Stat(stats[self.selected_field])
        } else {
            Field::Slot(self.selected_field - stats.len())
        }
    }

    /// Whether keystrokes go into a stat text box
    pub fn is_editing(&self) -> bool {
        self.popup.is_none()
            && self.current_tab == Tab::Simulate
            && matches!(self.focused_field(), Field::Stat(_))
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Simulate => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            Tab::Log => {
                if self.log_scroll > 0 {
                    self.log_scroll -= 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Simulate => {
                if self.selected_field < self.field_count().saturating_sub(1) {
                    self.selected_field += 1;
                }
            }
            Tab::Log => {
                if self.log_scroll < self.messages.len().saturating_sub(1) {
                    self.log_scroll += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        if self.current_tab != Tab::Simulate {
            return;
        }
        match self.focused_field() {
            Field::Stat(kind) => self.step_stat(kind, false),
            Field::Slot(index) => self.cycle_slot(index, false),
        }
    }

    pub fn on_right(&mut self) {
        if self.current_tab != Tab::Simulate {
            return;
        }
        match self.focused_field() {
            Field::Stat(kind) => self.step_stat(kind, true),
            Field::Slot(index) => self.cycle_slot(index, true),
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Simulate | Tab::Breakdown => self.simulate(),
            Tab::BestSet => self.search_best_set(),
            _ => {}
        }
    }

    // === Editing ===

    /// Type a character into the focused stat box
    pub fn on_char(&mut self, c: char) {
        if !is_stat_char(c) {
            return;
        }
        if let Field::Stat(kind) = self.focused_field() {
            let text = self.stat_text.get_mut(kind);
            if text.len() < MAX_STAT_TEXT {
                text.push(c);
            }
        }
    }

    pub fn on_backspace(&mut self) {
        if let Field::Stat(kind) = self.focused_field() {
            self.stat_text.get_mut(kind).pop();
        }
    }

    fn step_stat(&mut self, kind: StatKind, up: bool) {
        let text = self.stat_text.get_mut(kind);
        let current = text.trim().parse::<u32>().unwrap_or(0);
        let next = if up {
            current.saturating_add(STAT_STEP)
        } else {
            current.saturating_sub(STAT_STEP)
        };
        *text = next.to_string();
    }

    fn cycle_slot(&mut self, index: usize, forward: bool) {
        let Some(choice) = self.slot_choices.get_mut(index) else {
            return;
        };
        let len = choice.options.len();
        if len == 0 {
            return;
        }
        choice.selected = Some(match (choice.selected, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    /// Clear the selection of the focused slot
    pub fn clear_selection(&mut self) {
        if let Field::Slot(index) = self.focused_field() {
            if let Some(choice) = self.slot_choices.get_mut(index) {
                choice.selected = None;
            }
        }
    }

    /// The current slot choices as a selection
    pub fn selection(&self) -> GearSelection {
        let mut selection = GearSelection::new();
        for choice in &self.slot_choices {
            if let Some(name) = choice.selected_name() {
                selection.select(choice.slot.clone(), name);
            }
        }
        selection
    }

    // === Actions ===

    /// Run one simulation with the current inputs
    pub fn simulate(&mut self) {
        let Some(estimator) = self.estimator() else {
            return;
        };
        let request = SimulationRequest::new(self.stat_text.clone(), self.selection());
        let simulator = Simulator::new(&self.pool, estimator, self.config.required_slots.clone());

        match simulator.simulate(&request) {
            Ok(report) => {
                self.result_text = report.summary();
                self.messages.push(format!(
                    "Simulation complete. DPS: {:.2} | Gear: {}",
                    report.dps,
                    report.gear_summary()
                ));
                self.last_breakdown = match self.config.model.kind {
                    ModelKind::CasterFormula => self
                        .config
                        .range
                        .apply(&report.combined)
                        .ok()
                        .map(|stats| CasterFormula::new(self.config.formula.clone()).breakdown(&stats)),
                    ModelKind::WeightedScore => None,
                };
                self.last_report = Some(report);
            }
            Err(err) => {
                self.messages.push(format!("Simulate ERROR: {}", err));
                self.popup = Some(err.user_message());
            }
        }
    }

    /// Search every combination of the required slots, keeping the pieces
    /// selected in other slots
    pub fn search_best_set(&mut self) {
        let Some(estimator) = self.estimator() else {
            return;
        };
        let request = SimulationRequest::new(self.stat_text.clone(), self.selection());
        let simulator = Simulator::new(&self.pool, estimator, self.config.required_slots.clone())
            .with_search_limit(self.config.max_combinations);

        match simulator.best_set(&request) {
            Ok(Some(best)) => {
                self.messages.push(format!(
                    "Best set: {:.2} DPS after {} combinations",
                    best.dps, best.evaluated
                ));
                self.best_set = Some(best);
            }
            Ok(None) => {
                self.messages.push("Best set: no slots to search".to_string());
                self.best_set = None;
            }
            Err(err) => {
                self.messages.push(format!("Best set ERROR: {}", err));
                self.popup = Some(err.user_message());
            }
        }
    }

    fn estimator(&mut self) -> Option<DpsEstimator> {
        match DpsEstimator::from_config(&self.config) {
            Ok(estimator) => Some(estimator),
            Err(err) => {
                tracing::error!("Model ERROR: {}", err);
                self.messages.push(format!("Model ERROR: {}", err));
                self.popup = Some("Scoring model settings are invalid.".to_string());
                None
            }
        }
    }

    /// Name of the configured scoring model
    pub fn model_label(&self) -> String {
        match self.config.model.kind {
            ModelKind::CasterFormula => "Caster formula".to_string(),
            ModelKind::WeightedScore if self.config.model.weights.is_some() => "Weighted (custom)".to_string(),
            ModelKind::WeightedScore => format!("Weighted ({})", self.config.model.priority.name()),
        }
    }

    /// Copy the best set into the slot choices
    pub fn apply_best_set(&mut self) {
        let Some(best) = &self.best_set else {
            return;
        };
        for (slot, name) in best.selection.iter() {
            if let Some(choice) = self.slot_choices.iter_mut().find(|c| c.slot == slot) {
                let index = match choice.options.iter().position(|o| o == name) {
                    Some(index) => index,
                    None => {
                        choice.options.push(name.to_string());
                        choice.options.len() - 1
                    }
                };
                choice.selected = Some(index);
            }
        }
        self.messages.push("Best set applied to selection.".to_string());
        self.current_tab = Tab::Simulate;
    }

    /// Re-read the gear file, keeping choices that still exist
    pub fn reload_gear(&mut self) {
        let (pool, err) = GearPool::load_or_empty(&self.config.gear_path);
        let previous = self.selection();
        self.pool = pool;
        self.slot_choices = build_slot_choices(&self.config, &self.pool);
        for choice in &mut self.slot_choices {
            if let Some(name) = previous.get(&choice.slot) {
                if let Some(index) = choice.options.iter().position(|o| o == name) {
                    choice.selected = Some(index);
                }
            }
        }
        self.selected_field = self.selected_field.min(self.field_count().saturating_sub(1));
        self.best_set = None;

        match err {
            Some(err) => {
                self.messages.push(format!("LoadGear ERROR: {}", err));
                self.popup = Some(err.user_message());
            }
            None => self.messages.push("Gear loaded successfully.".to_string()),
        }
    }

    /// Combinations the best-set search would evaluate
    pub fn search_size(&self) -> u64 {
        combination_count(&self.pool, &self.config.required_slots)
    }
}

/// Characters a stat box accepts
pub fn is_stat_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

/// One choice per pool slot in file order, then any required slot the pool
/// lacks. Each offers the slot's top pieces with the best preselected.
fn build_slot_choices(config: &SimConfig, pool: &GearPool) -> Vec<SlotChoice> {
    let mut slots: Vec<String> = pool.slots().map(|s| s.to_string()).collect();
    for slot in &config.required_slots {
        if !pool.contains_slot(slot) {
            slots.push(slot.clone());
        }
    }

    slots
        .into_iter()
        .map(|slot| {
            let options: Vec<String> = pool
                .best_in_slot(&slot, config.top_n)
                .into_iter()
                .map(|piece| piece.name.clone())
                .collect();
            let selected = if options.is_empty() { None } else { Some(0) };
            let required = config.required_slots.contains(&slot);
            SlotChoice {
                slot,
                options,
                selected,
                required,
            }
        })
        .collect()
}
