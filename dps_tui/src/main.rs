//! dps_tui - Interactive TUI for estimating build DPS from gear and base stats

mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dps_core::config::{SimConfig, DEFAULT_CONFIG_PATH};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let (config, config_error) = SimConfig::load_or_default(&config_path);

    let _guard = setup_logging(&config.log_path)?;
    tracing::info!("Application started.");
    if let Some(err) = &config_error {
        tracing::error!("Config ERROR: {} ({})", err, config_path.display());
    }

    let mut app = App::new(config, config_error);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    tracing::info!("Application closed.");
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            return Ok(());
        }

        // Any key closes the message box
        if app.popup.is_some() {
            app.dismiss_popup();
            continue;
        }

        if app.is_editing() {
            match key.code {
                KeyCode::Char(c) if app::is_stat_char(c) => {
                    app.on_char(c);
                    continue;
                }
                KeyCode::Backspace => {
                    app.on_backspace();
                    continue;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.prev_tab(),
            KeyCode::Char(c @ '1'..='5') => app.set_tab(c as usize - '1' as usize),
            KeyCode::Up | KeyCode::Char('k') => app.on_up(),
            KeyCode::Down | KeyCode::Char('j') => app.on_down(),
            KeyCode::Left | KeyCode::Char('h') => app.on_left(),
            KeyCode::Right | KeyCode::Char('l') => app.on_right(),
            KeyCode::Enter => app.on_enter(),
            KeyCode::Char('s') => app.simulate(),
            KeyCode::Char('b') => app.search_best_set(),
            KeyCode::Char('a') => app.apply_best_set(),
            KeyCode::Char('x') | KeyCode::Delete => app.clear_selection(),
            KeyCode::Char('r') => app.reload_gear(),
            KeyCode::Char('?') => app.toggle_help(),
            _ => {}
        }
    }
}

/// Send tracing output to the runtime log file only; stdout belongs to the TUI
fn setup_logging(log_path: &Path) -> Result<WorkerGuard> {
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let file_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "runtime_log.txt".into());

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry().with(env_filter).with(file_layer).init();

    Ok(guard)
}
