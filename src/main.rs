//! Canbri TUI - the Canbri "coming soon" page in the terminal
//!
//! A Ratatui-based page with an animated hero and a contact dialog
//! that delivers messages through EmailJS.

mod app;
mod config;
mod mailer;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::SiteConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file in the data dir; the alternate screen leaves no room for stderr
fn log_writer() -> BoxMakeWriter {
    let file = ProjectDirs::from("com", "canbri", "canbri-tui").and_then(|dirs| {
        let dir = dirs.data_dir();
        fs::create_dir_all(dir).ok()?;
        File::create(dir.join("canbri-tui.log")).ok()
    });

    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "canbri_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let config = SiteConfig::load()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read config file, using defaults");
            SiteConfig::default()
        })
        .with_env_overrides();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(&config, Instant::now());
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let size = terminal.size()?;
        app.terminal_size = Some((size.height, size.width));

        let now = Instant::now();
        app.tick(now);

        terminal.draw(|frame| ui::draw(frame, app, now))?;

        // Fast polling (16ms = ~60fps) while something moves, 100ms otherwise
        let poll_duration = if app.is_animating(now) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key, now);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                Event::Resize(width, height) => {
                    // Layout is recomputed on the next tick
                    tracing::debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
