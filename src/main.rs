mod app;
mod config;
mod error;
mod logging;
mod model;
mod snapshot;
mod state;
mod storage;
mod ui;
mod writer;

use app::{App, InputMode};
use clap::Parser;
use config::{Config, Overrides};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use model::Category;
use state::StateManager;
use std::path::PathBuf;
use std::sync::Arc;
use storage::{FileStore, KeyValueStore};
use tracing::info;

/// Terminal to-do list with Cheering and Travel categories
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory where to dos are saved
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        data_dir: cli.data_dir,
        log_level: cli.log_level,
    };
    let config = match Config::load(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.log_path(), &config.log_level)?;
    info!(data_dir = %config.data_dir.display(), key = %config.storage_key, "starting");

    let store = Arc::new(FileStore::new(&config.data_dir));
    let mut app = App::new(StateManager::new(store, config.storage_key.clone()));
    app.init().await;

    // Init terminal
    let mut terminal = ratatui::init();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    ratatui::restore();

    // Queued snapshot writes must land before the process exits
    app.shutdown().await;
    info!("stopped");

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<S: KeyValueStore>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut changes = app.state.subscribe();
    let mut dirty = true;

    loop {
        if dirty || changes.has_changed().unwrap_or(false) {
            changes.borrow_and_update();
            terminal.draw(|frame| ui::render(app, frame))?;
            dirty = false;
        }

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    dispatch_key(app, key).await;
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
}

/// Apply one key press, then give queued snapshot writes a turn before
/// the next blocking poll.
async fn dispatch_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    handle_key(app, key);
    tokio::task::yield_now().await;
}

fn handle_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // The delete dialog is modal
    if let Some(dialog) = app.confirm.as_mut() {
        if let Some(result) = dialog.handle_key(key) {
            app.resolve_confirm(result);
        }
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Editing => handle_input_key(app, key),
        InputMode::Normal => handle_list_key(app, key),
    }
}

fn handle_input_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.submit_text();
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_list_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('c') => {
            app.select_mode(Category::Cheering);
        }
        KeyCode::Char('t') => {
            app.select_mode(Category::Travel);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_mode();
        }
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.request_delete();
        }
        _ => {}
    }
}
