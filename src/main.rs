use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kwazam_chess::config::{validate_player_name, AppConfig};
use kwazam_chess::save::{load_game, SaveManager};
use kwazam_chess::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Kwazam Chess in the terminal.
#[derive(Parser)]
#[command(name = "kwazam", about = "Two-player Kwazam Chess in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "kwazam.toml")]
    config: PathBuf,

    /// Resume a game saved to this file
    #[arg(long, conflicts_with = "slot")]
    load: Option<PathBuf>,

    /// Resume a game from a named save slot
    #[arg(long)]
    slot: Option<String>,

    /// List the save slots and exit
    #[arg(long)]
    list_saves: bool,

    /// Name of player 1 (blue side, moves first)
    #[arg(long)]
    player1: Option<String>,

    /// Name of player 2 (red side)
    #[arg(long)]
    player2: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(name) = cli.player1 {
        config.players.player1 = name;
    }
    if let Some(name) = cli.player2 {
        config.players.player2 = name;
    }
    validate_player_name("--player1", &config.players.player1)?;
    validate_player_name("--player2", &config.players.player2)?;

    if cli.list_saves {
        return list_saves(&SaveManager::new(config.saves.clone()));
    }

    init_logging(config.logging.file.as_deref())?;

    let mut app = if let Some(path) = &cli.load {
        let state = load_game(path)
            .with_context(|| format!("loading saved game {}", path.display()))?;
        App::with_game(config, state)
    } else if let Some(slot) = &cli.slot {
        let state = SaveManager::new(config.saves.clone())
            .load_slot(slot)
            .with_context(|| format!("loading save slot '{}'", slot))?;
        App::with_game(config, state)
    } else {
        App::new(config)
    };

    run_tui(&mut app).context("terminal UI failed")
}

fn list_saves(saves: &SaveManager) -> Result<()> {
    let slots = saves
        .list_slots()
        .with_context(|| format!("listing saves in {}", saves.config().save_dir.display()))?;
    if slots.is_empty() {
        println!("No saved games in {}", saves.config().save_dir.display());
        return Ok(());
    }
    for slot in slots {
        let status = if slot.game_ended {
            "finished".to_string()
        } else {
            format!("{} to move", slot.current_player)
        };
        println!("{:<16} {:>3} moves  {}", slot.name, slot.move_count, status);
    }
    Ok(())
}

/// Log to the configured file; the terminal belongs to the UI.
fn init_logging(file: Option<&Path>) -> Result<()> {
    let Some(path) = file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore the terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
