use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::AppConfig;
use connect_four::console::ConsoleGame;
use connect_four::game::Game;
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four against another person at the same keyboard.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Override the number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Play with line prompts on stdin/stdout instead of the terminal UI
    #[arg(long)]
    console: bool,

    /// Log level or filter spec (defaults to RUST_LOG, then "warn")
    #[arg(long)]
    log_level: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let _logger = start_logger(&cli)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    config.validate().context("invalid settings")?;

    let game = Game::new(config.new_board()?);
    log::info!(
        "starting {}x{} game",
        game.board().width(),
        game.board().height()
    );

    if cli.console {
        let stdin = io::stdin();
        let mut console = ConsoleGame::new(game, config.display, stdin.lock(), io::stdout().lock());
        console.run().context("console game aborted")?;
        Ok(())
    } else {
        run_tui(game).context("terminal UI failed")
    }
}

/// Console sessions log to stderr; the terminal UI owns the screen, so its
/// log goes to a file in the temp directory.
fn start_logger(cli: &Cli) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(cli.log_level.as_deref().unwrap_or("warn"))?;
    let logger = if cli.console {
        logger.log_to_stderr()
    } else {
        logger.log_to_file(
            FileSpec::default()
                .directory(std::env::temp_dir())
                .basename("connect-four")
                .suppress_timestamp(),
        )
    };
    Ok(logger.start()?)
}

fn run_tui(game: Game) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
