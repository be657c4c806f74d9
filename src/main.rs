use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use deadly_dungeon::{
    GameConfig, GameLoop, Session,
    input::ConsoleInput,
    renderer::{GameClock, RatatuiRenderer},
};
use hero::Class;
use save::Challenge;
use save::challenge::ANONYMOUS_SENDER;
use scopeguard::defer;

/// Deadly Dungeon - open doors, memorize the sequence, counter every move
#[derive(Parser, Debug)]
#[command(name = "deadly-dungeon")]
#[command(version, about, long_about = None)]
struct Args {
    /// Hero name
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Hero class: warrior, rogue or mage
    #[arg(short = 'c', long, value_parser = parse_class)]
    class: Option<Class>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the high score file
    #[arg(long)]
    save_dir: Option<String>,

    /// Challenge code received from a friend
    #[arg(long)]
    challenge: Option<String>,

    /// Name of the friend who sent the challenge
    #[arg(long)]
    from: Option<String>,
}

fn parse_class(raw: &str) -> Result<Class, String> {
    Class::from_id(raw).ok_or_else(|| format!("unknown class '{}'", raw))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::new(),
    };
    if let Some(name) = args.name {
        config.player_name = name;
    }
    if let Some(class) = args.class {
        config.class = class;
    }
    if let Some(dir) = args.save_dir {
        config.save_directory = dir;
    }
    config.seed = args.seed.or(config.seed);

    let challenge = args
        .challenge
        .map(|code| Challenge::new(code, args.from.unwrap_or_else(|| ANONYMOUS_SENDER.to_string())));

    let session = Session::new(config, challenge);
    let renderer = RatatuiRenderer::new().context("Failed to create terminal")?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    defer! {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let mut game_loop = GameLoop::new(session, renderer, ConsoleInput::new(), GameClock::new(50));
    game_loop.run().context("Game crashed")?;

    Ok(())
}
