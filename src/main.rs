//! Binary entrypoint for the Dark Rooms CLI.
//!
//! Commands:
//! - `play` (default) - load the save file and start at the three doors
//! - `init [--force]` - write a starter `config.toml` and an empty save file
//!
//! See the library crate docs for module-level details: `darkrooms::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::io;
use std::path::Path;

use darkrooms::config::Config;
use darkrooms::game::{self, Console, Engine, GameState, RngDice};

#[derive(Parser)]
#[command(name = "darkrooms")]
#[command(about = "A tiny text adventure: three doors, one key")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play from the saved inventory
    Play,
    /// Write a default configuration and an empty save file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            init_logging(&None, cli.verbose);
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };
    init_logging(&Some(config.clone()), cli.verbose);

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&config),
        Commands::Init { force } => init(&cli.config, &config, force),
    }
}

fn play(config: &Config) -> Result<()> {
    let save_path = config.game.save_path();
    let inventory = match game::load(&save_path) {
        Ok(inv) => inv,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error loading game: {}", e);
            eprintln!("Run `darkrooms init` to start a new game.");
            std::process::exit(1);
        }
    };
    if let Some(code) = game::read_key_code(&save_path) {
        info!("Resuming save {} with {} items", code, inventory.len());
    }

    let dice = match config.game.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            RngDice::seeded(seed)
        }
        None => RngDice::from_entropy(),
    };
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut engine = Engine::new(dice, console, inventory, config.shop.clone(), save_path);
    engine.run(GameState::Start)?;
    Ok(())
}

fn init(config_path: &str, config: &Config, force: bool) -> Result<()> {
    if Path::new(config_path).exists() && !force {
        println!(
            "Configuration file {} already exists (use --force to overwrite).",
            config_path
        );
    } else {
        Config::create_default(config_path)?;
        println!("Configuration file created at {}", config_path);
    }

    let save_path = config.game.save_path();
    let mut dice = RngDice::from_entropy();
    if game::save::create_fresh(&save_path, &mut dice)? {
        println!("New save file created at {}", save_path.display());
    } else {
        println!(
            "Save file {} already exists; leaving it alone.",
            save_path.display()
        );
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Warn,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.parse_default_env();

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        // Keep log lines out of the game text entirely
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        builder.format(move |_fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{} [{}] {}", ts, record.level(), record.args());
            }
            Ok(())
        });
    } else if atty::is(atty::Stream::Stderr) {
        // Interleaved with play on the same terminal: keep it short
        builder.format(|fmt, record| writeln!(fmt, "[{}] {}", record.level(), record.args()));
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
