//! # Dark Rooms - a tiny text adventure
//!
//! You wake in a dark room with three doors. Somewhere there is a key on a
//! table; carry it back to the first room and the door opens. A shop trades
//! coins, and sells the key outright to anyone rich enough. Progress is kept
//! in a plain text file next to the binary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::io;
//! use darkrooms::config::Config;
//! use darkrooms::game::{load, Console, Engine, GameState, RngDice};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("config.toml")?;
//!     let inventory = load(&config.game.save_path())?;
//!     let console = Console::new(io::stdin().lock(), io::stdout());
//!     let mut engine = Engine::new(
//!         RngDice::from_entropy(),
//!         console,
//!         inventory,
//!         config.shop.clone(),
//!         config.game.save_path(),
//!     );
//!     engine.run(GameState::Start)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - state machine, inventory, shop and save file
//! - [`config`] - TOML configuration with defaults

pub mod config;
pub mod game;
