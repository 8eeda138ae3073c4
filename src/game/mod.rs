//! The adventure itself: three rooms, a shop and a flat-file save.
//!
//! The [`engine`] walks a small state machine. Rooms draw their next state
//! from an injected [`Dice`], the shop and save prompts loop until they get an
//! answer they understand, and everything the player holds lives in a single
//! [`Inventory`] owned by the engine.

pub mod console;
pub mod dice;
pub mod engine;
pub mod errors;
pub mod save;
pub mod shop;
pub mod text;
pub mod types;

pub use console::Console;
pub use dice::{random_room, Dice, RngDice};
pub use engine::Engine;
pub use errors::{GameError, GameResult};
pub use save::{generate_key_code, load, read_key_code, save, DEFAULT_SAVE_FILE};
pub use shop::{ShopChoice, ShopConfig};
pub use types::{CoinExchange, GameState, Inventory, Item};
