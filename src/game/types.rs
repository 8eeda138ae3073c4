use serde::{Deserialize, Serialize};
use std::fmt;

/// Every state the driver can be in. `Win`, `GameOver` and `Quit` end play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Start,
    Room1,
    Room2,
    Room3,
    Win,
    GameOver,
    Purchase,
    Save,
    Quit,
}

impl GameState {
    /// The rooms a random draw may land on.
    pub const ROOMS: [GameState; 3] = [GameState::Room1, GameState::Room2, GameState::Room3];

    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Win | GameState::GameOver | GameState::Quit)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Start => "start",
            GameState::Room1 => "room1",
            GameState::Room2 => "room2",
            GameState::Room3 => "room3",
            GameState::Win => "win",
            GameState::GameOver => "game_over",
            GameState::Purchase => "purchase",
            GameState::Save => "save",
            GameState::Quit => "quit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Key,
    Coin,
}

impl Item {
    /// Name used in the save file, one item per line.
    pub fn as_str(self) -> &'static str {
        match self {
            Item::Key => "Key",
            Item::Coin => "Coin",
        }
    }

    /// Inverse of [`Item::as_str`]; anything else is not an item.
    pub fn parse(line: &str) -> Option<Item> {
        match line {
            "Key" => Some(Item::Key),
            "Coin" => Some(Item::Coin),
            _ => None,
        }
    }
}

/// How the shop's "buy a coin" option settles the player's coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoinExchange {
    /// Take exactly the coin price, hand back one coin.
    #[default]
    Debit,
    /// Take every coin the player holds, hand back one coin.
    Legacy,
}

/// The player's held items, in pickup order. Duplicates are expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Inventory { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn has_key(&self) -> bool {
        self.items.contains(&Item::Key)
    }

    pub fn coin_count(&self) -> u32 {
        let coins = self.items.iter().filter(|&&i| i == Item::Coin).count();
        u32::try_from(coins).unwrap_or(u32::MAX)
    }

    /// Remove up to `n` coins, latest pickups first. Returns how many were removed.
    pub fn remove_coins(&mut self, n: u32) -> u32 {
        let mut removed = 0;
        while removed < n {
            match self.items.iter().rposition(|&i| i == Item::Coin) {
                Some(idx) => {
                    self.items.remove(idx);
                    removed += 1;
                }
                None => break,
            }
        }
        removed
    }

    /// Drop every coin, keeping all other items in order.
    pub fn clear_coins(&mut self) -> u32 {
        let before = self.items.len();
        self.items.retain(|&i| i != Item::Coin);
        u32::try_from(before - self.items.len()).unwrap_or(u32::MAX)
    }
}
