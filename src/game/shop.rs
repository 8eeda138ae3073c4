//! Item shop reached from the starting room.
//!
//! Two things are for sale: a coin (paid in coins) and, once the player holds
//! enough coins, the key that wins the game outright. Buying the key does not
//! take any coins.

use serde::{Deserialize, Serialize};

use super::types::{CoinExchange, Inventory, Item};

/// Prices and settlement rule for the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Coins required to buy a coin
    #[serde(default = "default_coin_price")]
    pub coin_price: u32,
    /// Coins required before the winning key is offered
    #[serde(default = "default_key_price")]
    pub key_price: u32,
    #[serde(default)]
    pub exchange: CoinExchange,
}

fn default_coin_price() -> u32 {
    2
}

fn default_key_price() -> u32 {
    5
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            coin_price: default_coin_price(),
            key_price: default_key_price(),
            exchange: CoinExchange::Debit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopChoice {
    BuyCoin,
    BuyKey,
    Leave,
    Invalid,
}

impl ShopChoice {
    /// `choice` is expected already trimmed and lowercased.
    pub fn parse(choice: &str) -> Self {
        match choice {
            "1" => ShopChoice::BuyCoin,
            "k" => ShopChoice::BuyKey,
            "2" => ShopChoice::Leave,
            _ => ShopChoice::Invalid,
        }
    }
}

pub const GREETING: &str = "Welcome to the item shop!";
pub const NO_COINS: &str = "Player has 0 coins.";
pub const COIN_BOUGHT: &str = "You purchased a coin! The shopkeeper nods.";
pub const COIN_TOO_POOR: &str = "Not enough coins to purchase the coin. The shopkeeper frowns.";
pub const KEY_BOUGHT: &str = "You purchased a key and won the game! The universe bends to your will.";
pub const KEY_TOO_POOR: &str =
    "Not enough coins to purchase the key. The shopkeeper shakes his head.";
pub const INVALID: &str = "Invalid choice! The shopkeeper looks confused.";

impl ShopConfig {
    /// Lines printed at the top of every shop round.
    pub fn banner(&self, inventory: &Inventory) -> Vec<String> {
        let coins = inventory.coin_count();
        let mut lines = vec![GREETING.to_string()];
        if coins > 0 {
            lines.push(format!("You have {} coins.", coins));
        } else {
            lines.push(NO_COINS.to_string());
        }
        if self.can_buy_key(inventory) {
            lines.push(format!(
                "You can purchase a key to win the game (K - {} coins).",
                self.key_price
            ));
        }
        lines.push(format!(
            "Choose an item to purchase (1. Coin - {} coins, 2. Back):",
            self.coin_price
        ));
        lines
    }

    pub fn can_buy_key(&self, inventory: &Inventory) -> bool {
        inventory.coin_count() >= self.key_price
    }

    /// Settle a coin purchase. Returns `false`, leaving `inventory` untouched,
    /// when the player cannot afford it.
    pub fn buy_coin(&self, inventory: &mut Inventory) -> bool {
        if inventory.coin_count() < self.coin_price {
            return false;
        }
        match self.exchange {
            CoinExchange::Debit => {
                inventory.remove_coins(self.coin_price);
            }
            CoinExchange::Legacy => {
                inventory.clear_coins();
            }
        }
        inventory.push(Item::Coin);
        true
    }
}
