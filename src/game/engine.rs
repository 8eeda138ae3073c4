//! State machine driver.
//!
//! Each handler prints its text, reads input where the state needs it, and
//! returns the next state. [`Engine::run`] loops until a terminal state has
//! been handled, so long sessions never grow the stack.

use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::console::Console;
use super::dice::{random_room, Dice};
use super::errors::GameResult;
use super::save;
use super::shop::{self, ShopChoice, ShopConfig};
use super::text;
use super::types::{GameState, Inventory, Item};

pub const SAVE_PROMPT: &str = "Do you want to save the game? (yes/no):";
pub const SAVE_INVALID: &str = "Invalid choice! The universe is indifferent.";

pub struct Engine<D, I, O> {
    dice: D,
    console: Console<I, O>,
    inventory: Inventory,
    shop: ShopConfig,
    save_path: PathBuf,
    moves: u64,
}

impl<D: Dice, I: BufRead, O: Write> Engine<D, I, O> {
    pub fn new(
        dice: D,
        console: Console<I, O>,
        inventory: Inventory,
        shop: ShopConfig,
        save_path: PathBuf,
    ) -> Self {
        Engine {
            dice,
            console,
            inventory,
            shop,
            save_path,
            moves: 0,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Number of transitions taken so far.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn into_output(self) -> O {
        self.console.into_output()
    }

    /// Play from `start` until Win, GameOver or Quit. Returns the terminal state.
    pub fn run(&mut self, start: GameState) -> GameResult<GameState> {
        let mut state = start;
        loop {
            let next = self.step(state)?;
            if state.is_terminal() {
                info!(
                    "engine: session ended in {} after {} moves ({} coins, key: {})",
                    state,
                    self.moves,
                    self.inventory.coin_count(),
                    self.inventory.has_key()
                );
                return Ok(state);
            }
            debug!("engine: {} -> {}", state, next);
            self.moves += 1;
            state = next;
        }
    }

    /// Handle a single state and return the one that follows it.
    /// Terminal states print their message and return themselves.
    pub fn step(&mut self, state: GameState) -> GameResult<GameState> {
        match state {
            GameState::Start => self.start(),
            GameState::Room1 => self.room1(),
            GameState::Room2 => self.room2(),
            GameState::Room3 => self.room3(),
            GameState::Purchase => self.purchase(),
            GameState::Save => self.save_prompt(),
            GameState::Win => {
                self.console.say(text::WIN)?;
                Ok(GameState::Win)
            }
            GameState::GameOver => {
                self.console.say(text::GAME_OVER)?;
                Ok(GameState::GameOver)
            }
            GameState::Quit => {
                self.console.say(text::FAREWELL)?;
                Ok(GameState::Quit)
            }
        }
    }

    fn next_room(&mut self) -> GameState {
        random_room(&mut self.dice)
    }

    fn start(&mut self) -> GameResult<GameState> {
        self.console.say(text::WELCOME)?;
        self.console.say(text::DARK_ROOM)?;
        self.console
            .say(&format!("You have {} coins.", self.inventory.coin_count()))?;
        self.console.say(text::DOOR_PROMPT)?;
        let Some(choice) = self.console.read_choice()? else {
            return Ok(GameState::Quit);
        };
        match choice.as_str() {
            "1" | "2" | "3" => Ok(self.next_room()),
            "shop" => Ok(GameState::Purchase),
            "save" => Ok(GameState::Save),
            _ => {
                self.console.say(text::STUMBLE)?;
                Ok(GameState::GameOver)
            }
        }
    }

    fn room1(&mut self) -> GameResult<GameState> {
        let line = text::room1_line(&mut self.dice);
        self.console.say(line)?;
        if self.inventory.has_key() {
            self.console.say(text::KEY_UNLOCKS)?;
            return Ok(GameState::Win);
        }
        self.console.say(text::SEARCHING)?;
        Ok(self.next_room())
    }

    fn room2(&mut self) -> GameResult<GameState> {
        self.console.say(text::ROOM2_INTRO)?;
        self.console.prompt(text::ROOM2_PROMPT)?;
        let Some(choice) = self.console.read_choice()? else {
            return Ok(GameState::Quit);
        };
        match choice.as_str() {
            "pick up" => {
                self.console.say(text::ROOM2_PICKED)?;
                self.inventory.push(Item::Key);
                self.inventory.push(Item::Coin);
                debug!(
                    "engine: picked up key and coin ({} items held)",
                    self.inventory.len()
                );
                Ok(self.next_room())
            }
            "leave" => {
                self.console.say(text::ROOM2_LEFT)?;
                Ok(self.next_room())
            }
            _ => {
                self.console.say(text::ROOM2_INVALID)?;
                Ok(GameState::GameOver)
            }
        }
    }

    fn room3(&mut self) -> GameResult<GameState> {
        let line = text::room3_line(&mut self.dice);
        self.console.say(line)?;
        Ok(self.next_room())
    }

    fn purchase(&mut self) -> GameResult<GameState> {
        loop {
            for line in self.shop.banner(&self.inventory) {
                self.console.say(&line)?;
            }
            let Some(choice) = self.console.read_choice()? else {
                return Ok(GameState::Quit);
            };
            match ShopChoice::parse(&choice) {
                ShopChoice::BuyCoin => {
                    if self.shop.buy_coin(&mut self.inventory) {
                        self.console.say(shop::COIN_BOUGHT)?;
                        debug!(
                            "shop: coin bought ({:?}), {} coins left",
                            self.shop.exchange,
                            self.inventory.coin_count()
                        );
                    } else {
                        self.console.say(shop::COIN_TOO_POOR)?;
                    }
                }
                ShopChoice::BuyKey => {
                    if self.shop.can_buy_key(&self.inventory) {
                        self.console.say(shop::KEY_BOUGHT)?;
                        return Ok(GameState::Win);
                    }
                    self.console.say(shop::KEY_TOO_POOR)?;
                }
                ShopChoice::Leave => return Ok(self.next_room()),
                ShopChoice::Invalid => self.console.say(shop::INVALID)?,
            }
        }
    }

    fn save_prompt(&mut self) -> GameResult<GameState> {
        loop {
            self.console.say(SAVE_PROMPT)?;
            let Some(choice) = self.console.read_choice()? else {
                return Ok(GameState::Quit);
            };
            match choice.as_str() {
                "yes" => {
                    let code = save::generate_key_code(&mut self.dice);
                    match save::save(&self.save_path, &self.inventory, &code) {
                        Ok(()) => {
                            self.console.say(&format!(
                                "Game saved with key code: {}. The universe remembers.",
                                code
                            ))?;
                            return Ok(GameState::Start);
                        }
                        Err(e) => {
                            warn!("engine: {}", e);
                            self.console
                                .say(&format!("Failed to save the game: {}", e))?;
                        }
                    }
                }
                "no" => return Ok(GameState::Quit),
                _ => self.console.say(SAVE_INVALID)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    /// Replays fixed rolls, then repeats the last one.
    struct Scripted {
        rolls: VecDeque<usize>,
        last: usize,
    }

    impl Scripted {
        fn new(rolls: &[usize]) -> Self {
            Scripted {
                rolls: rolls.iter().copied().collect(),
                last: 0,
            }
        }
    }

    impl Dice for Scripted {
        fn roll(&mut self, faces: usize) -> usize {
            if let Some(r) = self.rolls.pop_front() {
                self.last = r;
            }
            self.last % faces
        }
    }

    fn engine(
        input: impl AsRef<[u8]>,
        rolls: &[usize],
        inventory: Inventory,
    ) -> Engine<Scripted, Cursor<Vec<u8>>, Vec<u8>> {
        Engine::new(
            Scripted::new(rolls),
            Console::new(Cursor::new(input.as_ref().to_vec()), Vec::new()),
            inventory,
            ShopConfig::default(),
            PathBuf::from("unused_save.txt"),
        )
    }

    fn output(e: Engine<Scripted, Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(e.into_output()).unwrap()
    }

    #[test]
    fn bad_door_is_game_over() {
        let mut e = engine("4\n", &[], Inventory::new());
        assert_eq!(e.run(GameState::Start).unwrap(), GameState::GameOver);
        let out = output(e);
        assert!(out.contains(text::STUMBLE));
        assert!(out.contains(text::GAME_OVER));
    }

    #[test]
    fn room1_with_key_wins_without_input() {
        // First roll picks the flavor line.
        let mut e = engine("", &[0], Inventory::from_items(vec![Item::Key]));
        assert_eq!(e.run(GameState::Room1).unwrap(), GameState::Win);
        assert!(output(e).contains(text::KEY_UNLOCKS));
    }

    #[test]
    fn room1_without_key_searches_and_moves_on() {
        // Flavor roll 0, then roll 2 draws Room3.
        let mut e = engine("", &[0, 2], Inventory::new());
        assert_eq!(e.step(GameState::Room1).unwrap(), GameState::Room3);
        assert!(e.inventory().is_empty());
        let out = output(e);
        assert!(out.contains(text::SEARCHING));
        assert!(!out.contains(text::KEY_UNLOCKS));
    }

    #[test]
    fn pick_up_then_room1_wins() {
        // Door 1 -> roll 1 (Room2); pick up -> roll 0 (Room1); flavor roll 0.
        let mut e = engine("1\npick up\n", &[1, 0, 0], Inventory::new());
        assert_eq!(e.run(GameState::Start).unwrap(), GameState::Win);
        assert_eq!(e.inventory().items(), &[Item::Key, Item::Coin]);
    }

    #[test]
    fn room2_leave_keeps_inventory() {
        // leave -> Room2 again (roll 1); then input runs out.
        let mut e = engine("leave\n", &[1], Inventory::new());
        assert_eq!(e.run(GameState::Room2).unwrap(), GameState::Quit);
        assert!(e.inventory().is_empty());
        assert!(output(e).contains(text::ROOM2_LEFT));
    }

    #[test]
    fn room2_nonsense_is_game_over() {
        let mut e = engine("dance\n", &[], Inventory::new());
        assert_eq!(e.run(GameState::Room2).unwrap(), GameState::GameOver);
        assert!(output(e).contains(text::ROOM2_INVALID));
    }

    #[test]
    fn room3_never_ends_the_game() {
        let mut e = engine("", &[0, 2], Inventory::new());
        assert_eq!(e.step(GameState::Room3).unwrap(), GameState::Room3);
    }

    #[test]
    fn shop_invalid_then_key_purchase() {
        let inv = Inventory::from_items(vec![Item::Coin; 5]);
        let mut e = engine("x\nk\n", &[], inv);
        assert_eq!(e.run(GameState::Purchase).unwrap(), GameState::Win);
        assert_eq!(e.inventory().coin_count(), 5);
        let out = output(e);
        assert!(out.contains(shop::INVALID));
        assert!(out.contains(shop::KEY_BOUGHT));
    }

    #[test]
    fn garbled_bytes_at_the_door_are_game_over() {
        let mut e = engine(b"\xc3\n", &[], Inventory::new());
        assert_eq!(e.run(GameState::Start).unwrap(), GameState::GameOver);
        assert!(output(e).contains(text::STUMBLE));
    }

    #[test]
    fn garbled_bytes_in_shop_reprompt() {
        let mut e = engine(b"\xff\n2\n", &[0], Inventory::new());
        assert_eq!(e.step(GameState::Purchase).unwrap(), GameState::Room1);
        let out = output(e);
        assert!(out.contains(shop::INVALID));
        assert_eq!(out.matches(shop::GREETING).count(), 2);
    }

    #[test]
    fn shop_without_coins_refuses() {
        let mut e = engine("1\nK\n", &[], Inventory::new());
        assert_eq!(e.run(GameState::Purchase).unwrap(), GameState::Quit);
        assert!(e.inventory().is_empty());
        let out = output(e);
        assert!(out.contains(shop::COIN_TOO_POOR));
        assert!(out.contains(shop::KEY_TOO_POOR));
    }

    #[test]
    fn shop_back_goes_to_a_room() {
        let mut e = engine("2\n", &[2], Inventory::new());
        assert_eq!(e.step(GameState::Purchase).unwrap(), GameState::Room3);
    }

    #[test]
    fn save_no_quits() {
        let mut e = engine("maybe\nno\n", &[], Inventory::new());
        assert_eq!(e.run(GameState::Save).unwrap(), GameState::Quit);
        let out = output(e);
        assert!(out.contains(SAVE_INVALID));
        assert!(out.contains(text::FAREWELL));
    }

    #[test]
    fn end_of_input_quits() {
        let mut e = engine("", &[], Inventory::new());
        assert_eq!(e.run(GameState::Start).unwrap(), GameState::Quit);
        assert_eq!(e.moves(), 1);
    }
}
