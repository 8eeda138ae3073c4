//! Fixed narrative lines. Rooms 1 and 3 pick one of three descriptions per visit.

use super::dice::{choose, Dice};

pub const ROOM1_LINES: [&str; 3] = [
    "You enter Room 1. It's dark and musty. A mysterious sound echoes. You need to find a key to unlock the door.",
    "You step into Room 1. The air is heavy, and you can feel a presence. Find the key to proceed.",
    "Room 1 welcomes you with darkness. Your only way out is to uncover the key hidden within.",
];

pub const ROOM3_LINES: [&str; 3] = [
    "You enter Room 3. A giant spider blocks your way! You can't proceed this way. Go back to another room.",
    "A massive spider guards Room 3. Retreat to another room to escape its web.",
    "Room 3 presents a challenge - a giant spider. Your only option is to turn back and explore another path.",
];

pub const WELCOME: &str = "Welcome to the Text Adventure Game!";
pub const DARK_ROOM: &str = "You find yourself in a dark room. There are three doors in front of you.";
pub const DOOR_PROMPT: &str =
    "Choose a door to enter (1, 2, 3), or type 'shop' to visit the shop or 'save' to save:";
pub const STUMBLE: &str = "Invalid choice! You stumble in the darkness.";

pub const KEY_UNLOCKS: &str = "You use the key to unlock the door. The door creaks open.";
pub const SEARCHING: &str = "You search the room, trying to find the key.";

pub const ROOM2_INTRO: &str =
    "Room 2 reveals itself to you. A mysterious table is adorned with a key and a coin.";
pub const ROOM2_PROMPT: &str = "What will you do? (Type 'pick up' or 'leave'): ";
pub const ROOM2_PICKED: &str = "You picked up the key and the coin. The room shivers.";
pub const ROOM2_LEFT: &str =
    "You decide to leave the key and the coin on the table. The room remains still.";
pub const ROOM2_INVALID: &str = "Invalid choice! The room reacts strangely.";

pub const WIN: &str = "Congratulations! You unlocked the door and won the game.";
pub const GAME_OVER: &str = "Game Over! You made a wrong choice. The darkness consumes you.";
pub const FAREWELL: &str = "Thanks for playing! The adventure ends here.";

pub fn room1_line(dice: &mut dyn Dice) -> &'static str {
    *choose(dice, &ROOM1_LINES)
}

pub fn room3_line(dice: &mut dyn Dice) -> &'static str {
    *choose(dice, &ROOM3_LINES)
}
