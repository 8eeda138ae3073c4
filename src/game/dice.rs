//! Randomness for room draws, flavor text and key codes.
//!
//! The engine never reaches for a global generator; a single [`Dice`] is
//! created at startup and handed in, so tests can script every roll.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::GameState;

pub trait Dice {
    /// Uniform roll in `0..faces`. `faces` is never zero.
    fn roll(&mut self, faces: usize) -> usize;
}

/// [`Dice`] backed by any `rand` generator.
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        RngDice { rng }
    }
}

impl RngDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self, faces: usize) -> usize {
        self.rng.gen_range(0..faces)
    }
}

pub fn choose<'a, T>(dice: &mut dyn Dice, opts: &'a [T]) -> &'a T {
    &opts[dice.roll(opts.len())]
}

/// One of Room1, Room2, Room3 with equal odds.
pub fn random_room(dice: &mut dyn Dice) -> GameState {
    *choose(dice, &GameState::ROOMS)
}
