//! Roll sources.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::PercentileRoll;

/// A source of uniformly distributed d100 rolls and random picks.
pub trait Roller {
    /// Roll one percentile die.
    fn roll_d100(&mut self) -> PercentileRoll;

    /// Pick an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// RNG-backed roller.
#[derive(Debug, Clone)]
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    /// A roller seeded for reproducible results.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is given, otherwise from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Roller for DiceRoller {
    fn roll_d100(&mut self) -> PercentileRoll {
        PercentileRoll(
            self.rng
                .random_range(PercentileRoll::MIN..=PercentileRoll::MAX),
        )
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed sequence of rolls, cycling when it runs out.
///
/// Used for physical dice entered by hand and as a test double. Picks are
/// derived from the next roll, so a sequence also drives random selection.
#[derive(Debug, Clone)]
pub struct FixedRoller {
    rolls: Vec<PercentileRoll>,
    next: usize,
}

impl FixedRoller {
    /// Start a sequence with one roll.
    pub fn new(first: PercentileRoll) -> Self {
        Self {
            rolls: vec![first],
            next: 0,
        }
    }

    /// Append another roll to the sequence.
    pub fn then(mut self, roll: PercentileRoll) -> Self {
        self.rolls.push(roll);
        self
    }

    fn advance(&mut self) -> PercentileRoll {
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

impl Roller for FixedRoller {
    fn roll_d100(&mut self) -> PercentileRoll {
        self.advance()
    }

    fn pick(&mut self, len: usize) -> usize {
        (self.advance().value() as usize - 1) % len
    }
}
