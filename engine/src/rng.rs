use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the battle's random choices (acting character, ability).
pub trait Randomizer {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct SeededRandomizer {
    rng: ChaCha8Rng,
}

impl SeededRandomizer {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Randomizer for SeededRandomizer {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks, cycling when exhausted. Each
/// scripted value is reduced modulo `len`.
pub struct ScriptedRandomizer {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandomizer {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Always picks the first candidate.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl Randomizer for ScriptedRandomizer {
    fn pick(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % len
    }
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}
