use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use littlewins_domain::feedback::MessageSelector;

/// Uniform pick backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomMessageSelector;

impl MessageSelector for RandomMessageSelector {
    fn select(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform pick with a reproducible sequence
#[derive(Debug, Clone)]
pub struct SeededMessageSelector {
    rng: StdRng,
}

impl SeededMessageSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MessageSelector for SeededMessageSelector {
    fn select(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}
