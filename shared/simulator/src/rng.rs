use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type SeededRng = ChaCha8Rng;

pub fn new_rng(seed: u32) -> SeededRng {
    ChaCha8Rng::seed_from_u64(seed as u64)
}
