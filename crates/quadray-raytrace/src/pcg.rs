//! Permuted congruential generator (PCG-XSH-RR, 64-bit state, 32-bit output).

/// Deterministic pseudo-random number generator.
///
/// Bit-exact with the reference PCG32 implementation, so a given
/// `(init_state, init_seq)` pair always reproduces the same render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg {
    state: u64,
    inc: u64,
}

const MULTIPLIER: u64 = 6364136223846793005;

impl Pcg {
    /// Seed a generator with an initial state and a stream selector.
    pub fn new(init_state: u64, init_seq: u64) -> Self {
        let mut pcg = Self {
            state: 0,
            inc: (init_seq << 1) | 1,
        };
        pcg.random();
        pcg.state = pcg.state.wrapping_add(init_state);
        pcg.random();
        pcg
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Stream increment (always odd).
    pub fn inc(&self) -> u64 {
        self.inc
    }

    /// Next 32-bit output.
    pub fn random(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(MULTIPLIER).wrapping_add(self.inc);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Next float uniformly distributed in `[0, 1]`.
    pub fn random_float(&mut self) -> f64 {
        self.random() as f64 / u32::MAX as f64
    }
}

impl Default for Pcg {
    fn default() -> Self {
        Self::new(42, 54)
    }
}
