//! Deterministic random number generation for combat.
//!
//! Every random decision in a combat (shuffles, enemy intents, random targets,
//! weighted rolls) is drawn from one seedable source so that a fixed seed
//! replays a fight exactly.

/// Random source used by the combat rules.
///
/// Implementations must be deterministic: the same seed produces the same
/// sequence.
pub trait CombatRng {
    /// Generate a random u32.
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max).
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Shuffle a slice using the Fisher-Yates algorithm.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.gen_range(i + 1);
            slice.swap(i, j);
        }
    }

    /// Pick an index by cumulative weight.
    ///
    /// The roll lands in `[0, total)`; the first entry whose running total
    /// exceeds the roll wins, so ties resolve in declaration order. Returns
    /// `None` for an empty slice and `Some(0)` when every weight is zero.
    fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return Some(0);
        }
        let roll = u64::from(self.next_u32()) % total;
        let mut cumulative = 0u64;
        for (index, &weight) in weights.iter().enumerate() {
            cumulative += u64::from(weight);
            if roll < cumulative {
                return Some(index);
            }
        }
        Some(weights.len() - 1)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Create a generator from a seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        // Discard the first output so nearby seeds diverge immediately.
        rng.next_u32();
        rng
    }

    /// Current internal state (for snapshots).
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Rebuild a generator from a previously captured state.
    pub fn from_state(state: u64) -> Self {
        Self { state }
    }

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}
