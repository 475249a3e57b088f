use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for a single noise generation call.
///
/// Integer seeds follow the convention of the command line and bindings:
/// any negative value (canonically `-1`) asks for a non-deterministic seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoiseSeed {
    /// Deterministic stream keyed by exactly this value.
    Fixed(u64),
    /// Stream keyed from operating system entropy.
    #[default]
    Entropy,
}

impl NoiseSeed {
    /// Sentinel integer requesting an entropy seed.
    pub const ENTROPY_SENTINEL: i64 = -1;

    /// Create a fresh random stream for this seed.
    ///
    /// ChaCha8 is used so that fixed seeds reproduce the same stream on every
    /// platform. Every call returns an independent stream starting from the
    /// beginning, nothing is shared between calls.
    pub fn rng(&self) -> ChaCha8Rng {
        match *self {
            NoiseSeed::Fixed(value) => ChaCha8Rng::seed_from_u64(value),
            NoiseSeed::Entropy => ChaCha8Rng::from_entropy(),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self, NoiseSeed::Fixed(_))
    }
}

impl From<i64> for NoiseSeed {
    fn from(value: i64) -> Self {
        if value < 0 {
            NoiseSeed::Entropy
        } else {
            NoiseSeed::Fixed(value as u64)
        }
    }
}

impl From<i32> for NoiseSeed {
    fn from(value: i32) -> Self {
        NoiseSeed::from(value as i64)
    }
}

impl From<u64> for NoiseSeed {
    fn from(value: u64) -> Self {
        NoiseSeed::Fixed(value)
    }
}
