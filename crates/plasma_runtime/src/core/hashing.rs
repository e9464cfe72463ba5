//! Seeded hashers behind the `Hash` protocol of strings, bytes and tuples.

use ahash::RandomState;

#[derive(Clone, Debug)]
pub struct Hashing {
    state: RandomState,
}

impl Hashing {
    pub fn new(seed: u64) -> Self {
        Self {
            state: RandomState::with_seeds(
                seed,
                seed.rotate_left(17) ^ 0x9e37_79b9_7f4a_7c15,
                seed.rotate_left(31),
                !seed,
            ),
        }
    }

    pub fn hash_string(&self, value: &str) -> i64 {
        self.state.hash_one(value) as i64
    }

    pub fn hash_bytes(&self, value: &[u8]) -> i64 {
        self.state.hash_one(value) as i64
    }

    /// Combine element hashes; order matters.
    pub fn hash_array(&self, hashes: &[i64]) -> i64 {
        self.state.hash_one(hashes) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_hash() {
        let a = Hashing::new(7);
        let b = Hashing::new(7);
        assert_eq!(a.hash_string("plasma"), b.hash_string("plasma"));
        assert_ne!(a.hash_array(&[1, 2]), a.hash_array(&[2, 1]));
    }
}
