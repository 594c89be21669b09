//! Deterministic pseudo-random source seeded from a string.
//!
//! Implements the generator every reproducible path in Nexus draws from: the
//! seed string is hashed to a 32-bit integer, then a linear-congruential step
//! (`state = (state * 9301 + 49297) mod 233280`) produces successive values
//! in `[0, 1)`.
//!
//! Determinism is the contract: the same seed string yields the same output
//! sequence on every platform, compiler, and optimization level. The hash
//! uses wrapping 32-bit arithmetic over UTF-16 code units and the LCG state
//! is advanced in 64-bit integer arithmetic, so no step depends on host
//! word size or float rounding.
//!
//! Not thread-safe by design - each generation pass owns one instance.

use serde::{Deserialize, Serialize};

/// The LCG modulus. State is always in `[0, MODULUS)` after the first step.
const MODULUS: u64 = 233_280;
const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;

/// A deterministic pseudo-random generator seeded from a string.
///
/// Two instances created with the same seed produce identical sequences.
/// Cloning captures the current state, so a clone continues the sequence
/// independently from the point of the clone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a generator from a seed string.
    pub fn new(seed: &str) -> Self {
        Self {
            state: u64::from(hash_seed(seed)),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Uniform integer in `[min, max]` (inclusive on both ends).
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "next_int: min must be <= max");
        min + (self.next() * f64::from(max - min + 1)) as i32
    }

    /// Uniform float in `[min, max)`.
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Uniformly chosen element of a non-empty slice.
    ///
    /// Panics if `items` is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choice: empty slice");
        let idx = (self.next() * items.len() as f64) as usize;
        &items[idx]
    }

    /// Return `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }
}

/// Hash a seed string to a non-negative 32-bit integer.
///
/// Iterates UTF-16 code units with the classic `h*31 + c` rolling hash in
/// wrapping 32-bit arithmetic, then takes the absolute value. Matches the
/// persisted seed semantics of existing world configs, so a stored seed
/// string keeps regenerating the same world.
fn hash_seed(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new("alpha-world");
        let mut b = SeededRandom::new("alpha-world");
        for _ in 0..1000 {
            assert!((a.next() - b.next()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new("alpha");
        let mut b = SeededRandom::new("beta");
        // First values are all but certain to differ for distinct hashes.
        assert!((a.next() - b.next()).abs() > f64::EPSILON);
    }

    #[test]
    fn known_sequence_for_seed_42() {
        // hash("42") = 1662; the first two LCG states are 111079 and 231236.
        let mut rng = SeededRandom::new("42");
        assert!((rng.next() - 111_079.0 / 233_280.0).abs() < 1e-12);
        assert!((rng.next() - 231_236.0 / 233_280.0).abs() < 1e-12);
    }

    #[test]
    fn seed_hash_is_stable() {
        assert_eq!(hash_seed("42"), 1662);
        assert_eq!(hash_seed(""), 0);
    }

    #[test]
    fn next_in_unit_range() {
        let mut rng = SeededRandom::new("range-check");
        for _ in 0..10_000 {
            let v = rng.next();
            assert!((0.0..1.0).contains(&v), "next out of range: {v}");
        }
    }

    #[test]
    fn next_int_inclusive_bounds() {
        let mut rng = SeededRandom::new("int-check");
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..10_000 {
            let v = rng.next_int(3, 6);
            assert!((3..=6).contains(&v), "next_int out of range: {v}");
            saw_min |= v == 3;
            saw_max |= v == 6;
        }
        assert!(saw_min, "inclusive lower bound never produced");
        assert!(saw_max, "inclusive upper bound never produced");
    }

    #[test]
    fn next_float_within_bounds() {
        let mut rng = SeededRandom::new("float-check");
        for _ in 0..10_000 {
            let v = rng.next_float(1.5, 3.5);
            assert!(v >= 1.5 && v < 3.5, "next_float out of range: {v}");
        }
    }

    #[test]
    fn choice_covers_all_elements() {
        let mut rng = SeededRandom::new("choice-check");
        let items = ["a", "b", "c"];
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let picked = rng.choice(&items);
            seen[items.iter().position(|i| i == picked).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SeededRandom::new("chance-check");
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn clone_continues_sequence() {
        let mut rng = SeededRandom::new("clone-check");
        rng.next();
        let mut fork = rng.clone();
        for _ in 0..100 {
            assert!((rng.next() - fork.next()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = SeededRandom::new("serde-check");
        for _ in 0..50 {
            rng.next();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: SeededRandom = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert!((rng.next() - restored.next()).abs() < f64::EPSILON);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_seed_is_deterministic(seed in ".{0,32}") {
                let mut a = SeededRandom::new(&seed);
                let mut b = SeededRandom::new(&seed);
                for _ in 0..100 {
                    prop_assert!((a.next() - b.next()).abs() < f64::EPSILON);
                }
            }

            #[test]
            fn next_int_respects_inclusive_range(
                seed in "[a-z]{1,8}",
                min in -100i32..100,
                span in 0i32..100,
            ) {
                let mut rng = SeededRandom::new(&seed);
                let max = min + span;
                for _ in 0..100 {
                    let v = rng.next_int(min, max);
                    prop_assert!((min..=max).contains(&v));
                }
            }
        }
    }
}
