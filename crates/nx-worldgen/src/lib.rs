//! Seeded procedural world and event generation.
//!
//! [`generate`] is a pure function of its [`GenerationConfig`]: a fresh
//! [`SeededRandom`](nx_core::SeededRandom) is created from the config seed
//! for each pass, so persisting the config alone is enough to regenerate a
//! bit-identical [`WorldTemplate`](nx_core::WorldTemplate). The
//! [`WorldEventGenerator`] produces timed, randomized world events and can
//! schedule one-shot deliveries on a tokio timer.

pub mod config;
pub mod events;
pub mod generator;

pub use config::{Biome, DensityConfig, GenerationConfig};
pub use events::WorldEventGenerator;
pub use generator::{WorldGenerator, generate};
