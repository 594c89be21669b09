//! Configuration for a generation pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use nx_core::WorldSize;

/// A named terrain-generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    /// Grid-aligned wall clusters on a regular anchor lattice.
    Matrix,
    /// Organic corruption zones with distance-decaying obstacle density.
    Corrupted,
    /// Sparse border walls only.
    Pristine,
    /// Independent random wall scatter.
    Chaotic,
}

impl Biome {
    /// All biomes, in canonical listing order.
    pub const ALL: [Biome; 4] = [
        Biome::Matrix,
        Biome::Corrupted,
        Biome::Pristine,
        Biome::Chaotic,
    ];

    /// Parse a biome token, case-insensitively.
    pub fn parse(token: &str) -> Option<Biome> {
        let lower = token.to_ascii_lowercase();
        Biome::ALL.iter().copied().find(|b| b.name() == lower)
    }

    /// The canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Biome::Matrix => "matrix",
            Biome::Corrupted => "corrupted",
            Biome::Pristine => "pristine",
            Biome::Chaotic => "chaotic",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target cell fractions per interactive object type, each in `[0, 1]`.
///
/// Densities are ceilings, not guarantees: on a crowded map the placement
/// budget may run out and a pass silently produces fewer objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityConfig {
    /// Fraction of cells targeted for obstacles.
    pub obstacles: f64,
    /// Fraction of cells targeted for data nodes.
    pub datanodes: f64,
    /// Fraction of cells targeted for terminals.
    pub terminals: f64,
    /// Fraction of cells targeted for portals.
    pub portals: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            obstacles: 0.05,
            datanodes: 0.02,
            terminals: 0.01,
            portals: 0.005,
        }
    }
}

/// Everything needed to reproduce a world: persist this, regenerate the
/// template bit-identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed string for the generation RNG.
    pub seed: String,
    /// World width in cells.
    pub width: u32,
    /// World height in cells.
    pub height: u32,
    /// Object densities.
    pub density: DensityConfig,
    /// Terrain algorithm.
    pub biome: Biome,
    /// Difficulty rating carried onto the template.
    pub difficulty: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: "42".into(),
            width: 50,
            height: 50,
            density: DensityConfig::default(),
            biome: Biome::Matrix,
            difficulty: 1,
        }
    }
}

impl GenerationConfig {
    /// Set the seed string.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Set the world dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the object densities.
    pub fn with_density(mut self, density: DensityConfig) -> Self {
        self.density = density;
        self
    }

    /// Set the terrain biome.
    pub fn with_biome(mut self, biome: Biome) -> Self {
        self.biome = biome;
        self
    }

    /// Set the difficulty rating.
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// The world dimensions as a [`WorldSize`].
    pub fn size(&self) -> WorldSize {
        WorldSize::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biome_parse_accepts_all_names() {
        for biome in Biome::ALL {
            assert_eq!(Biome::parse(biome.name()), Some(biome));
        }
        assert_eq!(Biome::parse("Corrupted"), Some(Biome::Corrupted));
        assert_eq!(Biome::parse("desert"), None);
    }

    #[test]
    fn config_builder_chain() {
        let config = GenerationConfig::default()
            .with_seed("nebula")
            .with_size(80, 40)
            .with_biome(Biome::Chaotic)
            .with_difficulty(4);
        assert_eq!(config.seed, "nebula");
        assert_eq!(config.size(), WorldSize::new(80, 40));
        assert_eq!(config.biome, Biome::Chaotic);
        assert_eq!(config.difficulty, 4);
    }

    #[test]
    fn config_json_roundtrip() {
        let config = GenerationConfig::default().with_biome(Biome::Pristine);
        let json = serde_json::to_string(&config).unwrap();
        let back: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(json.contains("\"pristine\""));
    }
}
