//! The procedural world generator.
//!
//! `generate` is reproducible: a fresh [`SeededRandom`] is built from the
//! config seed, and every random draw flows from it in a fixed order -
//! terrain first, then interactive objects, then spawn points. Later passes
//! avoid earlier ones through the occupancy set, which also enforces the
//! one-object-per-cell invariant.
//!
//! Placement is best-effort by design: each object placement samples cells
//! until it finds a free one or exhausts its attempt budget, and a failed
//! placement is silently skipped. Densities are ceilings, not guarantees.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use nx_core::{ObjectKind, Point, SeededRandom, WorldObject, WorldTemplate};

use crate::config::{Biome, GenerationConfig};

/// Attempt budget for finding a free cell before a placement is skipped.
const PLACEMENT_ATTEMPTS: u32 = 100;

/// Fraction of cells reserved as spawn points.
const SPAWN_FRACTION: f64 = 0.02;

/// Minimum number of spawn points regardless of world size.
const SPAWN_MINIMUM: usize = 4;

/// Generate a world template from a config. Pure: identical configs yield
/// identical `objects` and `spawn_points`.
pub fn generate(config: &GenerationConfig) -> WorldTemplate {
    WorldGenerator::new(config.clone()).generate()
}

/// A single generation pass. Owns its RNG and occupancy set.
pub struct WorldGenerator {
    config: GenerationConfig,
    rng: SeededRandom,
    occupied: HashSet<(i32, i32)>,
    objects: Vec<WorldObject>,
}

impl WorldGenerator {
    /// Create a generator with a fresh RNG seeded from the config.
    pub fn new(config: GenerationConfig) -> Self {
        let rng = SeededRandom::new(&config.seed);
        Self {
            config,
            rng,
            occupied: HashSet::new(),
            objects: Vec::new(),
        }
    }

    /// Run the full pass: terrain, objects, spawn points.
    pub fn generate(mut self) -> WorldTemplate {
        self.generate_terrain();
        self.place_datanodes();
        self.place_terminals();
        self.place_obstacles();
        self.place_portals();
        let spawn_points = self.generate_spawn_points();

        WorldTemplate {
            id: format!("generated_{}", Uuid::new_v4()),
            name: format!("{}_world_{}", self.config.biome, self.config.seed),
            size: self.config.size(),
            objects: self.objects,
            spawn_points,
            difficulty: self.config.difficulty,
            created_at: Utc::now(),
        }
    }

    // -- Terrain pass --------------------------------------------------------

    fn generate_terrain(&mut self) {
        match self.config.biome {
            Biome::Matrix => self.matrix_terrain(),
            Biome::Corrupted => self.corrupted_terrain(),
            Biome::Pristine => self.pristine_terrain(),
            Biome::Chaotic => self.chaotic_terrain(),
        }
    }

    /// Grid-aligned clusters: anchors every 10 cells, 30% spawn probability,
    /// cluster size 2–3, jittered ±2 around the anchor.
    fn matrix_terrain(&mut self) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        for x in (0..w).step_by(10) {
            for y in (0..h).step_by(10) {
                if self.rng.chance(0.3) {
                    let size = self.rng.next_int(2, 3);
                    for _ in 0..size {
                        let cx = x + self.rng.next_int(-2, 2);
                        let cy = y + self.rng.next_int(-2, 2);
                        self.push_terrain(ObjectKind::Wall, cx, cy);
                    }
                }
            }
        }
    }

    /// 3–6 organic corruption zones; obstacle probability decays linearly
    /// with distance from each zone center, scaled by 0.6.
    fn corrupted_terrain(&mut self) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        if w <= 10 || h <= 10 {
            // Too small to host a zone with its 5-cell center margin.
            return;
        }
        let zones = self.rng.next_int(3, 6);
        for _ in 0..zones {
            let center_x = self.rng.next_int(5, w - 5);
            let center_y = self.rng.next_int(5, h - 5);
            let radius = self.rng.next_int(3, 8);
            self.corruption_zone(center_x, center_y, radius);
        }
    }

    fn corruption_zone(&mut self, center_x: i32, center_y: i32, radius: i32) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        for x in (center_x - radius)..=(center_x + radius) {
            for y in (center_y - radius)..=(center_y + radius) {
                let distance = Point::new(x, y).distance(Point::new(center_x, center_y));
                if distance <= f64::from(radius) && x >= 0 && x < w && y >= 0 && y < h {
                    let probability = 1.0 - distance / f64::from(radius);
                    if self.rng.chance(probability * 0.6) {
                        self.push_terrain(
                            ObjectKind::Obstacle {
                                destructible: false,
                                health: 1,
                            },
                            x,
                            y,
                        );
                    }
                }
            }
        }
    }

    /// Sparse border walls only: 10% per border cell, mirrored across the
    /// opposite edge from a single draw.
    fn pristine_terrain(&mut self) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        for x in 0..w {
            if self.rng.chance(0.1) {
                self.push_terrain(ObjectKind::Wall, x, 0);
                self.push_terrain(ObjectKind::Wall, x, h - 1);
            }
        }
        for y in 0..h {
            if self.rng.chance(0.1) {
                self.push_terrain(ObjectKind::Wall, 0, y);
                self.push_terrain(ObjectKind::Wall, w - 1, y);
            }
        }
    }

    /// Independent scatter over ~5% of all cells, each a wall with
    /// conditional probability 0.7.
    fn chaotic_terrain(&mut self) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        let samples = (f64::from(w) * f64::from(h) * 0.05).ceil() as usize;
        for _ in 0..samples {
            let x = self.rng.next_int(0, w - 1);
            let y = self.rng.next_int(0, h - 1);
            if self.rng.chance(0.7) {
                self.push_terrain(ObjectKind::Wall, x, y);
            }
        }
    }

    /// Append a terrain object if the cell is in bounds and unoccupied.
    /// The random draws that led here already happened, so skipping a
    /// duplicate cell never perturbs the sequence.
    fn push_terrain(&mut self, kind: ObjectKind, x: i32, y: i32) {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        if x < 0 || x >= w || y < 0 || y >= h {
            return;
        }
        if self.occupied.insert((x, y)) {
            let id = format!("{}_{x}_{y}", kind.name());
            self.objects
                .push(WorldObject::new(id, kind, Point::new(x, y)));
        }
    }

    // -- Interactive object passes ------------------------------------------

    fn target_count(&self, density: f64) -> usize {
        (f64::from(self.config.width) * f64::from(self.config.height) * density) as usize
    }

    fn place_datanodes(&mut self) {
        let count = self.target_count(self.config.density.datanodes);
        for i in 0..count {
            if let Some(position) = self.find_empty_position() {
                let value = self.rng.next_int(50, 200) as u32;
                let encrypted = self.rng.chance(0.3);
                self.place(
                    format!("datanode_{i}"),
                    ObjectKind::DataNode { value, encrypted },
                    position,
                );
            }
        }
    }

    fn place_terminals(&mut self) {
        let count = self.target_count(self.config.density.terminals);
        for i in 0..count {
            if let Some(position) = self.find_empty_position() {
                let active = self.rng.chance(0.7);
                let access_level = self.rng.next_int(1, 5) as u32;
                self.place(
                    format!("terminal_{i}"),
                    ObjectKind::TerminalNode {
                        active,
                        access_level,
                    },
                    position,
                );
            }
        }
    }

    fn place_obstacles(&mut self) {
        let count = self.target_count(self.config.density.obstacles);
        for i in 0..count {
            if let Some(position) = self.find_empty_position() {
                let destructible = self.rng.chance(0.4);
                let health = self.rng.next_int(1, 3) as u32;
                self.place(
                    format!("obstacle_{i}"),
                    ObjectKind::Obstacle {
                        destructible,
                        health,
                    },
                    position,
                );
            }
        }
    }

    fn place_portals(&mut self) {
        let count = self.target_count(self.config.density.portals);
        for i in 0..count {
            if let Some(position) = self.find_empty_position() {
                let destination = format!("world_{}", self.rng.next_int(1, 10));
                let stable = self.rng.chance(0.8);
                self.place(
                    format!("portal_{i}"),
                    ObjectKind::Portal {
                        destination,
                        stable,
                    },
                    position,
                );
            }
        }
    }

    fn place(&mut self, id: String, kind: ObjectKind, position: Point) {
        self.occupied.insert((position.x, position.y));
        self.objects.push(WorldObject::new(id, kind, position));
    }

    /// Uniformly sample cells until one is free, giving up after the attempt
    /// budget. `None` means the placement is skipped.
    fn find_empty_position(&mut self) -> Option<Point> {
        let (w, h) = (self.config.width as i32, self.config.height as i32);
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = self.rng.next_int(0, w - 1);
            let y = self.rng.next_int(0, h - 1);
            if !self.occupied.contains(&(x, y)) {
                return Some(Point::new(x, y));
            }
        }
        None
    }

    // -- Spawn points --------------------------------------------------------

    /// Reserve empty cells as agent spawn locations. These are not objects,
    /// but they join the occupancy set so spawns are unique.
    fn generate_spawn_points(&mut self) -> Vec<Point> {
        let area = f64::from(self.config.width) * f64::from(self.config.height);
        let count = SPAWN_MINIMUM.max((area * SPAWN_FRACTION) as usize);
        let mut spawn_points = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(position) = self.find_empty_position() {
                self.occupied.insert((position.x, position.y));
                spawn_points.push(position);
            }
        }
        spawn_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DensityConfig;
    use proptest::prelude::*;

    fn config(biome: Biome) -> GenerationConfig {
        GenerationConfig::default()
            .with_seed("test-world")
            .with_biome(biome)
    }

    #[test]
    fn generation_is_deterministic() {
        for biome in Biome::ALL {
            let a = generate(&config(biome));
            let b = generate(&config(biome));
            assert_eq!(a.objects, b.objects, "objects diverged for {biome}");
            assert_eq!(
                a.spawn_points, b.spawn_points,
                "spawn points diverged for {biome}"
            );
        }
    }

    #[test]
    fn different_seeds_produce_different_worlds() {
        let a = generate(&config(Biome::Chaotic));
        let b = generate(&config(Biome::Chaotic).with_seed("other-seed"));
        assert_ne!(a.objects, b.objects);
    }

    #[test]
    fn no_two_objects_share_a_cell() {
        for biome in Biome::ALL {
            let template = generate(&config(biome));
            let mut seen = HashSet::new();
            for object in &template.objects {
                assert!(
                    seen.insert((object.position.x, object.position.y)),
                    "duplicate cell {} in {biome}",
                    object.position
                );
            }
        }
    }

    #[test]
    fn everything_is_in_bounds() {
        for biome in Biome::ALL {
            let template = generate(&config(biome));
            for object in &template.objects {
                assert!(template.size.contains(object.position));
            }
            for spawn in &template.spawn_points {
                assert!(template.size.contains(*spawn));
            }
        }
    }

    #[test]
    fn spawn_points_are_unique_and_off_objects() {
        let template = generate(&config(Biome::Matrix));
        let object_cells: HashSet<_> = template
            .objects
            .iter()
            .map(|o| (o.position.x, o.position.y))
            .collect();
        let mut seen = HashSet::new();
        for spawn in &template.spawn_points {
            assert!(seen.insert((spawn.x, spawn.y)), "duplicate spawn {spawn}");
            assert!(!object_cells.contains(&(spawn.x, spawn.y)));
        }
    }

    #[test]
    fn spawn_count_has_floor_of_four() {
        let template = generate(&config(Biome::Pristine).with_size(12, 12));
        // 12*12*0.02 = 2.88, floored below the minimum of 4.
        assert_eq!(template.spawn_points.len(), 4);
    }

    #[test]
    fn pristine_places_only_border_walls() {
        let template = generate(&config(Biome::Pristine));
        let (w, h) = (template.size.width as i32, template.size.height as i32);
        for object in &template.objects {
            if object.kind == ObjectKind::Wall {
                let p = object.position;
                assert!(
                    p.x == 0 || p.x == w - 1 || p.y == 0 || p.y == h - 1,
                    "interior wall at {p}"
                );
            }
        }
    }

    #[test]
    fn matrix_walls_cluster_near_anchors() {
        let template = generate(&config(Biome::Matrix));
        for object in &template.objects {
            if object.kind == ObjectKind::Wall {
                let mx = object.position.x.rem_euclid(10);
                let my = object.position.y.rem_euclid(10);
                assert!(mx <= 2 || mx >= 8, "wall off-anchor at {}", object.position);
                assert!(my <= 2 || my >= 8, "wall off-anchor at {}", object.position);
            }
        }
    }

    #[test]
    fn corrupted_terrain_uses_obstacles_not_walls() {
        let template = generate(&config(Biome::Corrupted));
        assert_eq!(template.count_of("wall"), 0);
        assert!(template.count_of("obstacle") > 0);
    }

    #[test]
    fn unsatisfiable_density_is_a_silent_shortfall() {
        let dense = GenerationConfig::default()
            .with_seed("dense")
            .with_size(10, 10)
            .with_biome(Biome::Chaotic)
            .with_density(DensityConfig {
                obstacles: 0.0,
                datanodes: 1.0,
                terminals: 0.0,
                portals: 0.0,
            });
        let template = generate(&dense);
        // 100 cells requested; terrain and the attempt budget make the full
        // target unreachable. The pass completes anyway.
        assert!(template.count_of("datanode") < 100);
        assert!(template.count_of("datanode") > 0);
    }

    #[test]
    fn template_name_reflects_biome_and_seed() {
        let template = generate(&config(Biome::Corrupted));
        assert_eq!(template.name, "corrupted_world_test-world");
    }

    #[test]
    fn datanode_properties_within_documented_ranges() {
        let template = generate(&config(Biome::Pristine));
        for object in &template.objects {
            if let ObjectKind::DataNode { value, .. } = &object.kind {
                assert!((50..=200).contains(value));
            }
            if let ObjectKind::TerminalNode { access_level, .. } = &object.kind {
                assert!((1..=5).contains(access_level));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn generation_invariants_hold_for_arbitrary_configs(
            seed in "[a-z0-9]{1,12}",
            width in 12u32..40,
            height in 12u32..40,
            biome_idx in 0usize..4,
            obstacles in 0.0f64..0.08,
            datanodes in 0.0f64..0.05,
        ) {
            let config = GenerationConfig::default()
                .with_seed(seed)
                .with_size(width, height)
                .with_biome(Biome::ALL[biome_idx])
                .with_density(DensityConfig {
                    obstacles,
                    datanodes,
                    terminals: 0.01,
                    portals: 0.005,
                });

            let a = generate(&config);
            let b = generate(&config);
            prop_assert_eq!(&a.objects, &b.objects);
            prop_assert_eq!(&a.spawn_points, &b.spawn_points);

            let mut cells = HashSet::new();
            for object in &a.objects {
                prop_assert!(a.size.contains(object.position));
                prop_assert!(cells.insert((object.position.x, object.position.y)));
            }
            for spawn in &a.spawn_points {
                prop_assert!(a.size.contains(*spawn));
            }
        }
    }
}
