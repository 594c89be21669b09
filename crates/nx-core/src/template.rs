//! Immutable generated world templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::{Point, WorldSize};
use crate::object::WorldObject;

/// A complete generated world, ready to initialize or replace world state.
///
/// This is the serialization boundary toward persistence and presentation:
/// plain data, no behavior. `objects` and `spawn_points` are the reproducible
/// payload - regenerating from the same generation config yields them
/// byte-identically. `id` and `created_at` are provenance only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTemplate {
    /// Template identifier.
    pub id: String,
    /// Display name, derived from biome and seed.
    pub name: String,
    /// World dimensions.
    pub size: WorldSize,
    /// All placed objects. No two share a cell.
    pub objects: Vec<WorldObject>,
    /// Reserved agent spawn locations. Not objects; always on empty cells.
    pub spawn_points: Vec<Point>,
    /// Difficulty rating carried over from the generation config.
    pub difficulty: u32,
    /// When the template was generated.
    pub created_at: DateTime<Utc>,
}

impl WorldTemplate {
    /// Number of objects of the given type name (`"wall"`, `"datanode"`, ...).
    pub fn count_of(&self, type_name: &str) -> usize {
        self.objects
            .iter()
            .filter(|o| o.kind.name() == type_name)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;

    #[test]
    fn count_of_filters_by_type() {
        let template = WorldTemplate {
            id: "t1".into(),
            name: "matrix_world_42".into(),
            size: WorldSize::new(10, 10),
            objects: vec![
                WorldObject::new("wall_0_0", ObjectKind::Wall, Point::new(0, 0)),
                WorldObject::new("wall_1_0", ObjectKind::Wall, Point::new(1, 0)),
                WorldObject::new(
                    "datanode_0",
                    ObjectKind::DataNode {
                        value: 50,
                        encrypted: false,
                    },
                    Point::new(5, 5),
                ),
            ],
            spawn_points: vec![Point::new(2, 2)],
            difficulty: 1,
            created_at: Utc::now(),
        };
        assert_eq!(template.count_of("wall"), 2);
        assert_eq!(template.count_of("datanode"), 1);
        assert_eq!(template.count_of("portal"), 0);
    }

    #[test]
    fn json_roundtrip_preserves_payload() {
        let template = WorldTemplate {
            id: "t2".into(),
            name: "pristine_world_seed".into(),
            size: WorldSize::new(8, 8),
            objects: vec![WorldObject::new("wall_3_0", ObjectKind::Wall, Point::new(3, 0))],
            spawn_points: vec![Point::new(4, 4), Point::new(5, 5)],
            difficulty: 3,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&template).unwrap();
        let back: WorldTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }
}
