//! World objects with per-kind typed properties.
//!
//! The generator and the execution engine never attach free-form property
//! bags to objects; each kind carries exactly the fields that kind can have.

use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// Per-kind object properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    /// Impassable terrain placed by the terrain pass.
    Wall,
    /// Blocking debris, possibly destructible.
    Obstacle {
        /// Whether the obstacle can be destroyed.
        destructible: bool,
        /// Hit points remaining.
        health: u32,
    },
    /// A collectable data cache.
    #[serde(rename = "datanode")]
    DataNode {
        /// Score value when collected.
        value: u32,
        /// Encrypted nodes require decryption before collection.
        encrypted: bool,
    },
    /// An activatable access terminal.
    #[serde(rename = "terminalnode")]
    TerminalNode {
        /// Whether the terminal is currently powered.
        active: bool,
        /// Clearance level required to use it, 1–5.
        access_level: u32,
    },
    /// A teleport gateway to another world.
    Portal {
        /// Identifier of the destination world.
        destination: String,
        /// Unstable portals may scatter travellers.
        stable: bool,
    },
}

impl ObjectKind {
    /// The canonical lowercase type name, as used in object ids and wire data.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Wall => "wall",
            ObjectKind::Obstacle { .. } => "obstacle",
            ObjectKind::DataNode { .. } => "datanode",
            ObjectKind::TerminalNode { .. } => "terminalnode",
            ObjectKind::Portal { .. } => "portal",
        }
    }

    /// Whether agents cannot occupy this object's cell.
    pub fn is_blocking(&self) -> bool {
        matches!(self, ObjectKind::Wall | ObjectKind::Obstacle { .. })
    }

    /// Whether the object can be picked up.
    pub fn is_collectable(&self) -> bool {
        matches!(self, ObjectKind::DataNode { .. })
    }

    /// Whether the object responds to activation.
    pub fn is_activatable(&self) -> bool {
        matches!(
            self,
            ObjectKind::TerminalNode { .. } | ObjectKind::Portal { .. }
        )
    }
}

/// A placed object in a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// Deterministic identifier (`"datanode_3"`, `"wall_12_4"`).
    pub id: String,
    /// Typed properties.
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Grid cell the object occupies. Unique within one generation pass.
    pub position: Point,
}

impl WorldObject {
    /// Create an object at a position.
    pub fn new(id: impl Into<String>, kind: ObjectKind, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_flags_follow_kind() {
        assert!(ObjectKind::Wall.is_blocking());
        assert!(
            ObjectKind::Obstacle {
                destructible: true,
                health: 2
            }
            .is_blocking()
        );
        assert!(
            !ObjectKind::DataNode {
                value: 100,
                encrypted: false
            }
            .is_blocking()
        );
    }

    #[test]
    fn capability_flags_follow_kind() {
        let node = ObjectKind::DataNode {
            value: 80,
            encrypted: true,
        };
        assert!(node.is_collectable());
        assert!(!node.is_activatable());

        let terminal = ObjectKind::TerminalNode {
            active: true,
            access_level: 3,
        };
        assert!(terminal.is_activatable());
        assert!(!terminal.is_collectable());

        let portal = ObjectKind::Portal {
            destination: "world_4".into(),
            stable: true,
        };
        assert!(portal.is_activatable());
    }

    #[test]
    fn serializes_with_lowercase_type_tag() {
        let obj = WorldObject::new(
            "datanode_0",
            ObjectKind::DataNode {
                value: 120,
                encrypted: false,
            },
            Point::new(4, 7),
        );
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["type"], "datanode");
        assert_eq!(json["value"], 120);
        assert_eq!(json["position"]["x"], 4);

        let back: WorldObject = serde_json::from_value(json).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn type_names_match_wire_tags() {
        let portal = ObjectKind::Portal {
            destination: "world_1".into(),
            stable: false,
        };
        let json = serde_json::to_value(WorldObject::new("portal_0", portal, Point::new(0, 0)))
            .unwrap();
        assert_eq!(json["type"], "portal");
    }
}
