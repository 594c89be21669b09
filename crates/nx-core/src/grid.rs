//! Grid geometry: points, world bounds, and named compass locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, increasing eastward.
    pub x: i32,
    /// Row, increasing southward.
    pub y: i32,
}

impl Point {
    /// Create a point from column and row.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// World dimensions. Valid cells are `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSize {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl WorldSize {
    /// Create a size from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the point lies within `[0, width) × [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && (p.x as u32) < self.width && p.y >= 0 && (p.y as u32) < self.height
    }

    /// Clamp a point into bounds.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0, self.width.saturating_sub(1) as i32),
            p.y.clamp(0, self.height.saturating_sub(1) as i32),
        )
    }

    /// The central cell.
    pub fn center(&self) -> Point {
        Point::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

impl fmt::Display for WorldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A named deployment location on the grid.
///
/// This is the single location table shared by the validator, the execution
/// engine, and the fallback resolver - the same token list everywhere, so the
/// components cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    /// The world center.
    Center,
    /// Top edge, horizontally centered.
    North,
    /// Bottom edge, horizontally centered.
    South,
    /// Right edge, vertically centered.
    East,
    /// Left edge, vertically centered.
    West,
    /// Top-right quadrant.
    Northeast,
    /// Top-left quadrant.
    Northwest,
    /// Bottom-right quadrant.
    Southeast,
    /// Bottom-left quadrant.
    Southwest,
}

impl Compass {
    /// All named locations, in canonical listing order.
    pub const ALL: [Compass; 9] = [
        Compass::Center,
        Compass::North,
        Compass::South,
        Compass::East,
        Compass::West,
        Compass::Northeast,
        Compass::Northwest,
        Compass::Southeast,
        Compass::Southwest,
    ];

    /// Parse a location token, case-insensitively.
    pub fn parse(token: &str) -> Option<Compass> {
        let lower = token.to_ascii_lowercase();
        Compass::ALL.iter().copied().find(|c| c.name() == lower)
    }

    /// The canonical lowercase token for this location.
    pub fn name(&self) -> &'static str {
        match self {
            Compass::Center => "center",
            Compass::North => "north",
            Compass::South => "south",
            Compass::East => "east",
            Compass::West => "west",
            Compass::Northeast => "northeast",
            Compass::Northwest => "northwest",
            Compass::Southeast => "southeast",
            Compass::Southwest => "southwest",
        }
    }

    /// Resolve to a base coordinate for the given world size.
    ///
    /// Cardinal and diagonal locations map to quarter positions: north is a
    /// quarter of the height from the top edge, east a quarter of the width
    /// from the right edge, and so on.
    pub fn resolve(&self, size: WorldSize) -> Point {
        let w = size.width as i32;
        let h = size.height as i32;
        let (cx, cy) = (w / 2, h / 2);
        let (qx, qy) = (w / 4, h / 4);
        match self {
            Compass::Center => Point::new(cx, cy),
            Compass::North => Point::new(cx, qy),
            Compass::South => Point::new(cx, h - 1 - qy),
            Compass::East => Point::new(w - 1 - qx, cy),
            Compass::West => Point::new(qx, cy),
            Compass::Northeast => Point::new(w - 1 - qx, qy),
            Compass::Northwest => Point::new(qx, qy),
            Compass::Southeast => Point::new(w - 1 - qx, h - 1 - qy),
            Compass::Southwest => Point::new(qx, h - 1 - qy),
        }
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
