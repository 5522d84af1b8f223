use shared::Position;

/// A 3D vector in world space (meters).
///
/// Semantics:
/// - Used for player translations and spawn points.
/// - This is a data type only; the rules operate on [`shared::Position`].
#[derive(spacetimedb::SpacetimeType, Debug, Clone, Copy, PartialEq)]
pub struct DbVec3 {
    /// X axis (east-west)
    pub x: f32,
    /// Y axis (up-down)
    pub y: f32,
    /// Z axis (north-south)
    pub z: f32,
}

impl Default for DbVec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DbVec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<DbVec3> for Position {
    fn from(v: DbVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Position> for DbVec3 {
    fn from(p: Position) -> Self {
        DbVec3::new(p.x, p.y, p.z)
    }
}
