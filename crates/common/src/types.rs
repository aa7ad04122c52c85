use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest absolute value a mapped chunk coordinate may take on any axis.
///
/// Leaves headroom below `i32::MAX` so neighborhoods around any mapped
/// coordinate stay contiguous.
pub const COORD_LIMIT: i32 = 1 << 30;

/// Integer coordinate of a cell in the chunk grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate shifted by the given number of cells on each axis.
    /// Saturates at the `i32` range instead of overflowing.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Largest per-axis distance (in cells) between two coordinates.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Errors produced when constructing a [`ChunkExtent`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtentError {
    #[error("chunk extent {axis} must be positive, got {value}")]
    NonPositive { axis: char, value: f32 },
    #[error("chunk extent {axis} must be finite, got {value}")]
    NonFinite { axis: char, value: f32 },
}

/// Side lengths of one chunk cell.
///
/// Every component is finite and strictly positive. The only way to obtain a
/// value is through [`ChunkExtent::new`] (or deserialization, which goes
/// through the same check), so division by an extent component never sees
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec3", into = "Vec3")]
pub struct ChunkExtent(Vec3);

impl ChunkExtent {
    pub fn new(size: Vec3) -> Result<Self, ExtentError> {
        for (axis, value) in [('x', size.x), ('y', size.y), ('z', size.z)] {
            if !value.is_finite() {
                return Err(ExtentError::NonFinite { axis, value });
            }
            if value <= 0.0 {
                return Err(ExtentError::NonPositive { axis, value });
            }
        }
        Ok(Self(size))
    }

    /// Cubic extent with the same side length on every axis.
    pub fn splat(side: f32) -> Result<Self, ExtentError> {
        Self::new(Vec3::splat(side))
    }

    pub fn size(&self) -> Vec3 {
        self.0
    }

    pub fn half(&self) -> Vec3 {
        self.0 / 2.0
    }
}

impl TryFrom<Vec3> for ChunkExtent {
    type Error = ExtentError;

    fn try_from(size: Vec3) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<ChunkExtent> for Vec3 {
    fn from(extent: ChunkExtent) -> Self {
        extent.0
    }
}

/// Unique identifier for a chunk instance produced by a factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and labels.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_id_uniqueness() {
        let a = InstanceId::new();
        let b = InstanceId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn coord_equality_needs_all_axes() {
        assert_eq!(ChunkCoord::new(1, 2, 3), ChunkCoord::new(1, 2, 3));
        assert_ne!(ChunkCoord::new(1, 2, 3), ChunkCoord::new(1, 2, 4));
        assert_ne!(ChunkCoord::new(0, 2, 3), ChunkCoord::new(1, 2, 3));
    }

    #[test]
    fn coord_offset_and_distance() {
        let c = ChunkCoord::ORIGIN.offset(2, -1, 0);
        assert_eq!(c, ChunkCoord::new(2, -1, 0));
        assert_eq!(c.chebyshev_distance(ChunkCoord::ORIGIN), 2);
        assert_eq!(ChunkCoord::from(IVec3::new(4, 5, 6)), ChunkCoord::new(4, 5, 6));
    }

    #[test]
    fn offset_saturates_at_i32_bounds() {
        let c = ChunkCoord::new(i32::MAX, i32::MIN, 0).offset(1, -1, 1);
        assert_eq!(c, ChunkCoord::new(i32::MAX, i32::MIN, 1));
    }

    #[test]
    fn coord_display() {
        assert_eq!(ChunkCoord::new(-1, 0, 7).to_string(), "(-1, 0, 7)");
    }

    #[test]
    fn extent_rejects_non_positive() {
        let err = ChunkExtent::new(Vec3::new(5.0, 0.0, 5.0)).unwrap_err();
        assert_eq!(err, ExtentError::NonPositive { axis: 'y', value: 0.0 });

        let err = ChunkExtent::new(Vec3::new(5.0, 5.0, -1.0)).unwrap_err();
        assert!(matches!(err, ExtentError::NonPositive { axis: 'z', .. }));
    }

    #[test]
    fn extent_rejects_non_finite() {
        let err = ChunkExtent::new(Vec3::new(f32::NAN, 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ExtentError::NonFinite { axis: 'x', .. }));
        assert!(ChunkExtent::splat(f32::INFINITY).is_err());
    }

    #[test]
    fn extent_half() {
        let e = ChunkExtent::new(Vec3::new(4.0, 2.0, 8.0)).unwrap();
        assert_eq!(e.half(), Vec3::new(2.0, 1.0, 4.0));
        assert_eq!(e.size(), Vec3::new(4.0, 2.0, 8.0));
    }
}
