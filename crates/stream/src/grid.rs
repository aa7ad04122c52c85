use chunkwell_common::{COORD_LIMIT, ChunkCoord, ChunkExtent};
use glam::Vec3;

/// Convert a world position to the coordinate of the chunk containing it.
///
/// Each axis is floored independently, so a position exactly on a boundary
/// belongs to the chunk on its positive side. Components are clamped to
/// `±COORD_LIMIT`; use [`checked_coordinate_of`] to detect positions outside
/// the mappable range.
pub fn coordinate_of(position: Vec3, extent: ChunkExtent) -> ChunkCoord {
    let limit = COORD_LIMIT as f32;
    let scaled = (position / extent.size())
        .floor()
        .clamp(Vec3::splat(-limit), Vec3::splat(limit));
    ChunkCoord::new(scaled.x as i32, scaled.y as i32, scaled.z as i32)
}

/// Like [`coordinate_of`], but `None` for non-finite positions and for
/// positions whose chunk lies beyond `±COORD_LIMIT` on any axis.
pub fn checked_coordinate_of(position: Vec3, extent: ChunkExtent) -> Option<ChunkCoord> {
    if !position.is_finite() {
        return None;
    }
    let limit = COORD_LIMIT as f32;
    let scaled = (position / extent.size()).floor();
    if !scaled.is_finite() || scaled.abs().max_element() > limit {
        return None;
    }
    Some(ChunkCoord::new(scaled.x as i32, scaled.y as i32, scaled.z as i32))
}

/// World-space center of a chunk: `coord * extent + extent / 2`.
pub fn chunk_center(coord: ChunkCoord, extent: ChunkExtent) -> Vec3 {
    coord.as_ivec3().as_vec3() * extent.size() + extent.half()
}

/// Fixed-size 3D chunk grid.
///
/// Thin wrapper binding the mapping functions to one extent, so callers that
/// hold a grid cannot mix extents between creation and reuse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkGrid {
    extent: ChunkExtent,
}

impl ChunkGrid {
    pub fn new(extent: ChunkExtent) -> Self {
        Self { extent }
    }

    /// Chunk extent used for this grid.
    pub fn extent(&self) -> ChunkExtent {
        self.extent
    }

    /// Convert a world position to a chunk coordinate.
    pub fn coordinate_of(&self, position: Vec3) -> ChunkCoord {
        coordinate_of(position, self.extent)
    }

    /// Convert a world position to a chunk coordinate, rejecting positions
    /// that cannot be mapped.
    pub fn checked_coordinate_of(&self, position: Vec3) -> Option<ChunkCoord> {
        checked_coordinate_of(position, self.extent)
    }

    /// World-space center of the chunk at `coord`.
    pub fn chunk_center(&self, coord: ChunkCoord) -> Vec3 {
        chunk_center(coord, self.extent)
    }

    /// Axis-aligned bounds `(min, max)` of the chunk at `coord`.
    pub fn chunk_bounds(&self, coord: ChunkCoord) -> (Vec3, Vec3) {
        let min = coord.as_ivec3().as_vec3() * self.extent.size();
        (min, min + self.extent.size())
    }
}
