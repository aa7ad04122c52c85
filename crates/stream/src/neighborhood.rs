use std::collections::BTreeSet;

use chunkwell_common::ChunkCoord;

/// Radius (in cells) of the window that must be resident around the observer.
pub const RESIDENT_RADIUS: i32 = 1;

/// Number of cells in a neighborhood of the given radius, `(2r + 1)^3`.
pub const fn neighborhood_len(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let side = (2 * radius + 1) as usize;
    side * side * side
}

/// Compute all coordinates within `radius` cells of `center` on every axis.
///
/// The result is a cube of side `2 * radius + 1`. A negative radius yields an
/// empty set. The set is ordered so callers iterating it see the same
/// sequence on every platform.
pub fn neighborhood(center: ChunkCoord, radius: i32) -> BTreeSet<ChunkCoord> {
    let mut result = BTreeSet::new();
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            for dz in -radius..=radius {
                result.insert(center.offset(dx, dy, dz));
            }
        }
    }
    result
}

/// The set of coordinates that must be resident for an observer at `center`.
pub fn resident_set(center: ChunkCoord) -> BTreeSet<ChunkCoord> {
    neighborhood(center, RESIDENT_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_one_has_27_cells() {
        let set = neighborhood(ChunkCoord::ORIGIN, 1);
        assert_eq!(set.len(), 27);
        assert_eq!(set.len(), neighborhood_len(1));
        assert!(set.contains(&ChunkCoord::ORIGIN));
        assert!(set.contains(&ChunkCoord::new(-1, -1, -1)));
        assert!(set.contains(&ChunkCoord::new(1, 1, 1)));
        assert!(!set.contains(&ChunkCoord::new(2, 0, 0)));
    }

    #[test]
    fn radius_zero_is_center_only() {
        let c = ChunkCoord::new(4, -2, 9);
        let set = neighborhood(c, 0);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![c]);
    }

    #[test]
    fn negative_radius_is_empty() {
        assert!(neighborhood(ChunkCoord::ORIGIN, -1).is_empty());
        assert_eq!(neighborhood_len(-3), 0);
    }

    #[test]
    fn larger_radius_contains_smaller() {
        let c = ChunkCoord::new(10, 0, -10);
        let inner = neighborhood(c, 1);
        let outer = neighborhood(c, 3);
        assert_eq!(outer.len(), 343);
        assert!(inner.is_subset(&outer));
    }

    #[test]
    fn every_member_within_radius() {
        let c = ChunkCoord::new(-5, 3, 0);
        for coord in neighborhood(c, 2) {
            assert!(coord.chebyshev_distance(c) <= 2);
        }
    }

    #[test]
    fn resident_set_is_radius_one() {
        let c = ChunkCoord::new(1, 0, 0);
        assert_eq!(resident_set(c), neighborhood(c, 1));
    }
}
