use std::collections::BTreeSet;

use chunkwell_common::ChunkCoord;
use chunkwell_stream::{ChunkFactory, ChunkStreamer, MAX_LOOKAHEAD_RADIUS, neighborhood};
use glam::Vec3;

/// Border color for resident chunks.
pub const RESIDENT_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
/// Border color for lookahead chunks that are not resident.
pub const LOOKAHEAD_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Resident,
    Lookahead,
}

/// One wire box to draw around a chunk cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderBox {
    pub coord: ChunkCoord,
    pub center: Vec3,
    pub size: Vec3,
    /// RGBA, alpha taken from the configured border opacity.
    pub color: [f32; 4],
    pub kind: BorderKind,
}

/// Coordinates in the lookahead ring around `target` that are not resident.
///
/// `radius` is clamped to [`MAX_LOOKAHEAD_RADIUS`].
pub fn lookahead_ring(
    target: ChunkCoord,
    radius: u32,
    is_resident: impl Fn(ChunkCoord) -> bool,
) -> BTreeSet<ChunkCoord> {
    let radius = radius.min(MAX_LOOKAHEAD_RADIUS) as i32;
    neighborhood(target, radius)
        .into_iter()
        .filter(|c| !is_resident(*c))
        .collect()
}

/// Debug overlay of chunk borders derived from a streamer's read-only state.
///
/// Resident chunks are drawn green, the not-yet-resident part of the
/// lookahead ring red. Building the overlay never touches the registry.
#[derive(Debug, Clone, Default)]
pub struct BorderOverlay {
    boxes: Vec<BorderBox>,
}

impl BorderOverlay {
    pub fn build<F: ChunkFactory>(streamer: &ChunkStreamer<F>) -> Self {
        let debug = &streamer.config().debug;
        if !debug.visualize_borders {
            return Self::default();
        }

        let grid = streamer.grid();
        let size = grid.extent().size();
        let with_alpha = |rgb: [f32; 3]| [rgb[0], rgb[1], rgb[2], debug.border_opacity];

        let mut boxes: Vec<BorderBox> = streamer
            .placements()
            .map(|p| BorderBox {
                coord: p.coord,
                center: p.center,
                size,
                color: with_alpha(RESIDENT_COLOR),
                kind: BorderKind::Resident,
            })
            .collect();

        if let Some(target) = streamer.target() {
            let registry = streamer.registry();
            let ring = lookahead_ring(target, debug.lookahead_radius, |c| registry.contains(c));
            boxes.extend(ring.into_iter().map(|coord| BorderBox {
                coord,
                center: grid.chunk_center(coord),
                size,
                color: with_alpha(LOOKAHEAD_COLOR),
                kind: BorderKind::Lookahead,
            }));
        }

        tracing::trace!(boxes = boxes.len(), "built border overlay");
        Self { boxes }
    }

    pub fn boxes(&self) -> &[BorderBox] {
        &self.boxes
    }

    pub fn resident(&self) -> impl Iterator<Item = &BorderBox> {
        self.boxes.iter().filter(|b| b.kind == BorderKind::Resident)
    }

    pub fn lookahead(&self) -> impl Iterator<Item = &BorderBox> {
        self.boxes.iter().filter(|b| b.kind == BorderKind::Lookahead)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
