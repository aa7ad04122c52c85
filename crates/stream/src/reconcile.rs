use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chunkwell_common::ChunkCoord;
use serde::Serialize;

use crate::factory::{ChunkFactory, ChunkInstance, ProductionError};
use crate::grid::ChunkGrid;
use crate::neighborhood::resident_set;
use crate::registry::ChunkRegistry;

/// An instance that was moved from a stale coordinate to a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkMove {
    pub from: ChunkCoord,
    pub to: ChunkCoord,
}

/// A coordinate the factory could not fill during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionFailure {
    pub coord: ChunkCoord,
    pub error: ProductionError,
}

/// Outcome of one streamer tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationReport {
    /// Chunk the observer was in for this tick.
    pub target: ChunkCoord,
    /// False when the tick was a no-op (target unchanged, window complete).
    pub reconciled: bool,
    /// Resident slots left untouched because they stayed in the window.
    pub retained: usize,
    /// Instances rebound from a stale coordinate, in the order applied.
    pub moves: Vec<ChunkMove>,
    /// Spare instances rebound to a missing coordinate.
    pub unparked: usize,
    /// Coordinates filled by a new instance from the factory.
    pub created: Vec<ChunkCoord>,
    /// Coordinates that remain absent after this pass.
    pub failures: Vec<ProductionFailure>,
    /// Stale instances no missing coordinate needed, moved to the spare pool.
    pub parked: usize,
    pub elapsed: Duration,
}

impl ReconciliationReport {
    /// Report for a tick that did no work.
    pub fn skipped(target: ChunkCoord) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn repositioned(&self) -> usize {
        self.moves.len()
    }

    /// True when every required coordinate is resident after the pass.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bring the registry's key set to the resident window around `target`.
///
/// Stale slots are collected, in registry order, into a FIFO free pool.
/// Each missing coordinate then takes the front of that pool; only once the
/// pool (and the spare pool) is exhausted is the factory asked for a new
/// instance. Slots that remain in the window are never touched. A factory
/// failure leaves its coordinate absent and is recorded in the report.
pub fn reconcile<F: ChunkFactory>(
    registry: &mut ChunkRegistry<F::Chunk>,
    grid: &ChunkGrid,
    factory: &mut F,
    target: ChunkCoord,
    log_chunk_events: bool,
) -> ReconciliationReport {
    let _span = tracing::info_span!("chunk_reconcile", %target).entered();
    let start = Instant::now();

    let required = resident_set(target);

    let mut free: VecDeque<ChunkCoord> = registry
        .coords()
        .filter(|c| !required.contains(c))
        .collect();
    let missing: Vec<ChunkCoord> = required
        .iter()
        .filter(|c| !registry.contains(**c))
        .copied()
        .collect();

    let mut report = ReconciliationReport {
        target,
        reconciled: true,
        retained: required.len() - missing.len(),
        ..ReconciliationReport::default()
    };

    for coord in missing {
        let center = grid.chunk_center(coord);

        if let Some(from) = free.pop_front() {
            if registry.relocate(from, coord, center) {
                if log_chunk_events {
                    tracing::debug!(%from, to = %coord, "moved chunk");
                }
                report.moves.push(ChunkMove { from, to: coord });
                continue;
            }
        }

        if registry.unpark(coord, center) {
            if log_chunk_events {
                tracing::debug!(%coord, "reused spare chunk");
            }
            report.unparked += 1;
            continue;
        }

        match factory.produce(coord, center) {
            Ok(mut chunk) => {
                if chunk.coord() != coord {
                    tracing::debug!(%coord, tagged = %chunk.coord(), "factory mislabeled chunk, retagging");
                    chunk.retag(coord, center);
                }
                registry.insert_created(coord, chunk);
                if log_chunk_events {
                    tracing::debug!(%coord, "created chunk");
                }
                report.created.push(coord);
            }
            Err(error) => {
                tracing::warn!(%coord, %error, "chunk production failed, slot left absent");
                report.failures.push(ProductionFailure { coord, error });
            }
        }
    }

    for coord in free {
        if registry.park(coord) {
            if log_chunk_events {
                tracing::debug!(%coord, "parked chunk");
            }
            report.parked += 1;
        }
    }

    report.elapsed = start.elapsed();
    tracing::trace!(
        retained = report.retained,
        moved = report.moves.len(),
        created = report.created.len(),
        failed = report.failures.len(),
        "reconcile complete"
    );
    report
}
