use std::time::Duration;

use chunkwell_common::ChunkCoord;
use glam::Vec3;
use serde::Serialize;

use crate::config::{ConfigError, StreamConfig, validate_config};
use crate::factory::ChunkFactory;
use crate::grid::ChunkGrid;
use crate::reconcile::{ReconciliationReport, reconcile};
use crate::registry::ChunkRegistry;

/// Last observer sample and the chunk it mapped to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObserverState {
    pub position: Option<Vec3>,
    pub target: Option<ChunkCoord>,
}

/// Cumulative streaming statistics for instrumentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamStats {
    pub ticks: u64,
    pub passes: u64,
    pub ticks_skipped: u64,
    /// Samples ignored because they were non-finite or out of range.
    pub positions_rejected: u64,
    pub instances_created: usize,
    pub instances_repositioned: usize,
    pub production_failures: usize,
    pub last_pass_time: Duration,
}

impl StreamStats {
    fn record(&mut self, report: &ReconciliationReport) {
        self.passes += 1;
        self.instances_created += report.created.len();
        self.instances_repositioned += report.moves.len() + report.unparked;
        self.production_failures += report.failures.len();
        self.last_pass_time = report.elapsed;
    }
}

/// A resident chunk as seen by diagnostics: where it is, not what it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub coord: ChunkCoord,
    pub center: Vec3,
}

/// Owned, serializable copy of the resident window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub target: Option<ChunkCoord>,
    pub chunk_extent: Vec3,
    pub instance_count: usize,
    pub chunks: Vec<Placement>,
}

/// Keeps the 3x3x3 window of chunks around a single observer resident.
///
/// The host calls [`ChunkStreamer::tick`] once per frame with the observer's
/// position. Work only happens when the observer crosses into another chunk
/// (or when an earlier pass left the window incomplete); otherwise the tick
/// returns after one coordinate comparison.
pub struct ChunkStreamer<F: ChunkFactory> {
    config: StreamConfig,
    grid: ChunkGrid,
    factory: F,
    registry: ChunkRegistry<F::Chunk>,
    observer: ObserverState,
    /// Set when the last pass could not fill every slot.
    incomplete: bool,
    stats: StreamStats,
}

impl<F: ChunkFactory> ChunkStreamer<F> {
    /// Validate `config` and build a streamer with an empty registry.
    pub fn new(config: StreamConfig, factory: F) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        let grid = ChunkGrid::new(config.extent()?);
        tracing::debug!(extent = ?grid.extent().size(), "chunk streamer configured");
        Ok(Self {
            config,
            grid,
            factory,
            registry: ChunkRegistry::new(),
            observer: ObserverState::default(),
            incomplete: false,
            stats: StreamStats::default(),
        })
    }

    /// Advance one frame with the observer at `position`.
    ///
    /// A non-finite position, or one whose chunk lies beyond
    /// [`COORD_LIMIT`](chunkwell_common::COORD_LIMIT), is ignored: the
    /// observer state and registry stay as they were and a skipped report
    /// for the last target is returned.
    pub fn tick(&mut self, position: Vec3) -> ReconciliationReport {
        self.stats.ticks += 1;
        let previous = self.observer.target;

        let Some(target) = self.grid.checked_coordinate_of(position) else {
            tracing::warn!(?position, "observer position cannot be mapped, tick ignored");
            self.stats.ticks_skipped += 1;
            self.stats.positions_rejected += 1;
            return ReconciliationReport::skipped(previous.unwrap_or_default());
        };
        self.observer.position = Some(position);

        if previous == Some(target) && !self.incomplete {
            self.stats.ticks_skipped += 1;
            return ReconciliationReport::skipped(target);
        }

        match previous {
            Some(from) if from != target => {
                tracing::debug!(%from, to = %target, "observer crossed chunk boundary");
            }
            Some(_) => tracing::debug!(%target, "retrying incomplete chunk window"),
            None => tracing::debug!(%target, "populating initial chunk window"),
        }

        let report = reconcile(
            &mut self.registry,
            &self.grid,
            &mut self.factory,
            target,
            self.config.debug.log_chunk_events,
        );
        self.observer.target = Some(target);
        self.incomplete = !report.is_complete();
        self.stats.record(&report);

        if self.incomplete {
            tracing::warn!(
                %target,
                missing = report.failures.len(),
                "chunk window incomplete, will retry next tick"
            );
        }
        report
    }

    /// Chunk the observer was in at the last tick.
    pub fn target(&self) -> Option<ChunkCoord> {
        self.observer.target
    }

    pub fn last_position(&self) -> Option<Vec3> {
        self.observer.position
    }

    pub fn observer(&self) -> ObserverState {
        self.observer
    }

    /// True when every coordinate of the window is resident.
    pub fn is_complete(&self) -> bool {
        self.observer.target.is_some() && !self.incomplete
    }

    pub fn registry(&self) -> &ChunkRegistry<F::Chunk> {
        &self.registry
    }

    pub fn grid(&self) -> &ChunkGrid {
        &self.grid
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Mutable access to the factory, e.g. to rebind a missing template.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Resident coordinates with their world centers, borrowed from the
    /// registry.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.registry.coords().map(|coord| Placement {
            coord,
            center: self.grid.chunk_center(coord),
        })
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            target: self.observer.target,
            chunk_extent: self.grid.extent().size(),
            instance_count: self.registry.instance_count(),
            chunks: self.placements().collect(),
        }
    }
}
