//! Streaming: keeps a fixed window of chunks resident around one observer.
//!
//! # Invariants
//! - After every completed pass the resident coordinates are exactly the
//!   3x3x3 neighborhood of the observer's chunk.
//! - Instances are never destroyed; chunks leaving the window are moved to
//!   coordinates entering it before the factory is asked for new ones.
//! - A tick whose chunk did not change does no work.
//!
//! # Flow
//! Each tick maps the observer position to a [`ChunkCoord`]. When it differs
//! from the previous one, [`reconcile`] diffs the registry against the
//! required window and repositions, reuses or creates instances.

mod config;
mod driver;
mod factory;
mod grid;
mod neighborhood;
mod reconcile;
mod registry;
mod streamer;

pub use chunkwell_common::{COORD_LIMIT, ChunkCoord, ChunkExtent};
pub use config::{
    ConfigError, DebugConfig, MAX_LOOKAHEAD_RADIUS, StreamConfig, validate_config,
};
pub use driver::{ObserverSampler, StreamDriver, StreamDriverBuilder};
pub use factory::{
    ChunkFactory, ChunkInstance, PlacedChunk, ProductionError, TemplateFactory, chunk_name,
};
pub use grid::{ChunkGrid, checked_coordinate_of, chunk_center, coordinate_of};
pub use neighborhood::{RESIDENT_RADIUS, neighborhood, neighborhood_len, resident_set};
pub use reconcile::{ChunkMove, ProductionFailure, ReconciliationReport, reconcile};
pub use registry::ChunkRegistry;
pub use streamer::{ChunkStreamer, ObserverState, Placement, RegistrySnapshot, StreamStats};

pub fn crate_info() -> &'static str {
    "chunkwell-stream v0.1.0"
}
