//! Shared types for the chunkwell workspace: grid coordinates, chunk extents,
//! instance identities.

mod types;

pub use types::{COORD_LIMIT, ChunkCoord, ChunkExtent, ExtentError, InstanceId};
