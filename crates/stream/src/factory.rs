use chunkwell_common::{ChunkCoord, InstanceId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A chunk of externally-owned content that occupies one grid cell.
///
/// The streamer never destroys instances. When a coordinate drops out of the
/// window its instance is rebound to a coordinate that just entered it.
pub trait ChunkInstance {
    /// Coordinate this instance currently represents.
    fn coord(&self) -> ChunkCoord;

    /// Move the instance to `coord`, placing it at world point `center`.
    fn rebind(&mut self, coord: ChunkCoord, center: Vec3);

    /// Correct the tag of a freshly produced instance that a factory placed
    /// at the wrong coordinate. Unlike [`rebind`](Self::rebind) this is not a
    /// move; implementations that count moves should not count it.
    fn retag(&mut self, coord: ChunkCoord, center: Vec3) {
        self.rebind(coord, center);
    }
}

/// Produces new chunk instances on demand.
///
/// Owned by the host application and invoked by the reconciler whenever the
/// window needs a coordinate filled and there is no instance left to reuse.
pub trait ChunkFactory {
    type Chunk: ChunkInstance;

    /// Produce an instance usable at `coord`, positioned at `center`.
    fn produce(&mut self, coord: ChunkCoord, center: Vec3)
    -> Result<Self::Chunk, ProductionError>;
}

/// Reasons a factory could not produce an instance.
///
/// These are transient from the streamer's point of view: the slot stays
/// absent and is retried on the next tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductionError {
    #[error("no chunk template is bound to the factory")]
    NoTemplate,
    #[error("chunk template `{0}` is unavailable")]
    TemplateUnavailable(String),
    #[error("factory refused chunk {coord}: {reason}")]
    Rejected { coord: ChunkCoord, reason: String },
}

/// Display name used for a chunk at `coord`, e.g. `Chunk(1,0,-2)`.
pub fn chunk_name(coord: ChunkCoord) -> String {
    format!("Chunk({},{},{})", coord.x, coord.y, coord.z)
}

/// Chunk instance produced by [`TemplateFactory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedChunk {
    pub id: InstanceId,
    pub coord: ChunkCoord,
    pub center: Vec3,
    pub name: String,
    pub template: String,
    /// Number of times this instance has been moved to another coordinate.
    pub moves: u32,
}

impl ChunkInstance for PlacedChunk {
    fn coord(&self) -> ChunkCoord {
        self.coord
    }

    fn rebind(&mut self, coord: ChunkCoord, center: Vec3) {
        self.coord = coord;
        self.center = center;
        self.name = chunk_name(coord);
        self.moves += 1;
    }

    fn retag(&mut self, coord: ChunkCoord, center: Vec3) {
        self.coord = coord;
        self.center = center;
        self.name = chunk_name(coord);
    }
}

/// Factory that stamps out [`PlacedChunk`]s from a named template.
///
/// Without a bound template every request fails with
/// [`ProductionError::NoTemplate`].
#[derive(Debug, Clone, Default)]
pub struct TemplateFactory {
    template: Option<String>,
    produced: usize,
}

impl TemplateFactory {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            produced: 0,
        }
    }

    /// A factory with no template bound.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn bind_template(&mut self, template: impl Into<String>) {
        self.template = Some(template.into());
    }

    pub fn unbind_template(&mut self) {
        self.template = None;
    }

    /// Number of instances produced so far.
    pub fn produced(&self) -> usize {
        self.produced
    }
}

impl ChunkFactory for TemplateFactory {
    type Chunk = PlacedChunk;

    fn produce(&mut self, coord: ChunkCoord, center: Vec3) -> Result<PlacedChunk, ProductionError> {
        let template = self.template.clone().ok_or(ProductionError::NoTemplate)?;
        self.produced += 1;
        Ok(PlacedChunk {
            id: InstanceId::new(),
            coord,
            center,
            name: chunk_name(coord),
            template,
            moves: 0,
        })
    }
}
