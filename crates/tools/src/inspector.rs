use chunkwell_common::ChunkCoord;
use chunkwell_stream::{ChunkFactory, ChunkStreamer};
use glam::Vec3;

/// Stream inspector for developer tooling.
///
/// Provides read-only queries against a streamer for debugging, profiling,
/// and development UI.
pub struct StreamInspector;

impl StreamInspector {
    /// Produce a summary of the streamer state.
    pub fn summary<F: ChunkFactory>(streamer: &ChunkStreamer<F>) -> StreamSummary {
        let stats = streamer.stats();
        StreamSummary {
            position: streamer.last_position(),
            target: streamer.target(),
            resident: streamer.registry().len(),
            instances: streamer.registry().instance_count(),
            complete: streamer.is_complete(),
            passes: stats.passes,
            ticks_skipped: stats.ticks_skipped,
            production_failures: stats.production_failures,
        }
    }

    /// Where a resident chunk sits in the world.
    pub fn inspect_chunk<F: ChunkFactory>(
        streamer: &ChunkStreamer<F>,
        coord: ChunkCoord,
    ) -> Option<ChunkInfo> {
        if !streamer.registry().contains(coord) {
            return None;
        }
        let (min, max) = streamer.grid().chunk_bounds(coord);
        Some(ChunkInfo {
            coord,
            center: streamer.grid().chunk_center(coord),
            min,
            max,
        })
    }

    /// List all resident coordinates.
    pub fn list_resident<F: ChunkFactory>(streamer: &ChunkStreamer<F>) -> Vec<ChunkCoord> {
        streamer.registry().coords().collect()
    }
}

/// Summary of streamer state for the inspector.
#[derive(Debug, Clone)]
pub struct StreamSummary {
    pub position: Option<Vec3>,
    pub target: Option<ChunkCoord>,
    pub resident: usize,
    pub instances: usize,
    pub complete: bool,
    pub passes: u64,
    pub ticks_skipped: u64,
    pub production_failures: usize,
}

impl std::fmt::Display for StreamSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(p) => write!(f, "pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?,
            None => write!(f, "pos=none")?,
        }
        match self.target {
            Some(c) => write!(f, " chunk={c}")?,
            None => write!(f, " chunk=none")?,
        }
        write!(
            f,
            " resident={} instances={} complete={} passes={} skipped={} failures={}",
            self.resident,
            self.instances,
            self.complete,
            self.passes,
            self.ticks_skipped,
            self.production_failures
        )
    }
}

/// Detailed info about a single resident chunk.
#[derive(Debug, Clone)]
pub struct ChunkInfo {
    pub coord: ChunkCoord,
    pub center: Vec3,
    pub min: Vec3,
    pub max: Vec3,
}

impl std::fmt::Display for ChunkInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {} center=({:.2}, {:.2}, {:.2}) min=({:.2}, {:.2}, {:.2}) max=({:.2}, {:.2}, {:.2})",
            self.coord,
            self.center.x,
            self.center.y,
            self.center.z,
            self.min.x,
            self.min.y,
            self.min.z,
            self.max.x,
            self.max.y,
            self.max.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwell_stream::{StreamConfig, TemplateFactory};

    fn streamer() -> ChunkStreamer<TemplateFactory> {
        ChunkStreamer::new(StreamConfig::default(), TemplateFactory::new("t")).unwrap()
    }

    #[test]
    fn summary_before_first_tick() {
        let s = streamer();
        let summary = StreamInspector::summary(&s);
        assert_eq!(summary.resident, 0);
        assert!(!summary.complete);
        assert_eq!(format!("{summary}"), "pos=none chunk=none resident=0 instances=0 complete=false passes=0 skipped=0 failures=0");
    }

    #[test]
    fn summary_after_ticks() {
        let mut s = streamer();
        s.tick(Vec3::ZERO);
        s.tick(Vec3::new(5.1, 0.0, 0.0));
        s.tick(Vec3::new(6.0, 0.0, 0.0));

        let summary = StreamInspector::summary(&s);
        assert_eq!(summary.target, Some(ChunkCoord::new(1, 0, 0)));
        assert_eq!(summary.resident, 27);
        assert_eq!(summary.instances, 27);
        assert_eq!(summary.passes, 2);
        assert_eq!(summary.ticks_skipped, 1);
        let text = summary.to_string();
        assert!(text.contains("pos=(6.00, 0.00, 0.00)"));
        assert!(text.contains("chunk=(1, 0, 0)"));
    }

    #[test]
    fn inspect_chunk_found() {
        let mut s = streamer();
        s.tick(Vec3::ZERO);
        let info = StreamInspector::inspect_chunk(&s, ChunkCoord::new(1, -1, 0)).unwrap();
        assert_eq!(info.center, Vec3::new(7.5, -2.5, 2.5));
        assert_eq!(info.min, Vec3::new(5.0, -5.0, 0.0));
        assert_eq!(info.max, Vec3::new(10.0, 0.0, 5.0));
        assert!(info.to_string().starts_with("Chunk (1, -1, 0)"));
    }

    #[test]
    fn inspect_chunk_not_found() {
        let mut s = streamer();
        s.tick(Vec3::ZERO);
        assert!(StreamInspector::inspect_chunk(&s, ChunkCoord::new(2, 0, 0)).is_none());
    }

    #[test]
    fn list_resident() {
        let mut s = streamer();
        s.tick(Vec3::ZERO);
        let coords = StreamInspector::list_resident(&s);
        assert_eq!(coords.len(), 27);
        assert!(coords.contains(&ChunkCoord::ORIGIN));
    }
}
