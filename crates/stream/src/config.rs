use std::path::{Path, PathBuf};

use chunkwell_common::{ChunkExtent, ExtentError};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Largest lookahead ring the debug overlay will draw.
pub const MAX_LOOKAHEAD_RADIUS: u32 = 5;

/// Streaming configuration: chunk extent plus debug overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Side lengths of one chunk cell. Every component must be positive.
    pub chunk_extent: Vec3,
    pub debug: DebugConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_extent: Vec3::splat(5.0),
            debug: DebugConfig::default(),
        }
    }
}

/// Settings consumed only by logging and the debug overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Emit a debug event for every chunk created, moved or parked.
    pub log_chunk_events: bool,
    /// Draw resident and lookahead chunk borders.
    pub visualize_borders: bool,
    /// Radius (in cells) of the lookahead ring drawn around the observer.
    pub lookahead_radius: u32,
    /// Alpha applied to border colors, in `[0, 1]`.
    pub border_opacity: f32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_chunk_events: false,
            visualize_borders: true,
            lookahead_radius: 1,
            border_opacity: 0.5,
        }
    }
}

/// Errors that prevent a streamer from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid chunk extent: {0}")]
    Extent(#[from] ExtentError),
    #[error("lookahead radius {radius} exceeds maximum of {max}")]
    LookaheadOutOfRange { radius: u32, max: u32 },
    #[error("border opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f32),
    #[error("no chunk factory bound")]
    MissingFactory,
    #[error("no observer bound")]
    MissingObserver,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {}", .0.display())]
    UnknownFormat(PathBuf),
}

/// Check a configuration before a streamer is built from it.
///
/// Hosts that edit the configuration at runtime call this on every change;
/// a new extent means building a new streamer.
pub fn validate_config(config: &StreamConfig) -> Result<(), ConfigError> {
    ChunkExtent::new(config.chunk_extent)?;
    if config.debug.lookahead_radius > MAX_LOOKAHEAD_RADIUS {
        return Err(ConfigError::LookaheadOutOfRange {
            radius: config.debug.lookahead_radius,
            max: MAX_LOOKAHEAD_RADIUS,
        });
    }
    let opacity = config.debug.border_opacity;
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ConfigError::OpacityOutOfRange(opacity));
    }
    Ok(())
}

impl StreamConfig {
    /// Validated chunk extent.
    pub fn extent(&self) -> Result<ChunkExtent, ConfigError> {
        Ok(ChunkExtent::new(self.chunk_extent)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file. The format is picked from the
    /// extension: `.yaml`/`.yml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ConfigError::UnknownFormat(path.to_path_buf())),
        }
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
