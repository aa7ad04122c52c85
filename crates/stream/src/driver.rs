use glam::Vec3;

use crate::config::{ConfigError, StreamConfig, validate_config};
use crate::factory::ChunkFactory;
use crate::reconcile::ReconciliationReport;
use crate::streamer::ChunkStreamer;

/// Supplies the observer's position once per tick.
pub trait ObserverSampler {
    fn sample(&mut self) -> Vec3;
}

impl<T: FnMut() -> Vec3> ObserverSampler for T {
    fn sample(&mut self) -> Vec3 {
        self()
    }
}

/// A [`ChunkStreamer`] bound to the observer it follows.
pub struct StreamDriver<F: ChunkFactory, O: ObserverSampler> {
    streamer: ChunkStreamer<F>,
    observer: O,
}

impl<F: ChunkFactory, O: ObserverSampler> StreamDriver<F, O> {
    pub fn builder(config: StreamConfig) -> StreamDriverBuilder<F, O> {
        StreamDriverBuilder {
            config,
            factory: None,
            observer: None,
        }
    }

    /// Sample the observer once and tick the streamer with that position.
    pub fn step(&mut self) -> ReconciliationReport {
        let position = self.observer.sample();
        self.streamer.tick(position)
    }

    pub fn streamer(&self) -> &ChunkStreamer<F> {
        &self.streamer
    }

    pub fn streamer_mut(&mut self) -> &mut ChunkStreamer<F> {
        &mut self.streamer
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_parts(self) -> (ChunkStreamer<F>, O) {
        (self.streamer, self.observer)
    }
}

/// Collects the bindings a [`StreamDriver`] needs and checks them at build.
pub struct StreamDriverBuilder<F, O> {
    config: StreamConfig,
    factory: Option<F>,
    observer: Option<O>,
}

impl<F: ChunkFactory, O: ObserverSampler> StreamDriverBuilder<F, O> {
    pub fn factory(mut self, factory: F) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn observer(mut self, observer: O) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Validate the configuration and bindings. Fails before any chunk is
    /// produced.
    pub fn build(self) -> Result<StreamDriver<F, O>, ConfigError> {
        validate_config(&self.config)?;
        let factory = self.factory.ok_or(ConfigError::MissingFactory)?;
        let observer = self.observer.ok_or(ConfigError::MissingObserver)?;
        Ok(StreamDriver {
            streamer: ChunkStreamer::new(self.config, factory)?,
            observer,
        })
    }
}
