use std::path::PathBuf;

use anyhow::Context;
use chunkwell_stream::{ObserverSampler, StreamConfig, StreamDriver, TemplateFactory};
use chunkwell_tools::{BorderOverlay, PassTimer, StreamInspector};
use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chunkwell-cli", about = "CLI tool for chunkwell streaming")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default configuration as YAML
    DefaultConfig,
    /// Load and validate a YAML or JSON configuration file
    Validate {
        /// Path to a .yaml, .yml or .json file
        path: PathBuf,
    },
    /// Walk an observer in a straight line and stream chunks around it
    Walk {
        /// Start position as x,y,z
        #[arg(long, default_value = "0,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
        from: Vec3,
        /// End position as x,y,z
        #[arg(long, default_value = "20,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
        to: Vec3,
        /// Number of ticks taken to get from start to end
        #[arg(short, long, default_value = "40")]
        steps: u32,
        /// Configuration file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Chunk template name handed to the factory
        #[arg(long, default_value = "seabed")]
        template: String,
        /// Keep the template unbound for the first N ticks
        #[arg(long, default_value = "0")]
        missing_template_ticks: u32,
        /// Print the final registry snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Observer moving from `from` to `to` in `steps` equal increments, then
/// standing still.
struct LinearPath {
    from: Vec3,
    to: Vec3,
    steps: u32,
    tick: u32,
}

impl ObserverSampler for LinearPath {
    fn sample(&mut self) -> Vec3 {
        let t = if self.steps == 0 {
            1.0
        } else {
            (self.tick.min(self.steps) as f32) / self.steps as f32
        };
        self.tick = self.tick.saturating_add(1);
        self.from.lerp(self.to, t)
    }
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got `{s}`"));
    }
    let mut v = [0.0f32; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid component `{part}`: {e}"))?;
    }
    Ok(Vec3::from_array(v))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("chunkwell-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("stream: {}", chunkwell_stream::crate_info());
            println!("tools: {}", chunkwell_tools::crate_info());
            println!(
                "window: radius {} ({} chunks)",
                chunkwell_stream::RESIDENT_RADIUS,
                chunkwell_stream::neighborhood_len(chunkwell_stream::RESIDENT_RADIUS)
            );
        }
        Commands::DefaultConfig => {
            print!("{}", StreamConfig::default().to_yaml_string()?);
        }
        Commands::Validate { path } => {
            let config = StreamConfig::load(&path)
                .with_context(|| format!("invalid config {}", path.display()))?;
            println!("{}: OK", path.display());
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Walk {
            from,
            to,
            steps,
            config,
            template,
            missing_template_ticks,
            json,
        } => {
            let config = match config {
                Some(path) => StreamConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => StreamConfig::default(),
            };

            let factory = if missing_template_ticks > 0 {
                TemplateFactory::unbound()
            } else {
                TemplateFactory::new(template.clone())
            };
            let mut driver = StreamDriver::builder(config)
                .factory(factory)
                .observer(LinearPath {
                    from,
                    to,
                    steps,
                    tick: 0,
                })
                .build()?;

            tracing::info!(?from, ?to, steps, "walking observer");
            let mut timer = PassTimer::new(64);

            for tick in 0..=steps {
                if tick == missing_template_ticks && missing_template_ticks > 0 {
                    tracing::info!(%template, tick, "binding chunk template");
                    driver
                        .streamer_mut()
                        .factory_mut()
                        .bind_template(template.clone());
                }

                let report = driver.step();
                if !report.reconciled {
                    continue;
                }
                timer.record(report.elapsed);
                if !json {
                    println!(
                        "tick {tick:>4}: chunk={} retained={} moved={} created={} failed={}",
                        report.target,
                        report.retained,
                        report.repositioned() + report.unparked,
                        report.created.len(),
                        report.failures.len()
                    );
                }
            }

            let streamer = driver.streamer();
            if json {
                println!("{}", serde_json::to_string_pretty(&streamer.snapshot())?);
            } else {
                let overlay = BorderOverlay::build(streamer);
                println!("{}", StreamInspector::summary(streamer));
                println!(
                    "overlay: resident={} lookahead={}",
                    overlay.resident().count(),
                    overlay.lookahead().count()
                );
                println!(
                    "passes: count={} avg={:?} min={:?} max={:?}",
                    timer.count(),
                    timer.average(),
                    timer.min(),
                    timer.max()
                );
                println!(
                    "instances: created={} produced_by_factory={}",
                    streamer.stats().instances_created,
                    streamer.factory().produced()
                );
            }
        }
    }

    Ok(())
}
