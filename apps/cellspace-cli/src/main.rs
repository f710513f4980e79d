use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use cellspace_common::{GridConfig, PickRay, VoxelCoord};
use cellspace_infer::DecayBackend;
use cellspace_input::{Action, DamageParams, apply_action};
use cellspace_kernel::Automaton;
use cellspace_pick::{GridFrame, LayerAxis, LayerCursor, resolve_layer_march};
use cellspace_render::{DebugTextRenderer, RenderView, Renderer, alive_mask};
use cellspace_tools::GridInspector;

#[derive(Parser)]
#[command(name = "cellspace-cli", about = "CLI frontend for the cellspace automaton")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and the effective configuration
    Info {
        /// Optional YAML run configuration
        #[arg(long)]
        config: Option<String>,
    },
    /// Run the automaton against the decay stub backend
    Run {
        /// Number of loop ticks (steps happen every frame_skip-th tick)
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Optional YAML run configuration
        #[arg(long)]
        config: Option<String>,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Demonstrate the damage operators against a grown structure
    Damage {
        /// Which erase semantics to apply
        #[arg(long, value_enum, default_value_t = DamageVariant::Sphere)]
        variant: DamageVariant,
        /// Damage radius
        #[arg(short, long, default_value = "2.0")]
        radius: f32,
    },
    /// Seed a 2x2x2 latent block and show the affected slice
    #[command(allow_negative_numbers = true)]
    Grow {
        x: i32,
        y: i32,
        z: i32,
    },
    /// Resolve a sample pick ray against an active layer, then grow there
    Pick {
        /// Active layer index along z
        #[arg(short, long, default_value = "8")]
        layer: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DamageVariant {
    /// Full erase of every channel (canonical interactive erase)
    Sphere,
    /// Visible channels only; latent state survives
    Ray,
}

/// Tunables for a CLI run, loadable from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RunConfig {
    grid: GridConfig,
    frame_skip: u64,
    voxel_size: f32,
    decay: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            frame_skip: 5,
            voxel_size: 0.08,
            decay: 0.98,
        }
    }
}

impl RunConfig {
    fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run config {path}"))?;
        let config: Self =
            serde_yaml::from_str(&text).with_context(|| format!("parsing run config {path}"))?;
        // re-validate dimensions that came in through serde
        GridConfig::new(config.grid.size, config.grid.channels)
            .context("invalid grid dimensions in run config")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { config } => {
            let run = RunConfig::load(config.as_deref())?;
            println!("cellspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "grid: {0}x{0}x{0}, {1} channels",
                run.grid.size, run.grid.channels
            );
            println!("frame_skip: {}", run.frame_skip);
            println!("voxel_size: {}", run.voxel_size);
            println!("decay stub factor: {}", run.decay);
            let engine = Automaton::new(run.grid);
            println!("{}", GridInspector::summary(&engine));
        }
        Commands::Run {
            ticks,
            config,
            json,
        } => {
            let run = RunConfig::load(config.as_deref())?;
            let mut engine = Automaton::new(run.grid);
            engine.set_frame_skip(run.frame_skip);
            engine.attach_backend(Box::new(DecayBackend::new(run.decay)));

            let mut cursor = LayerCursor::new(run.grid);
            apply_action(&mut engine, &mut cursor, &Action::TogglePlay);

            // widen the seed so the decay has something to chew on
            let center = run.grid.center();
            engine.grow(center);

            for _ in 0..ticks {
                if engine.tick() {
                    tracing::debug!(step = engine.steps(), "stepped");
                }
            }

            let summary = GridInspector::summary(&engine);
            if json {
                println!("{}", summary.to_json()?);
            } else {
                println!("{summary}");
                let masked = alive_mask(engine.grid());
                let renderer = DebugTextRenderer::new(cursor.layer());
                print!("{}", renderer.render(&masked, &RenderView::default()));
            }
        }
        Commands::Damage { variant, radius } => {
            let cfg = GridConfig::default();
            let mut engine = Automaton::new(cfg);
            // build a small structure around the seed first
            let center = cfg.center();
            engine.grow(center);
            engine.grow(VoxelCoord::new(center.x - 2, center.y, center.z));
            let before = GridInspector::summary(&engine).alive_voxels;

            let mut cursor = LayerCursor::new(cfg);
            let action = match variant {
                DamageVariant::Sphere => Action::Damage(DamageParams::Sphere {
                    center,
                    radius,
                }),
                DamageVariant::Ray => Action::Damage(DamageParams::Ray {
                    origin: Vec3::new(0.0, center.y as f32, center.z as f32),
                    dir: Vec3::X,
                }),
            };
            apply_action(&mut engine, &mut cursor, &action);

            let after = GridInspector::summary(&engine).alive_voxels;
            println!("alive voxels: {before} -> {after}");
            let renderer = DebugTextRenderer::new(center.z as usize);
            print!(
                "{}",
                renderer.render(engine.grid(), &RenderView::default())
            );
        }
        Commands::Grow { x, y, z } => {
            let cfg = GridConfig::default();
            let mut engine = Automaton::new(cfg);
            let mut cursor = LayerCursor::new(cfg);
            apply_action(
                &mut engine,
                &mut cursor,
                &Action::Grow(VoxelCoord::new(x, y, z)),
            );
            let clamped = VoxelCoord::new(x, y, z).clamped(cfg.size);
            println!("grew 2x2x2 block at {clamped}");
            let renderer = DebugTextRenderer::new(clamped.z as usize);
            print!(
                "{}",
                renderer.render(engine.grid(), &RenderView::default())
            );
        }
        Commands::Pick { layer } => {
            let cfg = GridConfig::default();
            let mut engine = Automaton::new(cfg);
            let mut cursor = LayerCursor::new(cfg);
            apply_action(&mut engine, &mut cursor, &Action::SetActiveLayer(layer));

            let frame = GridFrame::default();
            // a ray from in front of the cube straight through its middle
            let ray = PickRay::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
            match resolve_layer_march(&frame, ray, LayerAxis::Z, cursor.layer()) {
                Some(coord) => {
                    println!("ray hit voxel {coord} on layer {}", cursor.layer());
                    apply_action(&mut engine, &mut cursor, &Action::Grow(coord));
                    println!("{}", GridInspector::summary(&engine));
                }
                None => {
                    // a miss is not an error: nothing to mutate
                    println!("ray missed layer {}", cursor.layer());
                }
            }
        }
    }

    Ok(())
}
