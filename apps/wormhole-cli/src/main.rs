use clap::{Parser, Subcommand};
use glam::{Quat, Vec3};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wormhole_common::CameraPose;
use wormhole_kernel::{AppConfig, CameraControls, SimEvent, Simulation};
use wormhole_render::{DebugTextRenderer, FrameUniforms, Renderer, ResolutionScale, Viewport};

#[derive(Parser)]
#[command(name = "wormhole-cli", about = "Headless tool for the wormhole scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene summary
    Info,
    /// Fly the camera into the wormhole and report what happens
    Fly {
        /// Simulated seconds
        #[arg(short, long, default_value = "20")]
        seconds: f32,
        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Flight speed in units per second
        #[arg(long, default_value = "2")]
        speed: f32,
    },
    /// Print the shader uniforms for the start pose as JSON
    Uniforms {
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
    },
    /// Print the effective configuration as YAML
    Config,
}

/// Steers straight at a target until the first wormhole crossing, then
/// keeps flying along whatever heading the crossing left it with.
struct Autopilot {
    target: Vec3,
    speed: f32,
    aiming: bool,
}

impl Autopilot {
    fn new(target: Vec3, speed: f32) -> Self {
        Self {
            target,
            speed,
            aiming: true,
        }
    }
}

impl CameraControls for Autopilot {
    fn update(&mut self, pose: &mut CameraPose, dt: f32) {
        if self.aiming {
            let to_target = (self.target - pose.position).normalize_or_zero();
            if to_target != Vec3::ZERO {
                pose.orientation = Quat::from_rotation_arc(Vec3::NEG_Z, to_target);
            }
        }
        pose.translate_local(Vec3::NEG_Z * self.speed * dt);
    }

    fn on_teleport(&mut self, _rotation: Quat) {
        self.aiming = false;
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Run the autopilot for `frames` steps and return the simulation.
fn fly(config: &AppConfig, frames: u32, dt: f32, speed: f32) -> Simulation {
    let mut sim = Simulation::new(config.scene.clone());
    let mut pilot = Autopilot::new(config.scene.wormhole.center, speed);
    for _ in 0..frames {
        let mut controls: [&mut dyn CameraControls; 1] = [&mut pilot];
        sim.advance(dt, &mut controls);
    }
    sim
}

fn viewport(config: &AppConfig, width: u32, height: u32) -> Viewport {
    let scale = ResolutionScale::new(config.display.resolution_scale).unwrap_or_default();
    Viewport::new(width, height, scale)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            let scene = &config.scene;
            println!("wormhole-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "wormhole: center={} radius={}",
                scene.wormhole.center, scene.wormhole.radius
            );
            println!(
                "start: galaxy={:?} camera={}",
                scene.start_galaxy, scene.camera_start.position
            );
            println!(
                "gravity: wormhole={} blackhole={} light_speed={}",
                scene.gravity_wormhole, scene.gravity_blackhole, scene.light_speed
            );
            println!("resolution: 1/{}", config.display.resolution_scale);
        }
        Commands::Fly {
            seconds,
            fps,
            speed,
        } => {
            anyhow::ensure!(fps > 0, "fps must be positive");
            let frames = (seconds.max(0.0) * fps as f32).round() as u32;
            println!("Flying {frames} frames at {speed} units/s toward the wormhole");

            let mut sim = fly(&config, frames, 1.0 / fps as f32, speed);
            tracing::info!(
                frames = sim.frame(),
                crossings = sim.crossing_count(),
                "flight finished"
            );
            for event in sim.drain_events() {
                if let SimEvent::WormholeCrossed {
                    frame,
                    entry,
                    exit,
                    galaxy,
                } = event
                {
                    println!(
                        "frame {frame}: crossed at {entry}, exited at {exit}, now in {galaxy:?}"
                    );
                }
            }

            let mut renderer = DebugTextRenderer::new();
            print!("{}", renderer.render(&sim, &viewport(&config, 1280, 720)));
        }
        Commands::Uniforms { width, height } => {
            let sim = Simulation::new(config.scene.clone());
            let uniforms = FrameUniforms::for_frame(&sim, &viewport(&config, width, height));
            println!("{}", serde_json::to_string_pretty(&uniforms)?);
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
