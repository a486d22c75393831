use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tetraview_input::{Action, KeyEvent, map_key_event};
use tetraview_kernel::{Scene, SceneConfig, VertexAnimator};
use tetraview_render::{CommandRecorder, Projection, submit_frame};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tetraview-cli", about = "Run the tetraview scene without a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct SceneArgs {
    /// Mesh spin in radians per frame
    #[arg(long, default_value_t = VertexAnimator::DEFAULT_ANGLE)]
    spin: f64,

    /// Camera step per key press (units, and radians when turning)
    #[arg(long, default_value_t = 0.1)]
    camera_speed: f32,

    /// Keep the camera direction at unit length after each turn
    #[arg(long)]
    renormalize: bool,
}

impl From<SceneArgs> for SceneConfig {
    fn from(args: SceneArgs) -> Self {
        Self {
            camera_speed: args.camera_speed,
            spin_per_frame: args.spin,
            renormalize: args.renormalize,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and default scene settings
    Info,
    /// Apply key presses, step frames, and print the last frame
    Simulate {
        /// Number of frames to step and submit
        #[arg(short, long, default_value = "1")]
        frames: u64,
        /// Comma-separated key presses, e.g. `left,shift+up`
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<KeyEvent>,
        /// Print the final scene as JSON instead of the frame log
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Run a session, replay its event log, and compare the results
    Replay {
        #[arg(short, long, default_value = "100")]
        frames: u64,
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<KeyEvent>,
        #[command(flatten)]
        scene: SceneArgs,
    },
}

/// Apply `keys` in order, then step and submit `frames` frames. The recorder
/// holds only the last frame's commands.
fn simulate(
    config: SceneConfig,
    keys: &[KeyEvent],
    frames: u64,
) -> anyhow::Result<(Scene, CommandRecorder)> {
    let mut scene = Scene::new(config);
    for event in keys {
        if let Action::Camera { key, modifier } = map_key_event(event) {
            scene.handle_key(key, modifier);
        }
    }

    let projection = Projection::default();
    let mut recorder = CommandRecorder::new();
    for _ in 0..frames {
        scene.step();
        recorder.clear();
        submit_frame(&mut recorder, &scene, &projection)
            .with_context(|| format!("frame {} rejected", scene.frame()))?;
    }
    Ok((scene, recorder))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tetraview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", tetraview_render::crate_info());
            println!(
                "default scene: {}",
                serde_json::to_string_pretty(&SceneConfig::default())?
            );
            println!("projection: {:?}", Projection::default());
        }
        Commands::Simulate {
            frames,
            keys,
            json,
            scene,
        } => {
            let (scene, recorder) = simulate(scene.into(), &keys, frames)?;
            tracing::info!(frames = scene.frame(), keys = keys.len(), "simulation done");
            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                let camera = scene.camera();
                println!("frame: {}", scene.frame());
                println!("camera position: {}", camera.position);
                println!("camera front:    {} (|{:.4}|)", camera.front, camera.front.length());
                println!("camera up:       {}", camera.up);
                print!("{}", recorder.to_text());
            }
        }
        Commands::Replay {
            frames,
            keys,
            scene,
        } => {
            let config = SceneConfig::from(scene);
            let (original, _) = simulate(config, &keys, frames)?;
            let replayed = Scene::replay(config, original.events());

            println!(
                "Run:    frame={}, events={}, hash={:#018x}",
                original.frame(),
                original.events().len(),
                original.state_hash()
            );
            println!(
                "Replay: frame={}, events={}, hash={:#018x}",
                replayed.frame(),
                replayed.events().len(),
                replayed.state_hash()
            );
            if original.state_hash() == replayed.state_hash() {
                println!("Match: OK");
            } else {
                anyhow::bail!("replay diverged from the original run");
            }
        }
    }

    Ok(())
}
