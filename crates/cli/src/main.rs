#![deny(unsafe_code)]
//! CLI binary for citrus-sketch.
//!
//! Subcommands:
//! - `render` — run a citrus scene N frames, write a PNG of the last frame
//! - `trace` — print the last frame's state and draw commands (one per line, or JSON)
//! - `schema` — print the citrus parameter schema

mod error;

use std::path::PathBuf;
use std::process;

use std::fmt::Write as _;

use citrus_core::{Argb, CommandRecorder, DrawCommand, Scene, Sprite, Surface};
use citrus_fruit::{Citrus, CitrusState};
use citrus_render::Raster;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "citrus", about = "Procedural citrus sketch CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a citrus scene and write the final frame as a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output file path.
        #[arg(short, long, default_value = "citrus.png")]
        output: PathBuf,
    },
    /// Run a citrus scene and print the final frame's draw commands.
    Trace {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Print the citrus parameter schema.
    Schema,
}

/// Scene options shared by `render` and `trace`. Flags override values
/// loaded from `--scene`.
#[derive(Args, Default)]
struct SceneArgs {
    /// Scene JSON file to start from.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of physics frames to run before drawing.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Background color (#rrggbb or #aarrggbb).
    #[arg(long)]
    background: Option<String>,

    /// Citrus parameters as a JSON object, merged over the scene's params.
    #[arg(long)]
    params: Option<String>,

    /// Horizontal component of an impact applied before the first frame.
    #[arg(long, allow_hyphen_values = true)]
    impulse_x: Option<f32>,

    /// Vertical component of an impact applied before the first frame.
    #[arg(long, allow_hyphen_values = true)]
    impulse_y: Option<f32>,
}

const DEFAULT_SIZE: usize = 256;

impl SceneArgs {
    /// Loads the base scene (file or default) and applies flag overrides.
    fn resolve(&self) -> Result<Scene, CliError> {
        let mut scene = match &self.scene {
            Some(path) => Scene::from_json_file(path)?,
            None => Scene::new(DEFAULT_SIZE, DEFAULT_SIZE),
        };

        if let Some(w) = self.width {
            scene.width = w;
        }
        if let Some(h) = self.height {
            scene.height = h;
        }
        if let Some(f) = self.frames {
            scene.frames = f;
        }
        if let Some(bg) = &self.background {
            scene.background = Argb::from_hex(bg)?;
        }
        if let Some(raw) = &self.params {
            let overrides: serde_json::Value = serde_json::from_str(raw)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let serde_json::Value::Object(overrides) = overrides else {
                return Err(CliError::Input("--params must be a JSON object".into()));
            };
            if let serde_json::Value::Object(base) = &mut scene.params {
                base.extend(overrides);
            }
        }
        if self.impulse_x.is_some() || self.impulse_y.is_some() {
            let base = scene.impulse.unwrap_or(Vec2::ZERO);
            scene.impulse = Some(Vec2::new(
                self.impulse_x.unwrap_or(base.x),
                self.impulse_y.unwrap_or(base.y),
            ));
        }

        scene.validate()?;
        Ok(scene)
    }
}

/// Plain-text trace: a state header, then one draw command per line.
fn trace_text(state: &CitrusState, commands: &[DrawCommand]) -> String {
    let mut out = format!(
        "position ({:.2}, {:.2})  velocity ({:.2}, {:.2})  rotation {:.2}°  spin {:.4}/{:.4} rad\n",
        state.position.x,
        state.position.y,
        state.velocity.x,
        state.velocity.y,
        state.rotation,
        state.spin,
        state.total_spin,
    );
    for cmd in commands {
        let _ = writeln!(out, "{cmd}");
    }
    out
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = citrus_fruit::param_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Trace { scene } => {
            let scene = scene.resolve()?;
            let citrus = Citrus::from_scene(&scene)?;
            let mut recorder = CommandRecorder::new();
            citrus.draw_current(&mut recorder);

            if cli.json {
                let info = serde_json::json!({
                    "state": citrus.state(),
                    "commands": recorder.commands(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print!("{}", trace_text(&citrus.state(), recorder.commands()));
            }
        }
        Command::Render { scene, output } => {
            let scene = scene.resolve()?;
            let citrus = Citrus::from_scene(&scene)?;
            info!(frames = scene.frames, "simulated citrus");

            let mut raster = Raster::new(scene.width, scene.height, scene.background)?;
            raster.smooth();
            citrus.draw_current(&mut raster);
            citrus_render::snapshot::write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "frames": scene.frames,
                    "params": citrus.params(),
                    "state": citrus.state(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let state = citrus.state();
                eprintln!(
                    "rendered citrus ({}x{}, {} frames, at {:.1},{:.1}) -> {}",
                    scene.width,
                    scene.height,
                    scene.frames,
                    state.position.x,
                    state.position.y,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_defaults_to_square_canvas() {
        let scene = SceneArgs::default().resolve().unwrap();
        assert_eq!(scene.width, DEFAULT_SIZE);
        assert_eq!(scene.height, DEFAULT_SIZE);
        assert!(scene.impulse.is_none());
    }

    #[test]
    fn resolve_applies_flag_overrides() {
        let args = SceneArgs {
            width: Some(320),
            height: Some(200),
            frames: Some(12),
            background: Some("#102030".into()),
            params: Some(r#"{"radius": 40, "vesicle_count": 10}"#.into()),
            impulse_x: Some(-5.0),
            ..SceneArgs::default()
        };
        let scene = args.resolve().unwrap();
        assert_eq!((scene.width, scene.height, scene.frames), (320, 200, 12));
        assert_eq!(scene.background, Argb(0xFF10_2030));
        assert_eq!(scene.params["vesicle_count"], 10);
        assert_eq!(scene.impulse, Some(Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn resolve_merges_params_over_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(
            &path,
            r##"{"width": 64, "height": 64, "params": {"radius": 20, "base_color": "#ffd800"}, "impulse": [3.0, 4.0]}"##,
        )
        .unwrap();
        let args = SceneArgs {
            scene: Some(path),
            params: Some(r#"{"radius": 25}"#.into()),
            impulse_y: Some(-1.0),
            ..SceneArgs::default()
        };
        let scene = args.resolve().unwrap();
        assert_eq!(scene.width, 64);
        assert_eq!(scene.params["radius"], 25);
        assert_eq!(scene.params["base_color"], "#ffd800");
        assert_eq!(scene.impulse, Some(Vec2::new(3.0, -1.0)));
    }

    #[test]
    fn resolve_rejects_bad_input() {
        let bad_json = SceneArgs {
            params: Some("{radius".into()),
            ..SceneArgs::default()
        };
        assert_eq!(bad_json.resolve().unwrap_err().exit_code(), 12);

        let not_object = SceneArgs {
            params: Some("[1, 2]".into()),
            ..SceneArgs::default()
        };
        assert_eq!(not_object.resolve().unwrap_err().exit_code(), 12);

        let bad_color = SceneArgs {
            background: Some("teal".into()),
            ..SceneArgs::default()
        };
        assert_eq!(bad_color.resolve().unwrap_err().exit_code(), 12);

        let zero_width = SceneArgs {
            width: Some(0),
            ..SceneArgs::default()
        };
        assert_eq!(zero_width.resolve().unwrap_err().exit_code(), 10);

        let missing_file = SceneArgs {
            scene: Some(PathBuf::from("/nonexistent/scene.json")),
            ..SceneArgs::default()
        };
        assert_eq!(missing_file.resolve().unwrap_err().exit_code(), 11);
    }

    #[test]
    fn render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let cli = Cli {
            json: true,
            verbose: 0,
            command: Command::Render {
                scene: SceneArgs {
                    width: Some(64),
                    height: Some(64),
                    params: Some(r#"{"radius": 20}"#.into()),
                    ..SceneArgs::default()
                },
                output: output.clone(),
            },
        };
        run(cli).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn render_with_zero_vesicles_fails_with_citrus_code() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            json: false,
            verbose: 0,
            command: Command::Render {
                scene: SceneArgs {
                    params: Some(r#"{"vesicle_count": 0}"#.into()),
                    ..SceneArgs::default()
                },
                output: dir.path().join("out.png"),
            },
        };
        assert_eq!(run(cli).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn resolve_rejects_malformed_scene_files_as_input() {
        let dir = tempfile::tempdir().unwrap();

        let bad_background = dir.path().join("teal.json");
        std::fs::write(
            &bad_background,
            r#"{"width": 64, "height": 64, "background": "teal"}"#,
        )
        .unwrap();
        let args = SceneArgs {
            scene: Some(bad_background),
            ..SceneArgs::default()
        };
        assert_eq!(args.resolve().unwrap_err().exit_code(), 12);

        let truncated = dir.path().join("truncated.json");
        std::fs::write(&truncated, r#"{"width": 64, "#).unwrap();
        let args = SceneArgs {
            scene: Some(truncated),
            ..SceneArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("truncated.json"), "got: {err}");
    }

    #[test]
    fn trace_text_lists_one_command_per_line() {
        let scene = SceneArgs {
            width: Some(100),
            height: Some(100),
            params: Some(r#"{"radius": 20, "vesicle_count": 4}"#.into()),
            ..SceneArgs::default()
        }
        .resolve()
        .unwrap();
        let citrus = Citrus::from_scene(&scene).unwrap();
        let mut recorder = CommandRecorder::new();
        citrus.draw_current(&mut recorder);

        let text = trace_text(&citrus.state(), recorder.commands());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("position (50.00, 50.00)"), "got: {}", lines[0]);
        assert_eq!(lines.len(), 1 + recorder.commands().len());
        assert_eq!(lines[1], "smooth");
        assert!(!text.contains('{'), "text trace should not be JSON: {text}");
        assert_eq!(lines.iter().filter(|l| l.starts_with("line ")).count(), 5);
    }

    #[test]
    fn parses_negative_impulse_flags() {
        let cli = Cli::try_parse_from([
            "citrus",
            "trace",
            "--impulse-x",
            "-10",
            "--impulse-y",
            "2.5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Trace { scene } => {
                assert_eq!(scene.impulse_x, Some(-10.0));
                assert_eq!(scene.impulse_y, Some(2.5));
            }
            _ => panic!("expected trace"),
        }
    }
}
