use anyhow::Context;
use clap::{Parser, Subcommand};
use cubespin_control::{ControllerConfig, Mode, RotationController, RotationState};
use cubespin_input::{InputScript, KeyBindings};
use cubespin_render::{DebugTextRenderer, Frame, Renderer};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubespin-cli", about = "Headless tools for the cubespin controller")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, default controller settings and key bindings
    Info,
    /// Replay a scripted key sequence through the rotation controller
    Simulate {
        /// Steps like `5xidle,space,idle,3xright`
        #[arg(short, long)]
        script: String,
        /// Start in manual mode
        #[arg(long)]
        manual: bool,
        /// Print every tick, not just the last
        #[arg(long)]
        trace: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Final state of a simulation run, as printed with `--json`.
#[derive(Debug, Serialize)]
struct SimulationReport {
    ticks: u64,
    mode: Mode,
    rotation: RotationState,
    transform: [f32; 16],
}

impl From<&Frame> for SimulationReport {
    fn from(frame: &Frame) -> Self {
        Self {
            ticks: frame.tick,
            mode: frame.mode,
            rotation: frame.rotation,
            transform: frame.transform.to_cols_array(),
        }
    }
}

/// Drive a fresh controller through `script`, calling `on_tick` after each tick.
fn simulate(
    script: &InputScript,
    config: ControllerConfig,
    mut on_tick: impl FnMut(&Frame),
) -> Frame {
    let bindings = KeyBindings::default();
    let mut controller = RotationController::new(config);
    let mut frame = Frame::capture(&controller);
    for keys in script.frames() {
        controller.tick(&bindings.sample(keys));
        frame = Frame::capture(&controller);
        on_tick(&frame);
    }
    frame
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cubespin-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", cubespin_input::crate_info());
            println!("control: {}", cubespin_control::crate_info());
            println!("render: {}", cubespin_render::crate_info());
            println!(
                "controller: {}",
                serde_json::to_string(&ControllerConfig::default())?
            );
            println!(
                "bindings: {}",
                serde_json::to_string(&KeyBindings::default())?
            );
        }
        Commands::Simulate {
            script,
            manual,
            trace,
            json,
        } => {
            let script: InputScript = script.parse().context("invalid input script")?;
            let config = ControllerConfig {
                initial_mode: if manual { Mode::Manual } else { Mode::Auto },
                ..ControllerConfig::default()
            };
            tracing::info!(ticks = script.tick_count(), "simulating");

            let mut text = DebugTextRenderer::new();
            let last = simulate(&script, config, |frame| {
                if trace && !json {
                    print!("{}", text.render(frame));
                }
            });

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&SimulationReport::from(&last))?
                );
            } else if !trace {
                print!("{}", DebugTextRenderer::new().render(&last));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str, config: ControllerConfig) -> Frame {
        simulate(&script.parse().unwrap(), config, |_| {})
    }

    #[test]
    fn scenario_script_matches_expected_angles() {
        let last = run("5xidle,space,idle,3xright", ControllerConfig::default());
        assert_eq!(last.tick, 10);
        assert_eq!(last.mode, Mode::Manual);
        assert!((last.rotation.angle_x - 0.14).abs() < 1e-5);
        assert!((last.rotation.angle_y - 0.05).abs() < 1e-5);
    }

    #[test]
    fn callback_sees_every_tick() {
        let script: InputScript = "3xidle,2xup".parse().unwrap();
        let mut ticks = Vec::new();
        simulate(&script, ControllerConfig::default(), |f| ticks.push(f.tick));
        assert_eq!(ticks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn manual_start_ignores_idle() {
        let config = ControllerConfig {
            initial_mode: Mode::Manual,
            ..ControllerConfig::default()
        };
        let last = run("4xidle,2xdown+s", config);
        assert_eq!(last.rotation.angle_x, 0.0);
        assert!((last.rotation.angle_y + 0.06).abs() < 1e-5);
    }

    #[test]
    fn report_serializes_state() {
        let last = run("2xidle", ControllerConfig::default());
        let value = serde_json::to_value(SimulationReport::from(&last)).unwrap();
        assert_eq!(value["ticks"], 2);
        assert_eq!(value["mode"], "Auto");
        assert_eq!(value["transform"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::parse_from(["cubespin-cli", "simulate", "--script", "idle", "--json"]);
        assert!(matches!(
            cli.command,
            Commands::Simulate { json: true, trace: false, .. }
        ));
    }
}
