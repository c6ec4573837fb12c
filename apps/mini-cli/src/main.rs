use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use robot_core::{actions, Dispatcher, Hardware, Outcome, Persona, Prompt, RobotSettings};

mod backends;

#[derive(Parser, Debug)]
#[command(name = "mini", version, about = "AlphaMini robot console")]
struct Cli {
    /// Persona file with optional name, backstory and role
    #[arg(long, default_value = "robot_config.json")]
    config: PathBuf,
    /// Use built-in defaults when the persona file is missing
    #[arg(long, action = ArgAction::SetTrue)]
    allow_missing_config: bool,
    /// Run against simulated hardware and a scripted chat service
    #[arg(long, action = ArgAction::SetTrue)]
    sim: bool,
    /// Chat model identifier
    #[arg(long, default_value = "gemma2:2b")]
    model: String,
    #[arg(long, default_value = "http://127.0.0.1:11434")]
    ollama_url: String,
    /// Piper voice model (.onnx, with its .onnx.json next to it)
    #[arg(long, default_value = "en_GB-jenny_dioco-medium.onnx")]
    voice_model: PathBuf,
    #[arg(long, default_value = "piper")]
    piper_bin: PathBuf,
    /// Build HAT serial port
    #[arg(long, default_value = "/dev/serial0")]
    serial: String,
    /// BCM pin driving the face servo
    #[arg(long, default_value_t = 23)]
    servo_pin: u8,
    /// Camera index or device path
    #[arg(long, default_value = "0")]
    camera: String,
    #[arg(long, default_value = ".")]
    photo_dir: PathBuf,
    /// Directory holding the dance tracks
    #[arg(long, default_value = ".")]
    tracks_dir: PathBuf,
    /// Recent chat messages sent with each request (0 = whole transcript)
    #[arg(long, default_value_t = 0)]
    history_window: usize,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let persona = load_persona(&cli.config, cli.allow_missing_config)?;
    let settings = RobotSettings {
        model: cli.model.clone(),
        history_window: cli.history_window,
        photo_dir: cli.photo_dir.clone(),
        tracks_dir: cli.tracks_dir.clone(),
        ..RobotSettings::default()
    };
    info!(
        name = %persona.name,
        model = %settings.model,
        sim = cli.sim,
        missing = ?backends::missing_backends(),
        "starting"
    );

    let mut dispatcher = Dispatcher::new(persona, settings)
        .map_err(|e| anyhow::anyhow!("dispatcher init failed: {e}"))?;
    let mut hw = if cli.sim {
        println!("Running with simulated hardware.");
        backends::simulated()
    } else {
        backends::build(&cli)?
    };

    run(&mut dispatcher, &mut hw, io::stdin().lock(), &mut io::stdout())
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load_persona(path: &Path, allow_missing: bool) -> Result<Persona> {
    if allow_missing && !path.exists() {
        warn!(path = %path.display(), "persona file missing; using defaults");
        return Ok(Persona::default());
    }
    Persona::load(path).with_context(|| format!("loading persona from {}", path.display()))
}

/// Home the servo, then feed input lines to the dispatcher until `quit` or end of input.
/// The audio device is released on every way out, including errors.
fn run<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    hw: &mut Hardware,
    input: R,
    out: &mut W,
) -> Result<()> {
    let result = drive(dispatcher, hw, input, out);
    match hw.close() {
        Ok(()) => result,
        Err(e) if result.is_ok() => Err(anyhow::anyhow!("closing audio failed: {e}")),
        Err(e) => {
            error!(error = %e, "closing audio failed");
            result
        }
    }
}

fn drive<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    hw: &mut Hardware,
    input: R,
    out: &mut W,
) -> Result<()> {
    actions::home_servo(hw, &dispatcher.settings().timings).context("homing face servo")?;

    let mut lines = input.lines();
    let mut prompt = Prompt::Command;
    loop {
        write!(out, "{}", prompt.text())?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            info!("input closed");
            return Ok(());
        };
        match dispatcher.handle_line(hw, &line)? {
            Outcome::Continue(next) => prompt = next,
            Outcome::Quit => return Ok(()),
        }
    }
}
