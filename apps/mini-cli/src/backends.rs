//! Facade construction. A hardware run needs every device backend compiled in; `--sim` is the
//! way to run without them.

use anyhow::Result;
use robot_core::{sim, Hardware, StdoutConsole};

use crate::Cli;

/// Cargo features a hardware run depends on, and whether each is compiled in.
const BACKENDS: [(&str, bool); 6] = [
    ("gpio", cfg!(feature = "gpio")),
    ("buildhat", cfg!(feature = "buildhat")),
    ("opencv", cfg!(feature = "opencv")),
    ("piper", cfg!(feature = "piper")),
    ("audio", cfg!(feature = "audio")),
    ("ollama", cfg!(feature = "ollama")),
];

pub fn missing_backends() -> Vec<&'static str> {
    BACKENDS
        .iter()
        .filter(|(_, enabled)| !enabled)
        .map(|(name, _)| *name)
        .collect()
}

/// All-mock hardware that still prints to the terminal.
pub fn simulated() -> Hardware {
    let (mut hw, _journals) = sim::simulated(Vec::new());
    hw.console = Box::new(StdoutConsole);
    hw
}

#[cfg(not(all(
    feature = "gpio",
    feature = "buildhat",
    feature = "opencv",
    feature = "piper",
    feature = "audio",
    feature = "ollama"
)))]
pub fn build(_cli: &Cli) -> Result<Hardware> {
    anyhow::bail!(
        "built without the {} backend(s); rebuild with `--features robot` or run with `--sim`",
        missing_backends().join(", ")
    )
}

#[cfg(all(
    feature = "gpio",
    feature = "buildhat",
    feature = "opencv",
    feature = "piper",
    feature = "audio",
    feature = "ollama"
))]
pub fn build(cli: &Cli) -> Result<Hardware> {
    use actuators::{BuildHatLink, BuildHatMotor, BuildHatPair, GpioServo, HatPort, ServoConfig};
    use std::time::Duration;
    use tracing::info;
    use voice_local::TtsEngine;

    let servo = GpioServo::open(cli.servo_pin, ServoConfig::default())
        .map_err(|e| anyhow::anyhow!("servo on BCM {} failed: {e}", cli.servo_pin))?;
    let link = BuildHatLink::open(&cli.serial)
        .map_err(|e| anyhow::anyhow!("build hat on {} failed: {e}", cli.serial))?;
    info!(pin = cli.servo_pin, port = %cli.serial, "actuators ready");

    let voice = voice_local::PiperTts::load(&cli.piper_bin, &cli.voice_model)
        .map_err(|e| anyhow::anyhow!("voice model {} failed: {e}", cli.voice_model.display()))?;
    let audio = voice_local::CpalSink::new(voice.sample_rate_hz())
        .map_err(|e| anyhow::anyhow!("audio output failed: {e}"))?;
    let player = voice_local::CpalTrackPlayer::new()
        .map_err(|e| anyhow::anyhow!("track player failed: {e}"))?;

    let chat = chat_client::OllamaChat::new(&cli.ollama_url, Duration::from_secs(120))
        .map_err(|e| anyhow::anyhow!("chat client failed: {e}"))?;
    info!(url = %cli.ollama_url, "chat service configured");

    Ok(Hardware {
        servo: Box::new(servo),
        wheels: Box::new(BuildHatPair::new(link.clone(), HatPort::A, HatPort::C)),
        torso: Box::new(BuildHatMotor::new(link, HatPort::D)),
        camera: Box::new(camera::OpenCvCamera::new(&cli.camera)),
        preview: Box::new(camera::OpenCvPreview::new()),
        voice: Box::new(voice),
        audio: Box::new(audio),
        player: Box::new(player),
        chat: Box::new(chat),
        console: Box::new(StdoutConsole),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_backends_match_features() {
        let missing = missing_backends();
        assert_eq!(missing.contains(&"gpio"), !cfg!(feature = "gpio"));
        assert_eq!(missing.contains(&"audio"), !cfg!(feature = "audio"));
        assert_eq!(missing.contains(&"ollama"), !cfg!(feature = "ollama"));
    }

    #[cfg(not(all(
        feature = "gpio",
        feature = "buildhat",
        feature = "opencv",
        feature = "piper",
        feature = "audio",
        feature = "ollama"
    )))]
    #[test]
    fn hardware_run_refuses_missing_backends() {
        let cli = Cli::try_parse_from(["mini"]).unwrap();
        let err = build(&cli).err().unwrap().to_string();
        assert!(err.contains("--features robot"), "{err}");
        assert!(err.contains("--sim"), "{err}");
        for name in missing_backends() {
            assert!(err.contains(name), "{err}");
        }
    }
}
