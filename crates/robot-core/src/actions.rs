//! Action handlers run by the dispatcher once a command has been acknowledged.
//!
//! Handlers block until their hardware work is done. The ones that need more operator input
//! (say, dance) take that input as an argument; the dispatcher collects it first.

use crate::{
    BodyStep, Direction, Expression, Hardware, Persona, Result, RobotSettings, Timings, Track,
    BODY_SEQUENCE, DRIVE_ROTATIONS, UNRECOGNIZED,
};
use camera::io::{photo_file_name, save_png};
use camera::AutofocusMode;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Operator input that makes the say handler refuse.
pub const SAY_SENTINEL: &str = "quit";
pub const SAY_REFUSAL: &str = "I will say nothing!";

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

fn settle_and_release(hw: &mut Hardware, angle: f32, timings: &Timings) -> Result<()> {
    hw.servo.set_angle(angle)?;
    pause(timings.servo_settle());
    hw.servo.release()?;
    Ok(())
}

/// Center the face servo at startup.
pub fn home_servo(hw: &mut Hardware, timings: &Timings) -> Result<()> {
    debug!("homing face servo");
    settle_and_release(hw, 0.0, timings)
}

pub fn change_expression(
    hw: &mut Hardware,
    expression: Expression,
    timings: &Timings,
) -> Result<()> {
    info!(expression = expression.name(), angle = expression.angle(), "expression");
    settle_and_release(hw, expression.angle(), timings)
}

pub fn move_robot(hw: &mut Hardware, direction: Direction) -> Result<()> {
    info!(direction = direction.name(), "move");
    match direction.wheel_speeds() {
        Some(speeds) => hw
            .wheels
            .run_for_rotations(DRIVE_ROTATIONS, speeds.left, speeds.right)?,
        None => run_body(hw)?,
    }
    Ok(())
}

fn run_body(hw: &mut Hardware) -> Result<()> {
    for step in BODY_SEQUENCE {
        match step {
            BodyStep::Torso { rotations, speed } => {
                hw.torso.run_for_rotations(rotations, speed, false)?;
            }
            BodyStep::Wheels { rotations, speeds } => {
                hw.wheels.run_for_rotations(rotations, speeds.left, speeds.right)?;
            }
        }
    }
    Ok(())
}

pub fn introduce(hw: &mut Hardware, persona: &Persona, timings: &Timings) -> Result<()> {
    change_expression(hw, Expression::Happy, timings)?;
    hw.speak(&persona.backstory)
}

/// Speak `text` exactly as typed, unless it is the refusal sentinel.
pub fn say(hw: &mut Hardware, text: &str) -> Result<()> {
    if text.trim().eq_ignore_ascii_case(SAY_SENTINEL) {
        hw.print("Nothing will be said.");
        return hw.speak(SAY_REFUSAL);
    }
    hw.speak(text)
}

/// Play the selected track and dance to it. Returns `false` (after speaking the fallback)
/// when the selector is not one of the menu choices.
pub fn dance(hw: &mut Hardware, selector: &str, settings: &RobotSettings) -> Result<bool> {
    let Some(track) = Track::from_selector(selector.trim()) else {
        debug!(selector, "invalid track selector");
        hw.speak(UNRECOGNIZED)?;
        return Ok(false);
    };
    let path = settings.tracks_dir.join(track.file_name());
    info!(track = ?track, path = %path.display(), "dance");
    hw.player.play(&path)?;
    hw.print("Playing sound!");
    pause(settings.timings.dance_pause());
    move_robot(hw, Direction::Body)?;
    Ok(true)
}

/// Smile, count down on the preview, then save one still. The camera is stopped and the
/// preview closed whether or not the capture succeeded.
pub fn take_photo(hw: &mut Hardware, settings: &RobotSettings) -> Result<PathBuf> {
    change_expression(hw, Expression::Happy, &settings.timings)?;
    hw.print("Taking a photo...");
    hw.camera.configure(&settings.still)?;
    hw.camera.start()?;

    let shot = countdown_and_capture(hw, settings);
    let stopped = hw.camera.stop();
    let closed = hw.preview.close();

    let path = shot?;
    stopped?;
    closed?;
    Ok(path)
}

fn countdown_and_capture(hw: &mut Hardware, settings: &RobotSettings) -> Result<PathBuf> {
    hw.camera.set_autofocus(AutofocusMode::Continuous)?;
    let countdown = settings.timings.photo_countdown();
    let started = Instant::now();
    loop {
        let elapsed = started.elapsed();
        if elapsed >= countdown {
            hw.print("Time's up!");
            break;
        }
        let frame = hw.camera.capture()?;
        let caption = format!("Prepare! {}s", (countdown - elapsed).as_secs());
        if hw.preview.show(&frame, &caption)? {
            info!("photo countdown cancelled");
            break;
        }
    }

    let frame = hw.camera.capture()?;
    let at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let name = photo_file_name(at)?;
    let path = settings.photo_dir.join(&name);
    save_png(&path, &frame)?;
    info!(path = %path.display(), width = frame.width, height = frame.height, "photo saved");
    hw.print(&format!("Photo saved as {name}"));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulated;
    use actuators::ActuatorEvent;
    use camera::CameraEvent;

    fn quick() -> Timings {
        Timings::immediate()
    }

    #[test]
    fn expression_moves_servo_then_releases() {
        let (mut hw, sim) = simulated(Vec::new());
        change_expression(&mut hw, Expression::Kiss, &quick()).unwrap();
        assert_eq!(
            sim.actuators.events(),
            vec![ActuatorEvent::ServoAngle(-80.0), ActuatorEvent::ServoRelease]
        );
    }

    #[test]
    fn drive_directions_use_table_speeds() {
        let (mut hw, sim) = simulated(Vec::new());
        for d in [Direction::Forward, Direction::Backward, Direction::Left, Direction::Right] {
            sim.actuators.clear();
            move_robot(&mut hw, d).unwrap();
            let speeds = d.wheel_speeds().unwrap();
            assert_eq!(
                sim.actuators.events(),
                vec![ActuatorEvent::WheelPair {
                    rotations: DRIVE_ROTATIONS,
                    speed_left: speeds.left,
                    speed_right: speeds.right,
                }]
            );
        }
    }

    #[test]
    fn body_runs_four_steps() {
        let (mut hw, sim) = simulated(Vec::new());
        move_robot(&mut hw, Direction::Body).unwrap();
        assert_eq!(
            sim.actuators.events(),
            vec![
                ActuatorEvent::Motor {
                    rotations: 0.25,
                    speed: 10,
                    blocking: false
                },
                ActuatorEvent::WheelPair {
                    rotations: 4.0,
                    speed_left: 12,
                    speed_right: -12
                },
                ActuatorEvent::Motor {
                    rotations: 0.25,
                    speed: -10,
                    blocking: false
                },
                ActuatorEvent::WheelPair {
                    rotations: 4.0,
                    speed_left: -12,
                    speed_right: 12
                },
            ]
        );
    }

    #[test]
    fn say_is_verbatim_or_refuses() {
        let (mut hw, sim) = simulated(Vec::new());
        say(&mut hw, "Hello *World* :)").unwrap();
        say(&mut hw, "QUIT").unwrap();
        assert_eq!(
            sim.speech.spoken(),
            vec!["Hello *World* :)".to_string(), SAY_REFUSAL.to_string()]
        );
        assert_eq!(sim.console.lines(), vec!["Nothing will be said.".to_string()]);
    }

    #[test]
    fn dance_plays_then_moves() {
        let (mut hw, sim) = simulated(Vec::new());
        let settings = RobotSettings {
            tracks_dir: PathBuf::from("music"),
            timings: quick(),
            ..RobotSettings::default()
        };
        assert!(dance(&mut hw, " 2 ", &settings).unwrap());
        assert_eq!(sim.audio.played(), vec![PathBuf::from("music").join("kongfu.mp3")]);
        assert_eq!(sim.actuators.events().len(), 4);
        assert!(sim.speech.spoken().is_empty());
    }

    #[test]
    fn photo_after_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hw, sim) = simulated(Vec::new());
        let settings = RobotSettings {
            photo_dir: dir.path().to_path_buf(),
            timings: quick(),
            ..RobotSettings::default()
        };
        let path = take_photo(&mut hw, &settings).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("image_") && name.ends_with(".png"));

        assert_eq!(
            sim.camera.events(),
            vec![
                CameraEvent::Configured(settings.still),
                CameraEvent::Started,
                CameraEvent::Autofocus(AutofocusMode::Continuous),
                CameraEvent::Captured,
                CameraEvent::Stopped,
                CameraEvent::PreviewClosed,
            ]
        );
        assert_eq!(
            sim.console.lines(),
            vec![
                "Taking a photo...".to_string(),
                "Time's up!".to_string(),
                format!("Photo saved as {name}"),
            ]
        );
        assert_eq!(
            sim.actuators.events(),
            vec![ActuatorEvent::ServoAngle(0.0), ActuatorEvent::ServoRelease]
        );
    }

    #[test]
    fn photo_cancel_skips_rest_of_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hw, sim) = simulated(Vec::new());
        hw.preview = Box::new(camera::MockPreview::new(sim.camera.clone()).cancel_after(2));
        let settings = RobotSettings {
            photo_dir: dir.path().to_path_buf(),
            timings: Timings {
                photo_countdown_ms: 60_000,
                ..quick()
            },
            ..RobotSettings::default()
        };
        take_photo(&mut hw, &settings).unwrap();

        let shown: Vec<_> = sim
            .camera
            .events()
            .into_iter()
            .filter_map(|e| match e {
                CameraEvent::Shown(caption) => Some(caption),
                _ => None,
            })
            .collect();
        assert_eq!(shown.len(), 2);
        assert!(shown[0].starts_with("Prepare! 59"));
        assert!(!sim.console.lines().contains(&"Time's up!".to_string()));
    }

    #[test]
    fn photo_releases_camera_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hw, sim) = simulated(Vec::new());
        let settings = RobotSettings {
            photo_dir: dir.path().join("missing").join("nested"),
            timings: quick(),
            ..RobotSettings::default()
        };
        assert!(take_photo(&mut hw, &settings).is_err());
        let events = sim.camera.events();
        assert_eq!(events[events.len() - 2], CameraEvent::Stopped);
        assert_eq!(events[events.len() - 1], CameraEvent::PreviewClosed);
    }
}
