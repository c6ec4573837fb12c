use crate::{ActuatorError, HatPort, Motor, Result, WheelPair};
use parking_lot::Mutex;
use serialport::SerialPort;
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Rotations per second produced by one unit of speed.
const RPS_PER_SPEED: f32 = 0.05;

/// Position PID used by the Build HAT firmware for ramped moves.
const POSITION_PID: &str = "0 1 s4 0.0027777778 0 5 0 .1 3 0.01";

/// Serial link to a Raspberry Pi Build HAT running its stock firmware.
///
/// The link tracks the commanded position of each port so successive relative moves can be
/// expressed as absolute position ramps.
pub struct BuildHatLink {
    port: Box<dyn SerialPort>,
    positions: [f32; 4],
}

impl BuildHatLink {
    pub fn open(path: &str) -> Result<Arc<Mutex<Self>>> {
        let port = serialport::new(path, 115_200)
            .timeout(Duration::from_millis(200))
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => ActuatorError::NotFound(path.to_string()),
                _ => ActuatorError::Io(e.to_string()),
            })?;
        info!(path, "build hat link opened");
        Ok(Arc::new(Mutex::new(Self {
            port,
            positions: [0.0; 4],
        })))
    }

    /// Queue a relative move on one port; returns how long the move takes.
    fn ramp(&mut self, port: HatPort, rotations: f32, speed: i32) -> Result<Duration> {
        check_speed(speed)?;
        if speed == 0 || rotations == 0.0 {
            return Ok(Duration::ZERO);
        }
        let from = self.positions[port.index()];
        let to = from + rotations.abs() * speed.signum() as f32;
        let secs = ramp_seconds(rotations, speed);
        let line = ramp_command(port, from, to, secs);
        debug!(%port, from, to, secs, "build hat ramp");
        self.port
            .write_all(line.as_bytes())
            .map_err(|e| ActuatorError::Io(e.to_string()))?;
        self.positions[port.index()] = to;
        Ok(Duration::from_secs_f32(secs))
    }
}

fn check_speed(speed: i32) -> Result<()> {
    if (-100..=100).contains(&speed) {
        Ok(())
    } else {
        Err(ActuatorError::SpeedOutOfRange(speed))
    }
}

fn ramp_seconds(rotations: f32, speed: i32) -> f32 {
    rotations.abs() / (speed.unsigned_abs() as f32 * RPS_PER_SPEED)
}

fn ramp_command(port: HatPort, from: f32, to: f32, secs: f32) -> String {
    let idx = port.index();
    format!("port {idx} ; pid {idx} {POSITION_PID} ; set ramp {from:.6} {to:.6} {secs:.6} 0\r")
}

/// A single motor on one Build HAT port.
pub struct BuildHatMotor {
    link: Arc<Mutex<BuildHatLink>>,
    port: HatPort,
}

impl BuildHatMotor {
    pub fn new(link: Arc<Mutex<BuildHatLink>>, port: HatPort) -> Self {
        Self { link, port }
    }
}

impl Motor for BuildHatMotor {
    fn run_for_rotations(&mut self, rotations: f32, speed: i32, blocking: bool) -> Result<()> {
        let wait = self.link.lock().ramp(self.port, rotations, speed)?;
        if blocking {
            thread::sleep(wait);
        }
        Ok(())
    }
}

/// Two Build HAT motors driven as a differential wheel pair.
pub struct BuildHatPair {
    link: Arc<Mutex<BuildHatLink>>,
    left: HatPort,
    right: HatPort,
}

impl BuildHatPair {
    pub fn new(link: Arc<Mutex<BuildHatLink>>, left: HatPort, right: HatPort) -> Self {
        Self { link, left, right }
    }
}

impl WheelPair for BuildHatPair {
    fn run_for_rotations(
        &mut self,
        rotations: f32,
        speed_left: i32,
        speed_right: i32,
    ) -> Result<()> {
        let wait = {
            let mut link = self.link.lock();
            let l = link.ramp(self.left, rotations, speed_left)?;
            let r = link.ramp(self.right, rotations, speed_right)?;
            l.max(r)
        };
        thread::sleep(wait);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_duration_scales_with_speed() {
        assert!((ramp_seconds(4.0, 20) - 4.0).abs() < 1e-6);
        assert!((ramp_seconds(4.0, -20) - 4.0).abs() < 1e-6);
        assert!((ramp_seconds(0.25, 10) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ramp_command_format() {
        let cmd = ramp_command(HatPort::C, 0.0, -4.0, 4.0);
        assert_eq!(
            cmd,
            "port 2 ; pid 2 0 1 s4 0.0027777778 0 5 0 .1 3 0.01 ; set ramp 0.000000 -4.000000 4.000000 0\r"
        );
    }

    #[test]
    fn speed_bounds() {
        assert!(check_speed(100).is_ok());
        assert!(check_speed(-100).is_ok());
        assert!(matches!(
            check_speed(101),
            Err(ActuatorError::SpeedOutOfRange(101))
        ));
    }
}
