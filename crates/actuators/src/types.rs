use core::fmt;
use serde::{Deserialize, Serialize};

/// One command observed at the actuator boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActuatorEvent {
    ServoAngle(f32),
    ServoRelease,
    WheelPair {
        rotations: f32,
        speed_left: i32,
        speed_right: i32,
    },
    Motor {
        rotations: f32,
        speed: i32,
        blocking: bool,
    },
}

/// Pulse-width calibration for a positional servo.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServoConfig {
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_pulse_us: u32,
    pub max_pulse_us: u32,
    pub period_us: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_angle: -90.0,
            max_angle: 90.0,
            min_pulse_us: 600,
            max_pulse_us: 2300,
            period_us: 20_000,
        }
    }
}

impl ServoConfig {
    /// Pulse width for an angle, or `None` when the angle is outside the calibrated range.
    pub fn pulse_us(&self, degrees: f32) -> Option<u32> {
        if !(self.min_angle..=self.max_angle).contains(&degrees) {
            return None;
        }
        let span = self.max_angle - self.min_angle;
        let frac = (degrees - self.min_angle) / span;
        let width = self.max_pulse_us.saturating_sub(self.min_pulse_us) as f32;
        Some(self.min_pulse_us + (frac * width).round() as u32)
    }
}

/// Motor port on a Raspberry Pi Build HAT.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HatPort {
    A,
    B,
    C,
    D,
}

impl HatPort {
    pub fn index(self) -> usize {
        match self {
            HatPort::A => 0,
            HatPort::B => 1,
            HatPort::C => 2,
            HatPort::D => 3,
        }
    }
}

impl fmt::Display for HatPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            HatPort::A => 'A',
            HatPort::B => 'B',
            HatPort::C => 'C',
            HatPort::D => 'D',
        };
        write!(f, "{letter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn servo_pulse_spans_calibration() {
        let cfg = ServoConfig::default();
        assert_eq!(cfg.pulse_us(-90.0), Some(600));
        assert_eq!(cfg.pulse_us(90.0), Some(2300));
        assert_eq!(cfg.pulse_us(0.0), Some(1450));
        assert_eq!(cfg.pulse_us(91.0), None);
    }

    #[test]
    fn hat_port_letters() {
        assert_eq!(HatPort::C.index(), 2);
        assert_eq!(HatPort::D.index(), 3);
        assert_eq!(HatPort::A.to_string(), "A");
    }
}
