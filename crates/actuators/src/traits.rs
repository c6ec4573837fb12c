use crate::Result;

/// A positional hobby servo driven by a PWM pulse.
pub trait Servo {
    /// Command the horn to an angle in degrees.
    fn set_angle(&mut self, degrees: f32) -> Result<()>;

    /// Stop driving the pulse so the servo goes limp and stops chattering while idle.
    fn release(&mut self) -> Result<()>;
}

/// Two independently driven wheels.
pub trait WheelPair {
    /// Turn both wheels the given number of rotations at signed speeds (-100..=100).
    /// Blocks until the motion completes.
    fn run_for_rotations(&mut self, rotations: f32, speed_left: i32, speed_right: i32)
        -> Result<()>;
}

/// A single motor (the torso joint).
pub trait Motor {
    /// Turn the motor the given number of rotations at a signed speed (-100..=100).
    /// When `blocking` is false the call returns as soon as the command is issued.
    fn run_for_rotations(&mut self, rotations: f32, speed: i32, blocking: bool) -> Result<()>;
}
