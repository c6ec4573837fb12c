//! actuators: servo and motor abstractions for the robot's face and drive train
//!
//! This crate provides traits for a positional servo (facial expressions), a differential
//! wheel pair and a single torso motor, with feature-gated backends. The default build
//! enables a `mock` backend that records every command so binaries and tests run on any host.

mod types;
pub use types::{ActuatorEvent, HatPort, ServoConfig};

mod error;
pub use error::{ActuatorError, Result};

mod traits;
pub use traits::{Motor, Servo, WheelPair};

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{ActuatorLog, MockMotor, MockServo, MockWheelPair};

#[cfg(feature = "gpio")]
mod gpio;

#[cfg(feature = "gpio")]
pub use gpio::GpioServo;

#[cfg(feature = "buildhat")]
mod buildhat;

#[cfg(feature = "buildhat")]
pub use buildhat::{BuildHatLink, BuildHatMotor, BuildHatPair};
