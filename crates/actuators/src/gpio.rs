use crate::{ActuatorError, Result, Servo, ServoConfig};
use rppal::gpio::{Gpio, OutputPin};
use std::time::Duration;
use tracing::{debug, info};

/// Servo on a Raspberry Pi GPIO pin using rppal's software PWM.
pub struct GpioServo {
    pin: OutputPin,
    cfg: ServoConfig,
}

impl GpioServo {
    /// Open a servo on a BCM pin number.
    pub fn open(bcm_pin: u8, cfg: ServoConfig) -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| ActuatorError::Io(e.to_string()))?;
        let pin = gpio
            .get(bcm_pin)
            .map_err(|_| ActuatorError::NotFound(format!("gpio{bcm_pin}")))?
            .into_output();
        info!(pin = bcm_pin, "servo opened");
        Ok(Self { pin, cfg })
    }
}

impl Servo for GpioServo {
    fn set_angle(&mut self, degrees: f32) -> Result<()> {
        let pulse = self
            .cfg
            .pulse_us(degrees)
            .ok_or(ActuatorError::AngleOutOfRange {
                angle: degrees,
                min: self.cfg.min_angle,
                max: self.cfg.max_angle,
            })?;
        debug!(degrees, pulse_us = pulse, "servo angle");
        self.pin
            .set_pwm(
                Duration::from_micros(self.cfg.period_us as u64),
                Duration::from_micros(pulse as u64),
            )
            .map_err(|e| ActuatorError::Io(e.to_string()))
    }

    fn release(&mut self) -> Result<()> {
        debug!("servo released");
        self.pin
            .clear_pwm()
            .map_err(|e| ActuatorError::Io(e.to_string()))
    }
}
