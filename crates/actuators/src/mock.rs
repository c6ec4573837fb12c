use crate::{ActuatorEvent, Motor, Result, Servo, WheelPair};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Shared, ordered journal of actuator commands. Clones observe the same journal, so a test
/// can keep one handle while the mocks are boxed away behind trait objects.
#[derive(Clone, Debug, Default)]
pub struct ActuatorLog {
    events: Arc<Mutex<Vec<ActuatorEvent>>>,
}

impl ActuatorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActuatorEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: ActuatorEvent) {
        debug!(?event, "mock actuator");
        self.events.lock().push(event);
    }
}

/// Servo that records commands instead of moving.
#[derive(Clone, Debug, Default)]
pub struct MockServo {
    log: ActuatorLog,
}

impl MockServo {
    pub fn new(log: ActuatorLog) -> Self {
        Self { log }
    }
}

impl Servo for MockServo {
    fn set_angle(&mut self, degrees: f32) -> Result<()> {
        self.log.push(ActuatorEvent::ServoAngle(degrees));
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.log.push(ActuatorEvent::ServoRelease);
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockWheelPair {
    log: ActuatorLog,
}

impl MockWheelPair {
    pub fn new(log: ActuatorLog) -> Self {
        Self { log }
    }
}

impl WheelPair for MockWheelPair {
    fn run_for_rotations(
        &mut self,
        rotations: f32,
        speed_left: i32,
        speed_right: i32,
    ) -> Result<()> {
        self.log.push(ActuatorEvent::WheelPair {
            rotations,
            speed_left,
            speed_right,
        });
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockMotor {
    log: ActuatorLog,
}

impl MockMotor {
    pub fn new(log: ActuatorLog) -> Self {
        Self { log }
    }
}

impl Motor for MockMotor {
    fn run_for_rotations(&mut self, rotations: f32, speed: i32, blocking: bool) -> Result<()> {
        self.log.push(ActuatorEvent::Motor {
            rotations,
            speed,
            blocking,
        });
        Ok(())
    }
}
