use std::time::Duration;

pub const ANGLE_MIN: i32 = 0;
pub const ANGLE_MAX: i32 = 180;
pub const JOG_STEP_DEG: i32 = 5;
pub const GRIPPER_OPEN_DEG: i32 = 30;
pub const GRIPPER_CLOSED_DEG: i32 = 90;

pub trait ArmHal {
    /// One-time actuator enable; must be called before the first write.
    fn power_up(&mut self) -> anyhow::Result<()>;
    fn write_angle(&mut self, joint: Joint, angle_deg: i32) -> anyhow::Result<()>;
    /// Blocking dwell to let the mechanics catch up with the last write.
    fn settle(&mut self, dwell: Duration) -> anyhow::Result<()>;
    fn dump(&self) -> anyhow::Result<()>;
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Joint {
    Wrist,
    Base,
    Shoulder,
    Elbow,
    Gripper,
}

impl Joint {
    pub const ALL: [Joint; 5] = [
        Joint::Wrist,
        Joint::Base,
        Joint::Shoulder,
        Joint::Elbow,
        Joint::Gripper,
    ];

    /// Servo number 1-5, which is also the servo's bus ID.
    pub fn number(&self) -> u8 {
        match self {
            Joint::Wrist => 1,
            Joint::Base => 2,
            Joint::Shoulder => 3,
            Joint::Elbow => 4,
            Joint::Gripper => 5,
        }
    }

    pub fn from_number(number: i32) -> Option<Joint> {
        match number {
            1 => Some(Joint::Wrist),
            2 => Some(Joint::Base),
            3 => Some(Joint::Shoulder),
            4 => Some(Joint::Elbow),
            5 => Some(Joint::Gripper),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Wrist => "wrist",
            Joint::Base => "base",
            Joint::Shoulder => "shoulder",
            Joint::Elbow => "elbow",
            Joint::Gripper => "gripper",
        }
    }
}
