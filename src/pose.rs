use serde::{Deserialize, Serialize};

use crate::arm_hal::Joint;

/// The five tracked angles, indexed by servo number order (wrist, base,
/// shoulder, elbow, gripper), degrees 0-180.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct ArmPose {
    pub angles: [i32; 5],
}

impl ArmPose {
    pub const HOME: ArmPose = ArmPose { angles: [90, 45, 100, 0, 90] };

    pub fn new(angles: [i32; 5]) -> Self {
        Self { angles }
    }

    pub fn get(&self, joint: Joint) -> i32 {
        self.angles[usize::from(joint.number() - 1)]
    }

    pub fn set(&mut self, joint: Joint, angle_deg: i32) {
        self.angles[usize::from(joint.number() - 1)] = angle_deg;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, i32)> + '_ {
        Joint::ALL.into_iter().map(move |joint| (joint, self.get(joint)))
    }
}
