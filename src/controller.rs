use std::time::Duration;

use log::{debug, info};

use crate::arm_hal::{ArmHal, Joint, ANGLE_MAX, ANGLE_MIN, GRIPPER_CLOSED_DEG, GRIPPER_OPEN_DEG};
use crate::pose::ArmPose;
use crate::presets;
use crate::presets::{GraspTarget, DEMO_PAUSE_MS};
use crate::routine::Routine;

/// Dwell after a full-pose move so the mechanics stop ringing.
pub const MOVE_SETTLE: Duration = Duration::from_millis(500);
/// Longer dwell for the power-on move, the arm may start far from home.
pub const STARTUP_SETTLE: Duration = Duration::from_millis(1000);
pub const GRIPPER_SETTLE: Duration = Duration::from_millis(500);
/// Dwell on each recorded waypoint during routine playback.
pub const WAYPOINT_SETTLE: Duration = Duration::from_millis(1500);

/// Owns the arm. Every servo write in the process flows through here so the
/// tracked pose never drifts from the last commanded angles.
pub struct ArmController {
    hal: Box<dyn ArmHal>,
    pose: ArmPose,
}

impl ArmController {
    pub fn new(hal: Box<dyn ArmHal>) -> Self {
        Self { hal, pose: ArmPose::HOME }
    }

    pub fn pose(&self) -> ArmPose {
        self.pose
    }

    fn write_joint(&mut self, joint: Joint, angle_deg: i32) -> anyhow::Result<()> {
        self.hal.write_angle(joint, angle_deg)?;
        self.pose.set(joint, angle_deg);
        Ok(())
    }

    /// Nudge one joint, clamped to the 0-180 travel. Returns the angle the
    /// joint ended up at; at the stops that is a rewrite of the old angle.
    pub fn jog(&mut self, joint: Joint, delta_deg: i32) -> anyhow::Result<i32> {
        let target = (self.pose.get(joint) + delta_deg).clamp(ANGLE_MIN, ANGLE_MAX);
        self.write_joint(joint, target)?;
        Ok(target)
    }

    pub fn set_joint(&mut self, joint: Joint, angle_deg: i32) -> anyhow::Result<()> {
        self.write_joint(joint, angle_deg)
    }

    pub fn goto_pose(&mut self, pose: ArmPose, settle: Duration) -> anyhow::Result<()> {
        for (joint, angle_deg) in pose.iter() {
            self.write_joint(joint, angle_deg)?;
        }
        self.hal.settle(settle)
    }

    pub fn move_all(&mut self, angles: [i32; 5]) -> anyhow::Result<()> {
        self.goto_pose(ArmPose::new(angles), MOVE_SETTLE)
    }

    pub fn move_home(&mut self, settle: Duration) -> anyhow::Result<()> {
        self.goto_pose(ArmPose::HOME, settle)
    }

    pub fn open_gripper(&mut self) -> anyhow::Result<()> {
        self.write_joint(Joint::Gripper, GRIPPER_OPEN_DEG)?;
        self.hal.settle(GRIPPER_SETTLE)
    }

    pub fn close_gripper(&mut self) -> anyhow::Result<()> {
        self.write_joint(Joint::Gripper, GRIPPER_CLOSED_DEG)?;
        self.hal.settle(GRIPPER_SETTLE)
    }

    pub fn run_grasp(&mut self, target: GraspTarget) -> anyhow::Result<()> {
        info!("running the {} sequence", target.name());
        for step in presets::grasp_steps(target) {
            for &(joint, angle_deg) in step.writes {
                self.write_joint(joint, angle_deg)?;
            }
            self.hal.settle(Duration::from_millis(step.settle_ms))?;
        }
        info!("{} sequence complete", target.name());
        Ok(())
    }

    pub fn run_demo(&mut self) -> anyhow::Result<()> {
        for target in GraspTarget::ALL {
            self.hal.settle(Duration::from_millis(DEMO_PAUSE_MS))?;
            self.run_grasp(target)?;
        }
        self.hal.settle(Duration::from_millis(DEMO_PAUSE_MS))
    }

    /// Replays a recorded routine between two homing moves; routines are
    /// recorded relative to the home pose, and playback parks the arm there.
    pub fn play_routine(&mut self, routine: &Routine) -> anyhow::Result<()> {
        self.move_home(MOVE_SETTLE)?;
        for waypoint in &routine.waypoints {
            self.goto_pose(*waypoint, WAYPOINT_SETTLE)?;
        }
        self.move_home(MOVE_SETTLE)
    }

    pub fn dump_hal(&self) {
        if let Err(e) = self.hal.dump() {
            debug!("hal dump failed: {e:?}");
        }
    }
}
