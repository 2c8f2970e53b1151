//! Per-joint mapping from the 0-180° command space onto raw servo ticks.
//!
//! The defaults put 0-180 across the middle half-turn of the 4096-tick
//! circle, which is about right for an uncalibrated build. `servo_calibrate`
//! captures each joint's real usable range into a JSON file that the console
//! loads with `--calibration`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::arm_hal::{Joint, ANGLE_MAX, ANGLE_MIN};
use crate::feetech::bus::TICKS_PER_REV;

pub const DEFAULT_MIN_TICKS: u16 = TICKS_PER_REV / 4;
pub const DEFAULT_MAX_TICKS: u16 = 3 * (TICKS_PER_REV / 4);

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct JointCalibration {
    pub id: u8,
    pub min_ticks: u16,
    pub max_ticks: u16,
}

impl JointCalibration {
    pub fn default_for(joint: Joint) -> Self {
        Self {
            id: joint.number(),
            min_ticks: DEFAULT_MIN_TICKS,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }

    /// 0° lands on `min_ticks`, 180° on `max_ticks`, linear in between.
    pub fn ticks_for_deg(&self, angle_deg: i32) -> u16 {
        let angle = angle_deg.clamp(ANGLE_MIN, ANGLE_MAX);
        let span = i32::from(self.max_ticks) - i32::from(self.min_ticks);
        let offset = (angle * span + ANGLE_MAX / 2) / ANGLE_MAX;
        (i32::from(self.min_ticks) + offset) as u16
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CalibrationData {
    pub joints: Vec<JointCalibration>,
}

impl Default for CalibrationData {
    fn default() -> Self {
        Self {
            joints: Joint::ALL.iter().map(|j| JointCalibration::default_for(*j)).collect(),
        }
    }
}

impl CalibrationData {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let data = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(data)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Falls back to the default span for joints missing from the file.
    pub fn for_joint(&self, joint: Joint) -> JointCalibration {
        self.joints
            .iter()
            .copied()
            .find(|c| c.id == joint.number())
            .unwrap_or_else(|| JointCalibration::default_for(joint))
    }
}
