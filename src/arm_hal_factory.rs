use std::path::{Path, PathBuf};

use log::info;

use crate::arm_hal::ArmHal;
use crate::arm_hal_mock::ArmHalMock;
use crate::feetech::arm_hal_feetech::ArmHalFeetech;
use crate::feetech::calibration::CalibrationData;

pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD: u32 = 1_000_000;

pub struct ArmHalFactory {
    pub device: String,
    pub baud: u32,
    pub calibration_path: Option<PathBuf>,
    pub force_mock: bool,
}

impl Default for ArmHalFactory {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_owned(),
            baud: DEFAULT_BAUD,
            calibration_path: None,
            force_mock: false,
        }
    }
}

impl ArmHalFactory {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_maybe_mock(force_mock: bool) -> Self {
        Self { force_mock, ..Default::default() }
    }

    pub fn create_hal(&self) -> anyhow::Result<Box<dyn ArmHal>> {
        if !self.force_mock && Path::new(&self.device).exists() {
            let calibration = match &self.calibration_path {
                Some(path) => CalibrationData::load(path)?,
                None => CalibrationData::default(),
            };
            Ok(Box::new(ArmHalFeetech::open(&self.device, self.baud, calibration)?))
        } else {
            info!("no servo bus at {}, running against the mock arm", self.device);
            Ok(Box::new(ArmHalMock::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm_hal::Joint;

    #[test]
    fn test_force_mock_yields_a_working_hal() {
        let factory = ArmHalFactory::new_maybe_mock(true);
        let mut hal = factory.create_hal().unwrap();
        hal.power_up().unwrap();
        hal.write_angle(Joint::Base, 90).unwrap();
    }

    #[test]
    fn test_defaults_point_at_the_usual_bus() {
        let factory = ArmHalFactory::new();
        assert_eq!(factory.device, DEFAULT_DEVICE);
        assert_eq!(factory.baud, DEFAULT_BAUD);
        assert!(!factory.force_mock);
    }
}
