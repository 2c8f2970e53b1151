use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use log::{debug, info, trace};
use serialport::SerialPort;

use crate::arm_hal::{ArmHal, Joint};
use crate::feetech::bus;
use crate::feetech::calibration::CalibrationData;

const PORT_TIMEOUT: Duration = Duration::from_millis(100);

/// The real arm: five Feetech STS servos daisy-chained on one serial bus,
/// bus IDs matching the servo numbers. Runtime traffic is write-only; the
/// arm has no feedback path outside the calibration tool.
pub struct ArmHalFeetech {
    port: Box<dyn SerialPort>,
    calibration: CalibrationData,
    device: String,
}

impl ArmHalFeetech {
    pub fn open(device: &str, baud: u32, calibration: CalibrationData) -> anyhow::Result<Self> {
        let port = serialport::new(device, baud)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(PORT_TIMEOUT)
            .open()
            .with_context(|| format!("opening servo bus at {device}"))?;
        info!("servo bus open at {device}, {baud} baud");
        Ok(Self { port, calibration, device: device.to_owned() })
    }

    fn send(&mut self, packet: &[u8]) -> anyhow::Result<()> {
        trace!("tx {packet:02x?}");
        self.port.write_all(packet)?;
        self.port.flush()?;
        Ok(())
    }
}

impl ArmHal for ArmHalFeetech {
    fn power_up(&mut self) -> anyhow::Result<()> {
        for joint in Joint::ALL {
            self.send(&bus::write_u8(joint.number(), bus::REG_TORQUE_ENABLE, 1))
                .with_context(|| format!("enabling torque on the {}", joint.name()))?;
        }
        Ok(())
    }

    fn write_angle(&mut self, joint: Joint, angle_deg: i32) -> anyhow::Result<()> {
        let ticks = self.calibration.for_joint(joint).ticks_for_deg(angle_deg);
        debug!("{} -> {angle_deg}° ({ticks} ticks)", joint.name());
        self.send(&bus::write_u16(joint.number(), bus::REG_GOAL_POSITION, ticks))
            .with_context(|| format!("moving the {}", joint.name()))
    }

    fn settle(&mut self, dwell: Duration) -> anyhow::Result<()> {
        thread::sleep(dwell);
        Ok(())
    }

    fn dump(&self) -> anyhow::Result<()> {
        debug!("feetech bus on {}", self.device);
        for joint in Joint::ALL {
            debug!("  {}: {:?}", joint.name(), self.calibration.for_joint(joint));
        }
        Ok(())
    }
}
