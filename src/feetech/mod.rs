pub mod arm_hal_feetech;
pub mod bus;
pub mod calibration;
