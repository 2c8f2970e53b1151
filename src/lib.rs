pub mod arm_hal;
pub mod arm_hal_factory;
pub mod arm_hal_mock;
pub mod command;
pub mod console;
pub mod controller;
pub mod feetech;
pub mod pose;
pub mod presets;
pub mod routine;
