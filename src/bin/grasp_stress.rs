//! Soak test for one grasp sequence: run it in a loop so mechanical slop,
//! loose horns, and drifting calibration show up before a demo does.
//!
//! ```sh
//! cargo run --bin grasp_stress -- cube 25
//! cargo run --bin grasp_stress -- boat 3 fake
//! ```
//!
//! Re-stage the object by hand between runs. Falls back to the mock arm when
//! the servo bus isn't plugged in (pass `fake` to force that), which makes it
//! a cheap smoke test too.

use std::env;

use anyhow::anyhow;

use armbot::arm_hal_factory::ArmHalFactory;
use armbot::controller::{ArmController, STARTUP_SETTLE};
use armbot::presets::GraspTarget;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<_> = env::args().collect();
    let target_str = args.get(1).cloned().unwrap_or_else(|| "cube".to_owned());
    let target = GraspTarget::from_name(&target_str)
        .ok_or_else(|| anyhow!("no grasp sequence named '{target_str}'"))?;
    let num_runs_str = args.get(2).cloned().unwrap_or_else(|| "10".to_owned());
    let num_runs: u32 = num_runs_str.parse()?;
    let force_mock = match args.get(3).map(String::as_str) {
        Some("fake") => true,
        Some(other) => return Err(anyhow!("unexpected argument '{other}'")),
        None => false,
    };

    let mut hal = ArmHalFactory::new_maybe_mock(force_mock).create_hal()?;
    hal.power_up()?;
    let mut controller = ArmController::new(hal);
    controller.move_home(STARTUP_SETTLE)?;

    for i in 0..num_runs {
        println!("Starting {} run #{i}...", target.name());
        controller.run_grasp(target)?;
    }
    println!("Successful stress test!");
    Ok(())
}
