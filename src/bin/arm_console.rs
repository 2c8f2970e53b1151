//! Interactive console for the 5-servo arm.
//!
//! Reads one command per line on stdin and replies on stdout, so it can sit
//! behind a UART getty, an ssh session, or a pipe. Without the servo device
//! present (or with --fake-hw) everything runs against the mock arm, which
//! is handy for editing grasp tables away from the hardware.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use armbot::arm_hal_factory::ArmHalFactory;
use armbot::console::Console;
use armbot::controller::{ArmController, STARTUP_SETTLE};
use armbot::routine::RoutineStore;

#[derive(Parser, Debug)]
#[clap(name = "arm_console")]
struct Opts {
    /// Serial device of the servo bus.
    #[clap(long, default_value = "/dev/ttyACM0")]
    device: String,

    #[clap(long, default_value = "1000000")]
    baud: u32,

    /// Joint tick ranges captured by servo_calibrate.
    #[clap(long)]
    calibration: Option<PathBuf>,

    /// Where recorded routines live.
    #[clap(long, default_value = "routines")]
    routine_dir: PathBuf,

    #[clap(long)]
    fake_hw: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    let factory = ArmHalFactory {
        device: opts.device,
        baud: opts.baud,
        calibration_path: opts.calibration,
        force_mock: opts.fake_hw,
    };
    let mut hal = factory.create_hal()?;
    hal.power_up()?;

    let mut controller = ArmController::new(hal);
    controller.move_home(STARTUP_SETTLE)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(controller, RoutineStore::new(opts.routine_dir));
    console.run(stdin.lock(), stdout.lock())
}
