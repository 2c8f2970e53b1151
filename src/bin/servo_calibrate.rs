//! Captures each joint's real range of motion into a calibration file.
//!
//! ```sh
//! cargo run --bin servo_calibrate -- /dev/ttyACM0
//! cargo run --bin servo_calibrate -- /dev/ttyACM0 my_arm.json
//! ```
//!
//! With torque off, sweep every joint by hand from stop to stop while the
//! tool polls positions and tracks each joint's min and max. Press Enter
//! when done and the ranges land in the output file (default
//! `calibration.json`), ready for `arm_console --calibration`.

use std::collections::HashMap;
use std::io;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use armbot::arm_hal::Joint;
use armbot::arm_hal_factory::DEFAULT_BAUD;
use armbot::feetech::bus;
use armbot::feetech::calibration::{CalibrationData, JointCalibration};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: servo_calibrate <device> [output.json]");
        eprintln!("  e.g. servo_calibrate /dev/ttyACM0 my_arm.json");
        std::process::exit(1);
    }
    let device = &args[1];
    let output_path = args.get(2).map(String::as_str).unwrap_or("calibration.json");

    let mut port = serialport::new(device, DEFAULT_BAUD)
        .timeout(Duration::from_millis(50))
        .open()?;

    for joint in Joint::ALL {
        port.write_all(&bus::ping(joint.number()))?;
        port.flush()?;
        match bus::read_status(&mut port) {
            Ok(status) if status.id == joint.number() => {}
            _ => eprintln!("{} (id {}) did not answer a ping", joint.name(), joint.number()),
        }
    }

    println!("Calibrating {} joints on {device}", Joint::ALL.len());
    println!("Sweep every joint through its full range of motion by hand.");
    println!("Press Enter when done.\n");

    // Background thread waits for Enter so the polling loop stays simple.
    let done = Arc::new(AtomicBool::new(false));
    let done2 = done.clone();
    std::thread::spawn(move || {
        let mut buf = [0u8; 1];
        let _ = io::stdin().read(&mut buf);
        done2.store(true, Ordering::Relaxed);
    });

    let mut mins: HashMap<Joint, u16> = HashMap::new();
    let mut maxs: HashMap<Joint, u16> = HashMap::new();
    let mut cycles = 0u64;
    while !done.load(Ordering::Relaxed) {
        for joint in Joint::ALL {
            if let Ok(pos) = bus::read_present_position(&mut port, joint.number()) {
                let min = mins.entry(joint).or_insert(pos);
                *min = (*min).min(pos);
                let max = maxs.entry(joint).or_insert(pos);
                *max = (*max).max(pos);
            }
        }
        cycles += 1;

        if cycles % 30 == 0 {
            print!("\r");
            for joint in Joint::ALL {
                print!(
                    "  {}:[{:>4}-{:>4}]",
                    joint.number(),
                    mins.get(&joint).copied().unwrap_or(0),
                    maxs.get(&joint).copied().unwrap_or(0)
                );
            }
            io::stdout().flush().ok();
        }
    }
    println!("\n");

    let mut joints = Vec::new();
    for joint in Joint::ALL {
        match (mins.get(&joint), maxs.get(&joint)) {
            (Some(&min_ticks), Some(&max_ticks)) if min_ticks < max_ticks => {
                joints.push(JointCalibration { id: joint.number(), min_ticks, max_ticks });
            }
            _ => {
                eprintln!("no readings from the {}, keeping the default span", joint.name());
                joints.push(JointCalibration::default_for(joint));
            }
        }
    }

    let data = CalibrationData { joints };
    data.save(output_path)?;

    println!("Saved to {output_path}:");
    for cal in &data.joints {
        println!(
            "  servo {:>2}: min={:>4}  max={:>4}  range={:>4}",
            cal.id,
            cal.min_ticks,
            cal.max_ticks,
            cal.max_ticks - cal.min_ticks
        );
    }
    Ok(())
}
