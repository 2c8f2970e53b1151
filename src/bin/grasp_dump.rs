//! Prints a grasp sequence as the cumulative pose after each step, in the
//! console's own `move a1 a2 a3 a4 a5` form. Useful for retuning: replay a
//! line, nudge joints, and copy the result back into the table.

use clap::Parser;

use armbot::pose::ArmPose;
use armbot::presets::{self, GraspTarget};

#[derive(Parser, Debug)]
#[clap(name = "grasp_dump")]
struct Opts {
    /// cube, cylinder, hat, boat, or all.
    #[clap(default_value = "all")]
    target: String,
}

fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();
    let targets: Vec<GraspTarget> = if opts.target == "all" {
        GraspTarget::ALL.to_vec()
    } else {
        match GraspTarget::from_name(&opts.target) {
            Some(target) => vec![target],
            None => anyhow::bail!("no grasp sequence named '{}'", opts.target),
        }
    };

    for target in targets {
        println!("# {} ({} steps)", target.name(), presets::grasp_steps(target).len());
        let mut pose = ArmPose::HOME;
        for step in presets::grasp_steps(target) {
            for &(joint, angle_deg) in step.writes {
                pose.set(joint, angle_deg);
            }
            let angles: Vec<String> = pose.angles.iter().map(|a| a.to_string()).collect();
            println!("move {}  # dwell {}ms", angles.join(" "), step.settle_ms);
        }
        println!();
    }
    Ok(())
}
