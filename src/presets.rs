//! Canned grasp choreography, one table per object shape.
//!
//! Each step writes some subset of the joints and then dwells while the
//! mechanics settle. The angles were tuned by hand against the physical
//! objects; to retune, replay a table through the console (`grasp_dump`
//! prints it in replayable `move` form), adjust, and copy the numbers back.

use crate::arm_hal::Joint;
use crate::arm_hal::{GRIPPER_CLOSED_DEG, GRIPPER_OPEN_DEG};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GraspTarget {
    Cube,
    Cylinder,
    Hat,
    Boat,
}

impl GraspTarget {
    pub const ALL: [GraspTarget; 4] = [
        GraspTarget::Cube,
        GraspTarget::Cylinder,
        GraspTarget::Hat,
        GraspTarget::Boat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GraspTarget::Cube => "cube",
            GraspTarget::Cylinder => "cylinder",
            GraspTarget::Hat => "hat",
            GraspTarget::Boat => "boat",
        }
    }

    pub fn from_name(name: &str) -> Option<GraspTarget> {
        GraspTarget::ALL.into_iter().find(|t| t.name() == name)
    }
}

pub struct GraspStep {
    pub writes: &'static [(Joint, i32)],
    pub settle_ms: u64,
}

/// Pause between sequences when demoing all four back to back.
pub const DEMO_PAUSE_MS: u64 = 2000;

pub fn grasp_steps(target: GraspTarget) -> &'static [GraspStep] {
    match target {
        GraspTarget::Cube => CUBE,
        GraspTarget::Cylinder => CYLINDER,
        GraspTarget::Hat => HAT,
        GraspTarget::Boat => BOAT,
    }
}

static CUBE: &[GraspStep] = &[
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Base, 0),
            (Joint::Shoulder, 150),
            (Joint::Elbow, 100),
            (Joint::Wrist, 90),
        ],
        settle_ms: 1000,
    },
    GraspStep { writes: &[(Joint::Wrist, 50)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_CLOSED_DEG)], settle_ms: 500 },
    GraspStep { writes: &[(Joint::Shoulder, 170)], settle_ms: 800 },
    GraspStep { writes: &[(Joint::Base, 170)], settle_ms: 1000 },
    GraspStep {
        writes: &[(Joint::Shoulder, 60), (Joint::Wrist, 60), (Joint::Elbow, 55)],
        settle_ms: 800,
    },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Elbow, 0),
            (Joint::Shoulder, 100),
            (Joint::Wrist, 90),
            (Joint::Base, 45),
        ],
        settle_ms: 500,
    },
];

static CYLINDER: &[GraspStep] = &[
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Base, 45),
            (Joint::Shoulder, 25),
            (Joint::Elbow, 0),
            (Joint::Wrist, 90),
        ],
        settle_ms: 1000,
    },
    GraspStep { writes: &[(Joint::Shoulder, 10)], settle_ms: 800 },
    GraspStep { writes: &[(Joint::Wrist, 100)], settle_ms: 800 },
    // Partial close; squeezing to 90 knocks the cylinder over.
    GraspStep { writes: &[(Joint::Gripper, 75)], settle_ms: 500 },
    GraspStep { writes: &[(Joint::Shoulder, 45), (Joint::Wrist, 50)], settle_ms: 800 },
    GraspStep { writes: &[(Joint::Base, 130)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Shoulder, 25), (Joint::Wrist, 60)], settle_ms: 800 },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[(Joint::Shoulder, 100), (Joint::Wrist, 90), (Joint::Base, 45)],
        settle_ms: 500,
    },
];

static HAT: &[GraspStep] = &[
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Base, 0),
            (Joint::Shoulder, 150),
            (Joint::Elbow, 90),
            (Joint::Wrist, 90),
        ],
        settle_ms: 1000,
    },
    GraspStep { writes: &[(Joint::Shoulder, 140), (Joint::Wrist, 70)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_CLOSED_DEG)], settle_ms: 500 },
    GraspStep { writes: &[(Joint::Shoulder, 160)], settle_ms: 800 },
    GraspStep { writes: &[(Joint::Base, 50)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Shoulder, 120), (Joint::Wrist, 60)], settle_ms: 800 },
    // Short nudge so the brim drops flat before release.
    GraspStep { writes: &[(Joint::Base, 170)], settle_ms: 180 },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Elbow, 0),
            (Joint::Shoulder, 100),
            (Joint::Wrist, 90),
            (Joint::Base, 45),
        ],
        settle_ms: 500,
    },
];

static BOAT: &[GraspStep] = &[
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[
            (Joint::Base, 0),
            (Joint::Shoulder, 35),
            (Joint::Elbow, 10),
            (Joint::Wrist, 120),
        ],
        settle_ms: 1000,
    },
    GraspStep { writes: &[(Joint::Shoulder, 30), (Joint::Wrist, 105)], settle_ms: 1000 },
    // Hull is fragile, stop the close early.
    GraspStep { writes: &[(Joint::Gripper, 70)], settle_ms: 600 },
    GraspStep { writes: &[(Joint::Shoulder, 45), (Joint::Wrist, 65)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Base, 170)], settle_ms: 1200 },
    GraspStep { writes: &[(Joint::Shoulder, 45), (Joint::Wrist, 20)], settle_ms: 1000 },
    GraspStep { writes: &[(Joint::Gripper, GRIPPER_OPEN_DEG)], settle_ms: 500 },
    GraspStep {
        writes: &[(Joint::Shoulder, 100), (Joint::Wrist, 90), (Joint::Base, 45)],
        settle_ms: 500,
    },
];
