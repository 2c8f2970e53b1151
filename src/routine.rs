use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{bail, Context};
use derive_new::new;
use log::warn;
use serde_derive::{Deserialize, Serialize};

use crate::arm_hal::{ANGLE_MAX, ANGLE_MIN};
use crate::pose::ArmPose;

/// A recorded routine: poses captured with `record`, replayed in order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub waypoints: Vec<ArmPose>,
}

/// One JSON file per routine under a flat directory. Names are validated at
/// parse time, so everything reaching here is a safe file stem.
#[derive(new)]
pub struct RoutineStore {
    dir: PathBuf,
}

impl RoutineStore {
    /// Routine files are hand-editable, so waypoint angles are range-checked
    /// here; a file that parses but commands an impossible angle is an error.
    pub fn load(&self, name: &str) -> anyhow::Result<Option<Routine>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        let routine: Routine = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        for waypoint in &routine.waypoints {
            for (joint, angle) in waypoint.iter() {
                if !(ANGLE_MIN..=ANGLE_MAX).contains(&angle) {
                    bail!(
                        "{}: {} angle {angle} is outside {ANGLE_MIN}..={ANGLE_MAX}",
                        path.display(),
                        joint.name()
                    );
                }
            }
        }
        Ok(Some(routine))
    }

    /// Appends a waypoint, creating the routine (and the directory) on first
    /// use. Returns how many waypoints the routine now has.
    pub fn append(&self, name: &str, waypoint: ArmPose) -> anyhow::Result<usize> {
        let mut routine = self.load(name)?.unwrap_or_default();
        routine.waypoints.push(waypoint);
        self.save(name, &routine)?;
        Ok(routine.waypoints.len())
    }

    pub fn save(&self, name: &str, routine: &Routine) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path_for(name);
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), routine)?;
        Ok(())
    }

    /// Returns whether there was anything to erase.
    pub fn delete(&self, name: &str) -> anyhow::Result<bool> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        Ok(true)
    }

    /// Name and waypoint count of every readable routine, sorted by name.
    pub fn list(&self) -> anyhow::Result<Vec<(String, usize)>> {
        let mut routines = Vec::new();
        if !self.dir.exists() {
            return Ok(routines);
        }
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_owned(),
                None => continue,
            };
            match self.load(&name) {
                Ok(Some(routine)) => routines.push((name, routine.waypoints.len())),
                Ok(None) => {}
                Err(e) => warn!("skipping unreadable routine '{name}': {e:?}"),
            }
        }
        routines.sort();
        Ok(routines)
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}
