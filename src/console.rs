use std::io::{BufRead, Write};

use derive_new::new;
use log::error;

use crate::command::Command;
use crate::controller::{ArmController, MOVE_SETTLE};
use crate::routine::RoutineStore;

const HELP: &str = "\
commands:
  w/s   shoulder up/down       a/d   base left/right
  q/e   elbow up/down          z/x   wrist up/down
  [ or open    open gripper    ] or close   close gripper
  set <servo 1-5> <angle 0-180>
  move <a1> <a2> <a3> <a4> <a5>
  cube | cylinder | hat | boat    run that grasp sequence
  demo                            run all four sequences
  record <name>   add the current pose to a routine
  play <name> | routines | erase <name>
  status | save | reset | help | quit";

/// Line-at-a-time command interpreter. One command runs to completion
/// (including its dwells) before the next line is read; there is no queue
/// and no concurrency.
#[derive(new)]
pub struct Console {
    controller: ArmController,
    routines: RoutineStore,
}

enum Flow {
    Continue,
    Quit,
}

impl Console {
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
        writeln!(out, "arm console ready, 5 servos at home")?;
        writeln!(out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            match self.dispatch(&line, &mut out)? {
                Flow::Quit => break,
                Flow::Continue => {}
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, line: &str, out: &mut impl Write) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let command = match Command::try_from(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                return Ok(Flow::Continue);
            }
        };
        match self.execute(command, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                // Keep taking commands; the peer decides what to do about it.
                error!("command failed: {e:?}");
                self.controller.dump_hal();
                writeln!(out, "error: {e:#}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Jog { joint, delta_deg } => {
                let angle = self.controller.jog(joint, delta_deg)?;
                writeln!(out, "{} -> {angle}°", joint.name())?;
            }
            Command::OpenGripper => {
                self.controller.open_gripper()?;
                writeln!(out, "gripper open")?;
            }
            Command::CloseGripper => {
                self.controller.close_gripper()?;
                writeln!(out, "gripper closed")?;
            }
            Command::Set { joint, angle_deg } => {
                self.controller.set_joint(joint, angle_deg)?;
                writeln!(out, "{} -> {angle_deg}°", joint.name())?;
            }
            Command::MoveAll { angles } => {
                self.controller.move_all(angles)?;
                writeln!(out, "moved")?;
            }
            Command::Grasp(target) => {
                writeln!(out, "grasping the {}...", target.name())?;
                out.flush()?;
                self.controller.run_grasp(target)?;
                writeln!(out, "{} done", target.name())?;
            }
            Command::Demo => {
                writeln!(out, "demonstrating all four sequences...")?;
                out.flush()?;
                self.controller.run_demo()?;
                writeln!(out, "demo done")?;
            }
            Command::Record { name } => {
                let count = self.routines.append(&name, self.controller.pose())?;
                writeln!(out, "{name}: {count} waypoint(s)")?;
            }
            Command::Play { name } => match self.routines.load(&name)? {
                Some(routine) if !routine.waypoints.is_empty() => {
                    writeln!(out, "playing {name}, {} waypoint(s)...", routine.waypoints.len())?;
                    out.flush()?;
                    self.controller.play_routine(&routine)?;
                    writeln!(out, "{name} done")?;
                }
                _ => writeln!(out, "error: no routine named '{name}'")?,
            },
            Command::Routines => {
                let routines = self.routines.list()?;
                if routines.is_empty() {
                    writeln!(out, "no routines recorded")?;
                }
                for (name, count) in routines {
                    writeln!(out, "  {name} ({count} waypoints)")?;
                }
            }
            Command::Erase { name } => {
                if self.routines.delete(&name)? {
                    writeln!(out, "erased {name}")?;
                } else {
                    writeln!(out, "error: no routine named '{name}'")?;
                }
            }
            Command::Status => {
                for (joint, angle) in self.controller.pose().iter() {
                    writeln!(out, "  {:<8} {:>3}°", joint.name(), angle)?;
                }
            }
            Command::Save => {
                let angles: Vec<String> =
                    self.controller.pose().angles.iter().map(|a| a.to_string()).collect();
                writeln!(out, "pose: move {}", angles.join(" "))?;
                writeln!(out, "use 'record <name>' to add it to a routine")?;
            }
            Command::Reset => {
                self.controller.move_home(MOVE_SETTLE)?;
                writeln!(out, "reset to home")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                writeln!(out, "bye")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::arm_hal::Joint;
    use crate::arm_hal_mock::{ArmHalMock, MockJournal};
    use crate::routine::RoutineStore;

    fn test_console(tag: &str) -> (Console, MockJournal, std::path::PathBuf) {
        let mock = ArmHalMock::new();
        let journal = mock.journal();
        let controller = ArmController::new(Box::new(mock));
        let dir = std::env::temp_dir()
            .join(format!("armbot-console-test-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        (Console::new(controller, RoutineStore::new(dir.clone())), journal, dir)
    }

    fn run_script(tag: &str, script: &str) -> (String, MockJournal) {
        let (mut console, journal, _dir) = test_console(tag);
        let mut out = Vec::new();
        console.run(Cursor::new(script.to_owned()), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), journal)
    }

    #[test]
    fn test_jog_then_status_reports_the_new_angle() {
        let (output, journal) = run_script("jog", "w\nstatus\n");
        assert!(output.contains("shoulder -> 105°"), "{output}");
        assert!(output.contains("shoulder 105°"), "{output}");
        assert_eq!(journal.writes(), vec![(Joint::Shoulder, 105)]);
    }

    #[test]
    fn test_empty_lines_are_ignored() {
        let (output, _) = run_script("empty", "\n   \n\n");
        assert!(!output.contains("error"), "{output}");
    }

    #[test]
    fn test_unknown_command_reports_an_error_and_keeps_going() {
        let (output, journal) = run_script("unknown", "dance\nw\n");
        assert!(output.contains("error: unknown command"), "{output}");
        assert_eq!(journal.writes(), vec![(Joint::Shoulder, 105)]);
    }

    #[test]
    fn test_grasp_runs_to_completion() {
        let (output, journal) = run_script("grasp", "cube\n");
        assert!(output.contains("grasping the cube..."), "{output}");
        assert!(output.contains("cube done"), "{output}");
        assert_eq!(journal.writes()[0], (Joint::Gripper, 30));
    }

    #[test]
    fn test_quit_stops_reading_commands() {
        let (output, journal) = run_script("quit", "quit\nw\n");
        assert!(output.contains("bye"), "{output}");
        assert!(journal.writes().is_empty());
    }

    #[test]
    fn test_routine_record_play_erase_cycle() {
        let script = "record pick\nw\nrecord pick\nroutines\nplay pick\nerase pick\nplay pick\n";
        let (output, journal) = run_script("routine", script);
        assert!(output.contains("pick: 1 waypoint(s)"), "{output}");
        assert!(output.contains("pick: 2 waypoint(s)"), "{output}");
        assert!(output.contains("pick (2 waypoints)"), "{output}");
        assert!(output.contains("pick done"), "{output}");
        assert!(output.contains("error: no routine named 'pick'"), "{output}");

        // Playback: the jog write, then home, two waypoints, home again.
        assert_eq!(journal.writes().len(), 1 + 5 + 5 + 5 + 5);
    }

    #[test]
    fn test_play_refuses_a_hand_edited_file_with_bad_angles() {
        let (mut console, journal, dir) = test_console("badfile");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("wild.json"),
            r#"{"waypoints":[{"angles":[999,-40,90,0,90]}]}"#,
        )
        .unwrap();

        let mut out = Vec::new();
        console.run(Cursor::new("play wild\nsave\n".to_owned()), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("error"), "{output}");
        // Nothing reached the servos and the tracked pose is still home.
        assert!(journal.writes().is_empty(), "{output}");
        assert!(output.contains("pose: move 90 45 100 0 90"), "{output}");
    }

    #[test]
    fn test_save_prints_a_replayable_move_line() {
        let (output, _) = run_script("save", "set 4 35\nsave\n");
        assert!(output.contains("pose: move 90 45 100 35 90"), "{output}");
    }

    #[test]
    fn test_reset_rewrites_the_home_pose() {
        let (output, journal) = run_script("reset", "move 10 20 30 40 50\nreset\n");
        assert!(output.contains("reset to home"), "{output}");
        let writes = journal.writes();
        assert_eq!(
            writes[writes.len() - 5..].to_vec(),
            vec![
                (Joint::Wrist, 90),
                (Joint::Base, 45),
                (Joint::Shoulder, 100),
                (Joint::Elbow, 0),
                (Joint::Gripper, 90),
            ]
        );
    }
}
