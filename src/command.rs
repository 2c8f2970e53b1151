//! One-line command language shared by the console and anything scripting it.
//!
//! Whole lines are lowercased before matching, so the language is
//! case-insensitive and routine names are stored lowercase.

use thiserror::Error;

use crate::arm_hal::{Joint, ANGLE_MAX, ANGLE_MIN, JOG_STEP_DEG};
use crate::presets::GraspTarget;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Jog { joint: Joint, delta_deg: i32 },
    OpenGripper,
    CloseGripper,
    Set { joint: Joint, angle_deg: i32 },
    MoveAll { angles: [i32; 5] },
    Grasp(GraspTarget),
    Demo,
    Record { name: String },
    Play { name: String },
    Routines,
    Erase { name: String },
    Status,
    Save,
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("unknown command, try 'help'")]
    UnknownCommand,
    #[error("servo number must be 1-5")]
    BadJoint,
    #[error("angle must be 0-180")]
    BadAngle,
    #[error("routine names are 1-32 chars of a-z, 0-9, '-' or '_'")]
    BadRoutineName,
    #[error("usage: {0}")]
    Usage(&'static str),
}

const SET_USAGE: &str = "set <servo 1-5> <angle 0-180>";
const MOVE_USAGE: &str = "move <a1> <a2> <a3> <a4> <a5>";
const RECORD_USAGE: &str = "record <name>";
const PLAY_USAGE: &str = "play <name>";
const ERASE_USAGE: &str = "erase <name>";

impl TryFrom<&str> for Command {
    type Error = ParseCommandError;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let lowered = line.trim().to_lowercase();
        let mut tokens = lowered.split_whitespace();
        let head = tokens.next().ok_or(ParseCommandError::UnknownCommand)?;

        let command = match head {
            "set" => parse_set(&mut tokens)?,
            "move" => parse_move(&mut tokens)?,
            "record" => Command::Record { name: routine_name(&mut tokens, RECORD_USAGE)? },
            "play" => Command::Play { name: routine_name(&mut tokens, PLAY_USAGE)? },
            "erase" => Command::Erase { name: routine_name(&mut tokens, ERASE_USAGE)? },
            bare => {
                let command = match bare {
                    "w" => jog(Joint::Shoulder, JOG_STEP_DEG),
                    "s" => jog(Joint::Shoulder, -JOG_STEP_DEG),
                    "a" => jog(Joint::Base, JOG_STEP_DEG),
                    "d" => jog(Joint::Base, -JOG_STEP_DEG),
                    "q" => jog(Joint::Elbow, -JOG_STEP_DEG),
                    "e" => jog(Joint::Elbow, JOG_STEP_DEG),
                    "z" => jog(Joint::Wrist, JOG_STEP_DEG),
                    "x" => jog(Joint::Wrist, -JOG_STEP_DEG),
                    "[" | "open" => Command::OpenGripper,
                    "]" | "close" => Command::CloseGripper,
                    "demo" => Command::Demo,
                    "routines" => Command::Routines,
                    "status" => Command::Status,
                    "save" => Command::Save,
                    "reset" | "r" => Command::Reset,
                    "help" | "h" => Command::Help,
                    "quit" | "exit" => Command::Quit,
                    other => match GraspTarget::from_name(other) {
                        Some(target) => Command::Grasp(target),
                        None => return Err(ParseCommandError::UnknownCommand),
                    },
                };
                // Bare commands take no arguments.
                if tokens.next().is_some() {
                    return Err(ParseCommandError::UnknownCommand);
                }
                command
            }
        };
        Ok(command)
    }
}

fn jog(joint: Joint, delta_deg: i32) -> Command {
    Command::Jog { joint, delta_deg }
}

fn parse_set<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Command, ParseCommandError> {
    let servo = next_int(tokens, SET_USAGE)?;
    let angle_deg = next_int(tokens, SET_USAGE)?;
    expect_end(tokens, SET_USAGE)?;
    let joint = Joint::from_number(servo).ok_or(ParseCommandError::BadJoint)?;
    Ok(Command::Set { joint, angle_deg: checked_angle(angle_deg)? })
}

fn parse_move<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Command, ParseCommandError> {
    let mut angles = [0i32; 5];
    for slot in angles.iter_mut() {
        *slot = checked_angle(next_int(tokens, MOVE_USAGE)?)?;
    }
    expect_end(tokens, MOVE_USAGE)?;
    Ok(Command::MoveAll { angles })
}

fn routine_name<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<String, ParseCommandError> {
    let name = tokens.next().ok_or(ParseCommandError::Usage(usage))?;
    expect_end(tokens, usage)?;
    let name_ok = !name.is_empty()
        && name.len() <= 32
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !name_ok {
        return Err(ParseCommandError::BadRoutineName);
    }
    Ok(name.to_owned())
}

fn next_int<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<i32, ParseCommandError> {
    tokens
        .next()
        .ok_or(ParseCommandError::Usage(usage))?
        .parse()
        .map_err(|_| ParseCommandError::Usage(usage))
}

fn expect_end<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    usage: &'static str,
) -> Result<(), ParseCommandError> {
    if tokens.next().is_some() {
        return Err(ParseCommandError::Usage(usage));
    }
    Ok(())
}

fn checked_angle(angle_deg: i32) -> Result<i32, ParseCommandError> {
    if (ANGLE_MIN..=ANGLE_MAX).contains(&angle_deg) {
        Ok(angle_deg)
    } else {
        Err(ParseCommandError::BadAngle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jog_keys() {
        assert_eq!(
            Command::try_from("w"),
            Ok(Command::Jog { joint: Joint::Shoulder, delta_deg: 5 })
        );
        assert_eq!(
            Command::try_from("s"),
            Ok(Command::Jog { joint: Joint::Shoulder, delta_deg: -5 })
        );
        assert_eq!(Command::try_from("a"), Ok(Command::Jog { joint: Joint::Base, delta_deg: 5 }));
        assert_eq!(Command::try_from("d"), Ok(Command::Jog { joint: Joint::Base, delta_deg: -5 }));
        assert_eq!(Command::try_from("z"), Ok(Command::Jog { joint: Joint::Wrist, delta_deg: 5 }));
        assert_eq!(Command::try_from("x"), Ok(Command::Jog { joint: Joint::Wrist, delta_deg: -5 }));
    }

    #[test]
    fn test_elbow_jog_runs_backwards() {
        // On this arm "elbow up" is a decreasing angle.
        assert_eq!(Command::try_from("q"), Ok(Command::Jog { joint: Joint::Elbow, delta_deg: -5 }));
        assert_eq!(Command::try_from("e"), Ok(Command::Jog { joint: Joint::Elbow, delta_deg: 5 }));
    }

    #[test]
    fn test_input_is_case_insensitive_and_trimmed() {
        assert_eq!(
            Command::try_from("  W \r"),
            Ok(Command::Jog { joint: Joint::Shoulder, delta_deg: 5 })
        );
        assert_eq!(Command::try_from("CUBE"), Ok(Command::Grasp(GraspTarget::Cube)));
        assert_eq!(Command::try_from("Record Waves"), Ok(Command::Record { name: "waves".to_owned() }));
    }

    #[test]
    fn test_gripper_aliases() {
        assert_eq!(Command::try_from("["), Ok(Command::OpenGripper));
        assert_eq!(Command::try_from("open"), Ok(Command::OpenGripper));
        assert_eq!(Command::try_from("]"), Ok(Command::CloseGripper));
        assert_eq!(Command::try_from("close"), Ok(Command::CloseGripper));
    }

    #[test]
    fn test_word_commands() {
        assert_eq!(Command::try_from("status"), Ok(Command::Status));
        assert_eq!(Command::try_from("save"), Ok(Command::Save));
        assert_eq!(Command::try_from("reset"), Ok(Command::Reset));
        assert_eq!(Command::try_from("r"), Ok(Command::Reset));
        assert_eq!(Command::try_from("help"), Ok(Command::Help));
        assert_eq!(Command::try_from("h"), Ok(Command::Help));
        assert_eq!(Command::try_from("demo"), Ok(Command::Demo));
        assert_eq!(Command::try_from("quit"), Ok(Command::Quit));
        assert_eq!(Command::try_from("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_s_jogs_instead_of_reporting_status() {
        // Single-letter 's' belongs to the shoulder; 'status' must be spelled out.
        assert_eq!(
            Command::try_from("s"),
            Ok(Command::Jog { joint: Joint::Shoulder, delta_deg: -5 })
        );
    }

    #[test]
    fn test_grasp_words() {
        assert_eq!(Command::try_from("cube"), Ok(Command::Grasp(GraspTarget::Cube)));
        assert_eq!(Command::try_from("cylinder"), Ok(Command::Grasp(GraspTarget::Cylinder)));
        assert_eq!(Command::try_from("hat"), Ok(Command::Grasp(GraspTarget::Hat)));
        assert_eq!(Command::try_from("boat"), Ok(Command::Grasp(GraspTarget::Boat)));
    }

    #[test]
    fn test_set_parses_and_validates() {
        assert_eq!(
            Command::try_from("set 3 120"),
            Ok(Command::Set { joint: Joint::Shoulder, angle_deg: 120 })
        );
        assert_eq!(Command::try_from("set 0 90"), Err(ParseCommandError::BadJoint));
        assert_eq!(Command::try_from("set 6 90"), Err(ParseCommandError::BadJoint));
        assert_eq!(Command::try_from("set 2 181"), Err(ParseCommandError::BadAngle));
        assert_eq!(Command::try_from("set 2 -1"), Err(ParseCommandError::BadAngle));
        assert_eq!(Command::try_from("set 2"), Err(ParseCommandError::Usage(SET_USAGE)));
        assert_eq!(Command::try_from("set two 90"), Err(ParseCommandError::Usage(SET_USAGE)));
        assert_eq!(Command::try_from("set 2 90 7"), Err(ParseCommandError::Usage(SET_USAGE)));
    }

    #[test]
    fn test_move_needs_exactly_five_angles_in_range() {
        assert_eq!(
            Command::try_from("move 90 45 100 0 30"),
            Ok(Command::MoveAll { angles: [90, 45, 100, 0, 30] })
        );
        assert_eq!(Command::try_from("move 90 45 100 0"), Err(ParseCommandError::Usage(MOVE_USAGE)));
        assert_eq!(
            Command::try_from("move 90 45 100 0 30 60"),
            Err(ParseCommandError::Usage(MOVE_USAGE))
        );
        assert_eq!(
            Command::try_from("move 90 45 200 0 30"),
            Err(ParseCommandError::BadAngle)
        );
    }

    #[test]
    fn test_routine_commands() {
        assert_eq!(Command::try_from("record pick_2"), Ok(Command::Record { name: "pick_2".to_owned() }));
        assert_eq!(Command::try_from("play pick-2"), Ok(Command::Play { name: "pick-2".to_owned() }));
        assert_eq!(Command::try_from("erase pick"), Ok(Command::Erase { name: "pick".to_owned() }));
        assert_eq!(Command::try_from("routines"), Ok(Command::Routines));
        assert_eq!(Command::try_from("record"), Err(ParseCommandError::Usage(RECORD_USAGE)));
        assert_eq!(Command::try_from("play a b"), Err(ParseCommandError::Usage(PLAY_USAGE)));
    }

    #[test]
    fn test_routine_names_are_fs_safe() {
        assert_eq!(
            Command::try_from("record ../escape"),
            Err(ParseCommandError::BadRoutineName)
        );
        assert_eq!(
            Command::try_from("record a.b"),
            Err(ParseCommandError::BadRoutineName)
        );
        assert_eq!(
            Command::try_from(&format!("record {}", "x".repeat(33))[..]),
            Err(ParseCommandError::BadRoutineName)
        );
    }

    #[test]
    fn test_unknown_and_trailing_junk() {
        assert_eq!(Command::try_from("dance"), Err(ParseCommandError::UnknownCommand));
        assert_eq!(Command::try_from("cube now"), Err(ParseCommandError::UnknownCommand));
        assert_eq!(Command::try_from(""), Err(ParseCommandError::UnknownCommand));
    }
}
