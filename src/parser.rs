//! This module decodes the line-oriented action program format into an `ActionProgram`.
//!
//! The first line holds the name of the associated level. Every following line of the
//! form `<group>:<tokens>` appends actions to `main`, `f1` or `f2`; all other lines are
//! skipped.

use crate::program::ActionProgram;
use crate::types::{Action, GroupName, RobotError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `<group>:<tokens>` where both parts consist of ASCII word characters
    /// and the tokens may be separated by whitespace.
    static ref GROUP_LINE: Regex =
        Regex::new(r"^([A-Za-z0-9_]+):([A-Za-z0-9_\s]+)$").expect("group line pattern");
}

/// Parses the given input string into an `ActionProgram`.
///
/// Decoding is strict: the first unknown group or action token aborts the whole parse
/// and no partially filled program is returned.
///
/// # Arguments
///
/// * `input` - A string slice containing the action program text.
///
/// # Returns
///
/// * `Ok(ActionProgram)` if every group line decodes.
/// * `Err(RobotError::UnknownGroup)` if a group line names an unknown group.
/// * `Err(RobotError::UnknownAction)` if a group line contains an unknown token.
pub fn parse(input: &str) -> Result<ActionProgram, RobotError> {
    let mut lines = input.lines();
    let level_name = lines.next();

    let mut main = Vec::new();
    let mut f1 = Vec::new();
    let mut f2 = Vec::new();

    for line in lines {
        let Some(captures) = GROUP_LINE.captures(line) else {
            continue;
        };

        let group = match captures[1].parse::<GroupName>()? {
            GroupName::Main => &mut main,
            GroupName::F1 => &mut f1,
            GroupName::F2 => &mut f2,
        };

        group.extend(parse_actions(&captures[2])?);
    }

    let program = ActionProgram::new(main, f1, f2);

    Ok(match level_name {
        Some(name) => program.with_level_name(name),
        None => program,
    })
}

/// Decodes a whitespace separated run of action tokens.
fn parse_actions(text: &str) -> Result<Vec<Action>, RobotError> {
    text.split_whitespace().map(Action::from_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_program() {
        let program = parse("Level 2\nmain: m m s\n").unwrap();

        assert_eq!(program.level_name(), Some("Level 2"));
        assert_eq!(
            program.main(),
            &[Action::Move, Action::Move, Action::ToggleSwitch]
        );
        assert!(program.f1().is_empty());
        assert!(program.f2().is_empty());
    }

    #[test]
    fn test_parse_all_groups() {
        let input = "Ridge\nmain: l m r j 1 2\nf1: j m m\nf2: r m s\n";
        let program = parse(input).unwrap();

        assert_eq!(program.main().len(), 6);
        assert_eq!(program.f1(), &[Action::Jump, Action::Move, Action::Move]);
        assert_eq!(
            program.f2(),
            &[Action::RotateRight, Action::Move, Action::ToggleSwitch]
        );
    }

    #[test]
    fn test_repeated_group_lines_append() {
        let program = parse("X\nmain: m\nf1: s\nmain: j  l\n").unwrap();
        assert_eq!(
            program.main(),
            &[Action::Move, Action::Jump, Action::RotateLeft]
        );
        assert_eq!(program.f1(), &[Action::ToggleSwitch]);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let program = parse("X\nmain:\tm   m \t s  \n").unwrap();
        assert_eq!(
            program.main(),
            &[Action::Move, Action::Move, Action::ToggleSwitch]
        );
    }

    #[test]
    fn test_non_matching_lines_are_skipped() {
        let input = "X\n# comment\n\nnot a group line\nmain: m\n main: j\nmain - s\n";
        let program = parse(input).unwrap();
        assert_eq!(program.main(), &[Action::Move]);
    }

    #[test]
    fn test_unknown_action() {
        let result = parse("X\nmain: m q s\n");
        assert_eq!(result, Err(RobotError::UnknownAction("q".to_string())));
    }

    #[test]
    fn test_unknown_action_after_valid_lines() {
        // Earlier lines decoded fine, but the program as a whole is rejected.
        let result = parse("X\nmain: m m\nf1: j\nf2: r zz\n");
        assert_eq!(result, Err(RobotError::UnknownAction("zz".to_string())));
    }

    #[test]
    fn test_unknown_group() {
        let result = parse("X\nf3: m\n");
        assert_eq!(result, Err(RobotError::UnknownGroup("f3".to_string())));

        let result = parse("X\nMain: m\n");
        assert_eq!(result, Err(RobotError::UnknownGroup("Main".to_string())));
    }

    #[test]
    fn test_first_line_is_never_a_group() {
        let program = parse("main: m m\nf1: s\n").unwrap();
        assert_eq!(program.level_name(), Some("main: m m"));
        assert!(program.main().is_empty());
        assert_eq!(program.f1(), &[Action::ToggleSwitch]);
    }

    #[test]
    fn test_whitespace_only_group_line() {
        let program = parse("X\nmain:   \n").unwrap();
        assert!(program.main().is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let program = parse("Level 3\r\nmain: m s\r\n").unwrap();
        assert_eq!(program.level_name(), Some("Level 3"));
        assert_eq!(program.main(), &[Action::Move, Action::ToggleSwitch]);
    }

    #[test]
    fn test_empty_input() {
        let program = parse("").unwrap();
        assert_eq!(program.level_name(), None);
        assert!(program.is_empty());
    }
}
