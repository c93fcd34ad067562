//! This module provides encoding of an `ActionProgram` back into the line-oriented
//! action program text format read by the parser.

use crate::program::ActionProgram;
use crate::types::{Action, GroupName};

/// Encodes an action program as text.
///
/// Format:
/// - line 1: the associated level name (empty when the program has none).
/// - one `<group>: <tokens>` line per non-empty group, in `main`, `f1`, `f2` order.
///
/// # Arguments
///
/// * `program` - The ActionProgram to encode.
///
/// # Returns
///
/// * `String` - The program text, newline terminated.
pub fn encode(program: &ActionProgram) -> String {
    let mut out = String::new();
    out.push_str(program.level_name().unwrap_or_default());
    out.push('\n');

    for name in GroupName::ALL {
        let actions = program.group(name);
        if actions.is_empty() {
            continue;
        }

        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&encode_actions(actions));
        out.push('\n');
    }

    out
}

/// Encodes a run of actions as space separated tokens.
pub fn encode_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|action| action.token().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_encode_program() {
        let program = ActionProgram::from_tokens(&["l", "m", "1"], &["j", "s"], &[])
            .unwrap()
            .with_level_name("Level 1");

        assert_eq!(encode(&program), "Level 1\nmain: l m 1\nf1: j s\n");
    }

    #[test]
    fn test_encode_without_level_name() {
        let program = ActionProgram::new(vec![], vec![], vec![Action::Move]);
        assert_eq!(encode(&program), "\nf2: m\n");
    }

    #[test]
    fn test_encoded_program_parses_back() {
        let text = "Ridge\nmain: l m r j 1 2\nf1: j m m\nf2: r m s\n";
        let program = parse(text).unwrap();

        assert_eq!(encode(&program), text);
    }
}
