//! This module defines `ActionProgram`, the immutable set of action groups (`main`, `f1`, `f2`)
//! that a run engine replays against a level.

use crate::types::{Action, GroupName, RobotError};

/// An ordered, named collection of action groups.
///
/// `main` is the entry point; `f1` and `f2` are subroutines invoked by
/// [`Action::InvokeF1`] and [`Action::InvokeF2`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionProgram {
    level_name: Option<String>,
    main: Vec<Action>,
    f1: Vec<Action>,
    f2: Vec<Action>,
}

impl ActionProgram {
    /// Creates a program from already decoded action groups.
    pub fn new(main: Vec<Action>, f1: Vec<Action>, f2: Vec<Action>) -> Self {
        Self {
            level_name: None,
            main,
            f1,
            f2,
        }
    }

    /// Creates a program from three lists of single-character action tokens.
    ///
    /// # Returns
    ///
    /// * `Ok(ActionProgram)` if every token decodes.
    /// * `Err(RobotError::UnknownAction)` naming the first token that does not.
    pub fn from_tokens<S: AsRef<str>>(
        main: &[S],
        f1: &[S],
        f2: &[S],
    ) -> Result<Self, RobotError> {
        Ok(Self::new(
            decode_tokens(main)?,
            decode_tokens(f1)?,
            decode_tokens(f2)?,
        ))
    }

    /// Attaches the name of the level this program was written for.
    pub fn with_level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    /// The associated level name, present when the program was decoded from text.
    pub fn level_name(&self) -> Option<&str> {
        self.level_name.as_deref()
    }

    /// Returns the actions of a group.
    pub fn group(&self, name: GroupName) -> &[Action] {
        match name {
            GroupName::Main => &self.main,
            GroupName::F1 => &self.f1,
            GroupName::F2 => &self.f2,
        }
    }

    pub fn main(&self) -> &[Action] {
        &self.main
    }

    pub fn f1(&self) -> &[Action] {
        &self.f1
    }

    pub fn f2(&self) -> &[Action] {
        &self.f2
    }

    /// Total number of actions written across all groups.
    pub fn action_count(&self) -> usize {
        self.main.len() + self.f1.len() + self.f2.len()
    }

    /// Checks whether every group is empty.
    pub fn is_empty(&self) -> bool {
        self.action_count() == 0
    }
}

fn decode_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Action>, RobotError> {
    tokens
        .iter()
        .map(|token| Action::from_token(token.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens() {
        let program = ActionProgram::from_tokens(
            &["l", "m", "r", "j", "1", "2"],
            &["j", "m", "m"],
            &["r", "m", "s"],
        )
        .unwrap();

        assert_eq!(program.main().len(), 6);
        assert_eq!(program.main()[4], Action::InvokeF1);
        assert_eq!(program.f1(), &[Action::Jump, Action::Move, Action::Move]);
        assert_eq!(
            program.group(GroupName::F2),
            &[Action::RotateRight, Action::Move, Action::ToggleSwitch]
        );
        assert_eq!(program.action_count(), 12);
        assert_eq!(program.level_name(), None);
    }

    #[test]
    fn test_from_tokens_rejects_unknown() {
        let empty: [&str; 0] = [];
        let result = ActionProgram::from_tokens(&["m"], &["x"], &empty);
        assert_eq!(result, Err(RobotError::UnknownAction("x".to_string())));
    }

    #[test]
    fn test_level_name() {
        let program = ActionProgram::default().with_level_name("Level 1");
        assert_eq!(program.level_name(), Some("Level 1"));
        assert!(program.is_empty());
    }
}
