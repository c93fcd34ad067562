//! This module defines the core data structures and types shared by the level model,
//! the action program decoder and the run engine, including directions, grid positions,
//! robot actions and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The maximum allowed size for an action program text in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default number of nested subroutine invocations allowed before a run is aborted.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// The facing of the robot on the grid.
///
/// The discriminants give the rotation order: rotating left increments the index,
/// rotating right decrements it, both wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing `x`.
    Left = 0,
    /// Towards increasing `y`.
    Down = 1,
    /// Towards increasing `x`.
    Right = 2,
    /// Towards decreasing `y`.
    Up = 3,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Returns the rotation index of this direction.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction for a rotation index, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The direction after a left rotation.
    pub fn rotated_left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The direction after a right rotation.
    pub fn rotated_right(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Up => "up",
        };
        f.write_str(name)
    }
}

/// A cell coordinate on the level grid. `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single primitive robot instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Move,
    Jump,
    ToggleSwitch,
    InvokeF1,
    InvokeF2,
}

impl Action {
    /// Decodes a single action token (`l`, `r`, `m`, `j`, `s`, `1`, `2`).
    ///
    /// # Returns
    ///
    /// * `Ok(Action)` for a known token.
    /// * `Err(RobotError::UnknownAction)` naming the token otherwise.
    pub fn from_token(token: &str) -> Result<Self, RobotError> {
        match token {
            "l" => Ok(Action::RotateLeft),
            "r" => Ok(Action::RotateRight),
            "m" => Ok(Action::Move),
            "j" => Ok(Action::Jump),
            "s" => Ok(Action::ToggleSwitch),
            "1" => Ok(Action::InvokeF1),
            "2" => Ok(Action::InvokeF2),
            _ => Err(RobotError::UnknownAction(token.to_string())),
        }
    }

    /// Returns the one-character token for this action.
    pub fn token(self) -> char {
        match self {
            Action::RotateLeft => 'l',
            Action::RotateRight => 'r',
            Action::Move => 'm',
            Action::Jump => 'j',
            Action::ToggleSwitch => 's',
            Action::InvokeF1 => '1',
            Action::InvokeF2 => '2',
        }
    }

    /// Returns the subroutine group this action invokes, if any.
    pub fn invoked_group(self) -> Option<GroupName> {
        match self {
            Action::InvokeF1 => Some(GroupName::F1),
            Action::InvokeF2 => Some(GroupName::F2),
            _ => None,
        }
    }
}

impl FromStr for Action {
    type Err = RobotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_token(s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Names of the three action groups of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupName {
    Main,
    F1,
    F2,
}

impl GroupName {
    /// All groups in the order they are written out.
    pub const ALL: [GroupName; 3] = [GroupName::Main, GroupName::F1, GroupName::F2];

    /// The name used for this group in the action program text format.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupName::Main => "main",
            GroupName::F1 => "f1",
            GroupName::F2 => "f2",
        }
    }
}

impl FromStr for GroupName {
    type Err = RobotError;

    /// Group names are case-sensitive and must match exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(GroupName::Main),
            "f1" => Ok(GroupName::F1),
            "f2" => Ok(GroupName::F2),
            _ => Err(RobotError::UnknownGroup(s.to_string())),
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents various errors that can occur while building levels, decoding
/// action programs and running them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotError {
    /// The level's maps are inconsistent or its start position is out of bounds.
    #[error("Invalid level: {0}")]
    InvalidLevel(String),
    /// An action token outside the known token table.
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
    /// A group line named something other than `main`, `f1` or `f2`.
    #[error("Unknown group: {0:?}")]
    UnknownGroup(String),
    /// `exec()` was called on an engine that already ran.
    #[error("Run already started")]
    AlreadyStarted,
    /// Subroutine invocations nested deeper than the configured limit.
    #[error("Subroutine recursion limit exceeded at depth {depth}")]
    RecursionLimitExceeded { depth: usize },
    /// A program failed static analysis.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// A level description could not be read as JSON.
    #[error("Level format error: {0}")]
    LevelFormat(String),
    /// Reading a program or level from the file system failed.
    #[error("File error: {0}")]
    FileError(String),
}
