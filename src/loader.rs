//! This module provides `ProgramLoader` and `LevelLoader`, responsible for reading action
//! programs and level descriptions from files and strings.

use crate::level::Level;
use crate::parser::parse;
use crate::program::ActionProgram;
use crate::types::{RobotError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading action programs.
/// It loads programs from individual files or from string content.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single action program from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(ActionProgram)` if the file is successfully read and decoded.
    /// * `Err(RobotError::FileError)` if the file cannot be read or exceeds `MAX_PROGRAM_SIZE`.
    /// * `Err(RobotError::UnknownGroup)` / `Err(RobotError::UnknownAction)` if decoding fails.
    pub fn load_program(path: &Path) -> Result<ActionProgram, RobotError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RobotError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_program_from_string(&content)
    }

    /// Loads a single action program from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<ActionProgram, RobotError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(RobotError::FileError(format!(
                "Program is {} bytes, exceeding the limit of {} bytes",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        parse(content)
    }
}

/// `LevelLoader` reads levels stored as JSON.
pub struct LevelLoader;

impl LevelLoader {
    /// Loads a level from a JSON file.
    ///
    /// # Returns
    ///
    /// * `Ok(Level)` if the file is read and describes a valid level.
    /// * `Err(RobotError::FileError)` if the file cannot be read.
    /// * `Err(RobotError::LevelFormat)` if the JSON is malformed or the level is invalid.
    pub fn load_level(path: &Path) -> Result<Level, RobotError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RobotError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_level_from_string(&content)
    }

    /// Loads a level from JSON text.
    pub fn load_level_from_string(content: &str) -> Result<Level, RobotError> {
        serde_json::from_str(content).map_err(|e| RobotError::LevelFormat(e.to_string()))
    }
}
