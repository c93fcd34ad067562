//! This module provides the catalog of built-in levels embedded in the crate, and
//! lookup of the level a decoded program was written for.

use crate::level::Level;
use crate::loader::LevelLoader;
use crate::program::ActionProgram;
use crate::types::RobotError;
use tracing::warn;

// Default embedded levels
const LEVEL_TEXTS: [&str; 3] = [
    include_str!("../levels/level-1.json"),
    include_str!("../levels/level-2.json"),
    include_str!("../levels/level-3.json"),
];

lazy_static::lazy_static! {
    pub static ref LEVELS: Vec<Level> = load_embedded();
}

fn load_embedded() -> Vec<Level> {
    LEVEL_TEXTS
        .iter()
        .enumerate()
        .filter_map(|(index, text)| match LevelLoader::load_level_from_string(text) {
            Ok(level) => Some(level),
            Err(e) => {
                warn!(index, "failed to load embedded level: {}", e);
                None
            }
        })
        .collect()
}

pub struct LevelCatalog;

impl LevelCatalog {
    /// Get the number of available levels
    pub fn count() -> usize {
        LEVELS.len()
    }

    /// Get a level by its index
    pub fn get_by_index(index: usize) -> Result<Level, RobotError> {
        LEVELS.get(index).cloned().ok_or_else(|| {
            RobotError::ValidationError(format!("Level index {} out of range", index))
        })
    }

    /// Get a level by its name
    pub fn get_by_name(name: &str) -> Result<Level, RobotError> {
        LEVELS
            .iter()
            .find(|level| level.name() == name)
            .cloned()
            .ok_or_else(|| RobotError::ValidationError(format!("Level '{}' not found", name)))
    }

    /// List all level names
    pub fn names() -> Vec<String> {
        LEVELS.iter().map(|level| level.name().to_string()).collect()
    }

    /// Resolves the level a program names on its first line.
    pub fn level_for(program: &ActionProgram) -> Result<Level, RobotError> {
        let name = program.level_name().ok_or_else(|| {
            RobotError::ValidationError("Program has no associated level name".to_string())
        })?;

        Self::get_by_name(name.trim())
    }

    /// Get the original JSON of a level by its index
    pub fn get_text_by_index(index: usize) -> Result<&'static str, RobotError> {
        LEVEL_TEXTS.get(index).copied().ok_or_else(|| {
            RobotError::ValidationError(format!("Level text index {} out of range", index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RunEngine;
    use crate::events::NullSink;
    use crate::parser::parse;
    use crate::types::{Direction, Position};

    const SOLUTIONS: [&str; 3] = [
        include_str!("../algos/level-1.txt"),
        include_str!("../algos/level-2.txt"),
        include_str!("../algos/level-3.txt"),
    ];

    #[test]
    fn test_all_embedded_levels_load() {
        assert_eq!(LevelCatalog::count(), LEVEL_TEXTS.len());
        assert_eq!(
            LevelCatalog::names(),
            vec!["Level 1", "Level 2", "Level 3"]
        );
    }

    #[test]
    fn test_get_by_name() {
        let level = LevelCatalog::get_by_name("Level 1").unwrap();
        assert_eq!(level.start_position(), Position::new(0, 2));
        assert_eq!(level.start_direction(), Direction::Right);
        assert_eq!(level.height_at(Position::new(1, 4)), Some(1));

        assert!(LevelCatalog::get_by_name("Level 99").is_err());
    }

    #[test]
    fn test_get_by_index() {
        assert_eq!(LevelCatalog::get_by_index(1).unwrap().name(), "Level 2");
        assert!(LevelCatalog::get_by_index(LEVEL_TEXTS.len()).is_err());
        assert!(LevelCatalog::get_text_by_index(0).unwrap().contains("Level 1"));
    }

    #[test]
    fn test_level_for_program() {
        let program = parse("Level 2\nmain: m\n").unwrap();
        assert_eq!(LevelCatalog::level_for(&program).unwrap().name(), "Level 2");

        let anonymous = ActionProgram::default();
        assert!(LevelCatalog::level_for(&anonymous).is_err());
    }

    #[test]
    fn test_bundled_solutions_solve_their_levels() {
        for text in SOLUTIONS {
            let program = parse(text).unwrap();
            let level = LevelCatalog::level_for(&program).unwrap();

            let (success, _) = RunEngine::run(&level, &program, NullSink).unwrap();
            assert!(success, "{} should be solved", level.name());
        }
    }
}
