//! This module defines the immutable `Level` grid: per-cell terrain height, switch
//! placement and the robot's start pose. Levels are validated once at construction and
//! only expose read-only views afterwards.

use crate::types::{Direction, Position, RobotError};
use serde::{Deserialize, Serialize};

/// An immutable puzzle level.
///
/// Cells are stored column-major, so the cell `(x, y)` lives at `x * height + y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelDefinition", into = "LevelDefinition")]
pub struct Level {
    name: String,
    width: usize,
    height: usize,
    heights: Vec<i32>,
    switches: Vec<bool>,
    start: Position,
    start_direction: Direction,
}

/// The on-disk shape of a level: maps are listed row by row, top to bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelDefinition {
    name: String,
    heights: Vec<Vec<i32>>,
    switches: Vec<Vec<bool>>,
    start: Position,
    direction: Direction,
}

impl TryFrom<LevelDefinition> for Level {
    type Error = RobotError;

    fn try_from(def: LevelDefinition) -> Result<Self, Self::Error> {
        Level::from_rows(def.name, def.heights, def.switches, def.start, def.direction)
    }
}

impl From<Level> for LevelDefinition {
    fn from(level: Level) -> Self {
        LevelDefinition {
            heights: transpose(&level.height_map()),
            switches: transpose(&level.switch_map()),
            start: level.start,
            direction: level.start_direction,
            name: level.name,
        }
    }
}

impl Level {
    /// Builds a level from column-major maps, indexed `[x][y]`.
    ///
    /// # Arguments
    ///
    /// * `name` - The level name.
    /// * `height_map` - Terrain elevation per cell, `width` columns of `height` cells.
    /// * `switch_map` - Switch presence per cell, same shape as `height_map`.
    /// * `start` - The robot's start cell.
    /// * `start_direction` - The robot's initial facing.
    ///
    /// # Returns
    ///
    /// * `Ok(Level)` if the maps are rectangular, non-empty, agree in shape, and `start`
    ///   lies on the grid.
    /// * `Err(RobotError::InvalidLevel)` otherwise.
    pub fn new(
        name: impl Into<String>,
        height_map: Vec<Vec<i32>>,
        switch_map: Vec<Vec<bool>>,
        start: Position,
        start_direction: Direction,
    ) -> Result<Self, RobotError> {
        let (width, height) = check_shape("height map", &height_map)?;
        let shape = check_shape("switch map", &switch_map)?;

        if shape != (width, height) {
            return Err(RobotError::InvalidLevel(format!(
                "Switch map is {}x{} but height map is {}x{}",
                shape.0, shape.1, width, height
            )));
        }

        if start.x >= width || start.y >= height {
            return Err(RobotError::InvalidLevel(format!(
                "Start position {} is outside the {}x{} grid",
                start, width, height
            )));
        }

        Ok(Self {
            name: name.into(),
            width,
            height,
            heights: height_map.into_iter().flatten().collect(),
            switches: switch_map.into_iter().flatten().collect(),
            start,
            start_direction,
        })
    }

    /// Builds a level from row-major maps, indexed `[y][x]`, as a level is usually
    /// written down. See [`Level::new`] for the validation rules.
    pub fn from_rows(
        name: impl Into<String>,
        height_rows: Vec<Vec<i32>>,
        switch_rows: Vec<Vec<bool>>,
        start: Position,
        start_direction: Direction,
    ) -> Result<Self, RobotError> {
        check_shape("height map", &height_rows)?;
        check_shape("switch map", &switch_rows)?;

        Self::new(
            name,
            transpose(&height_rows),
            transpose(&switch_rows),
            start,
            start_direction,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells along `x`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells along `y`.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start_position(&self) -> Position {
        self.start
    }

    pub fn start_direction(&self) -> Direction {
        self.start_direction
    }

    /// Checks whether a position lies on the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Returns the terrain height of a cell, or `None` off the grid.
    pub fn height_at(&self, pos: Position) -> Option<i32> {
        self.index(pos).map(|i| self.heights[i])
    }

    /// Checks whether a cell carries a switch. Cells off the grid never do.
    pub fn has_switch(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.switches[i])
    }

    /// Returns a copy of the height map, indexed `[x][y]`.
    pub fn height_map(&self) -> Vec<Vec<i32>> {
        self.heights
            .chunks(self.height)
            .map(|column| column.to_vec())
            .collect()
    }

    /// Returns a copy of the switch map, indexed `[x][y]`.
    pub fn switch_map(&self) -> Vec<Vec<bool>> {
        self.switches
            .chunks(self.height)
            .map(|column| column.to_vec())
            .collect()
    }

    /// Iterates over all switch cells, column by column.
    pub fn switch_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.switches
            .iter()
            .enumerate()
            .filter(|&(_, &has_switch)| has_switch)
            .map(|(i, _)| Position::new(i / self.height, i % self.height))
    }

    /// Returns the cell one step from `pos` in `direction`.
    ///
    /// Grid edges are walls: stepping off the grid yields `pos` itself.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Position {
        let Position { mut x, mut y } = pos;

        match direction {
            Direction::Left => x = x.saturating_sub(1),
            Direction::Up => y = y.saturating_sub(1),
            Direction::Right => {
                if x + 1 < self.width {
                    x += 1;
                }
            }
            Direction::Down => {
                if y + 1 < self.height {
                    y += 1;
                }
            }
        }

        Position::new(x, y)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.x * self.height + pos.y)
    }
}

/// Validates that a map is non-empty and rectangular, returning its outer and inner lengths.
fn check_shape<T>(what: &str, map: &[Vec<T>]) -> Result<(usize, usize), RobotError> {
    let inner = map.first().map(Vec::len).unwrap_or(0);

    if inner == 0 {
        return Err(RobotError::InvalidLevel(format!("The {} is empty", what)));
    }

    if let Some((i, row)) = map.iter().enumerate().find(|(_, row)| row.len() != inner) {
        return Err(RobotError::InvalidLevel(format!(
            "The {} is ragged: line {} has {} cells, expected {}",
            what,
            i,
            row.len(),
            inner
        )));
    }

    Ok((map.len(), inner))
}

/// Swaps the two indices of a rectangular matrix.
fn transpose<T: Copy>(matrix: &[Vec<T>]) -> Vec<Vec<T>> {
    let inner = matrix.first().map(Vec::len).unwrap_or(0);

    (0..inner)
        .map(|j| matrix.iter().map(|line| line[j]).collect())
        .collect()
}
