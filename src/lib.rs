//! This crate provides the core logic for a grid robot puzzle.
//! It includes modules for describing levels, decoding action programs, analyzing them,
//! and running them against a level while reporting every step to an event sink.

pub mod analyzer;
pub mod encoder;
pub mod engine;
pub mod events;
pub mod level;
pub mod levels;
pub mod loader;
pub mod parser;
pub mod program;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, call_depth, AnalysisError};
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{encode, encode_actions};
/// Re-exports the run engine and its configuration from the engine module.
pub use engine::{EngineConfig, Phase, RunEngine, RunState};
/// Re-exports the event sink interface and the bundled sinks from the events module.
pub use events::{Event, EventLog, EventSink, NullSink};
/// Re-exports the `Level` struct from the level module.
pub use level::Level;
/// Re-exports `LevelCatalog` and `LEVELS` from the levels module.
pub use levels::{LevelCatalog, LEVELS};
/// Re-exports the loaders from the loader module.
pub use loader::{LevelLoader, ProgramLoader};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `ActionProgram` struct from the program module.
pub use program::ActionProgram;
/// Re-exports the shared types from the types module.
pub use types::{
    Action, Direction, GroupName, Position, RobotError, DEFAULT_MAX_CALL_DEPTH, MAX_PROGRAM_SIZE,
};
