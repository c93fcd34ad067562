//! This module defines the `RunEngine`, the one-shot interpreter that replays an
//! `ActionProgram` against a `Level`. It owns the run state (position, facing, switches
//! still to activate) and reports every change to an `EventSink`.

use crate::events::EventSink;
use crate::level::Level;
use crate::program::ActionProgram;
use crate::types::{Action, Direction, GroupName, Position, RobotError, DEFAULT_MAX_CALL_DEPTH};
use tracing::{debug, info, warn};

/// Tunable limits of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of nested subroutine invocations. `main` runs at depth 0.
    pub max_call_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    /// Sticky once entered.
    Finished { success: bool },
}

/// Mutable state of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    position: Position,
    direction: Direction,
    /// Switch cells still to be activated, in insertion order.
    remaining: Vec<Position>,
}

impl RunState {
    /// Places the robot at the level's start pose with every switch still to activate.
    pub fn new(level: &Level) -> Self {
        Self {
            position: level.start_position(),
            direction: level.start_direction(),
            remaining: level.switch_positions().collect(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn remaining_switches(&self) -> &[Position] {
        &self.remaining
    }

    /// Flips a switch: removes it from the remaining set if present, adds it back otherwise.
    fn toggle(&mut self, pos: Position) {
        match self.remaining.iter().position(|p| *p == pos) {
            Some(i) => {
                self.remaining.remove(i);
            }
            None => self.remaining.push(pos),
        }
    }
}

/// Executes one action program against one level, exactly once.
///
/// The level and program are borrowed read-only, so any number of engines can share them.
pub struct RunEngine<'a, S: EventSink> {
    level: &'a Level,
    program: &'a ActionProgram,
    sink: S,
    config: EngineConfig,
    state: RunState,
    phase: Phase,
}

impl<'a, S: EventSink> RunEngine<'a, S> {
    /// Creates an engine with the default configuration.
    pub fn new(level: &'a Level, program: &'a ActionProgram, sink: S) -> Self {
        Self::with_config(level, program, sink, EngineConfig::default())
    }

    pub fn with_config(
        level: &'a Level,
        program: &'a ActionProgram,
        sink: S,
        config: EngineConfig,
    ) -> Self {
        Self {
            level,
            program,
            sink,
            config,
            state: RunState::new(level),
            phase: Phase::NotStarted,
        }
    }

    /// Creates an engine, executes the program and hands back the verdict together with the sink.
    pub fn run(
        level: &'a Level,
        program: &'a ActionProgram,
        sink: S,
    ) -> Result<(bool, S), RobotError> {
        let mut engine = Self::new(level, program, sink);
        let success = engine.exec()?;
        Ok((success, engine.into_sink()))
    }

    /// Executes the program. One-shot.
    ///
    /// Runs `main` to completion, then finishes the run and emits a single `result`
    /// event reporting whether every switch is active.
    ///
    /// # Returns
    ///
    /// * `Ok(success)` once the run finished.
    /// * `Err(RobotError::AlreadyStarted)` if the engine already ran.
    /// * `Err(RobotError::RecursionLimitExceeded)` if subroutines nest deeper than
    ///   `max_call_depth`. The run is finished with the switch state reached so far
    ///   before this is returned.
    pub fn exec(&mut self) -> Result<bool, RobotError> {
        if self.phase != Phase::NotStarted {
            return Err(RobotError::AlreadyStarted);
        }

        self.phase = Phase::Running;

        let outcome = self.run_main();
        if let Err(e) = &outcome {
            warn!(level = self.level.name(), "run aborted: {}", e);
        }

        let success = self.state.remaining.is_empty();
        self.finish(success);

        outcome.map(|()| success)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    /// The verdict, once the run has finished.
    pub fn outcome(&self) -> Option<bool> {
        match self.phase {
            Phase::Finished { success } => Some(success),
            _ => None,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn remaining_switches(&self) -> &[Position] {
        &self.state.remaining
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs `main`, expanding subroutine invocations inline.
    ///
    /// Invocations are kept on an explicit frame stack of `(group, next action)` pairs,
    /// so the nesting depth is bounded by `max_call_depth` alone. Execution stops early
    /// once the run has finished.
    fn run_main(&mut self) -> Result<(), RobotError> {
        let program = self.program;
        let mut frames = vec![(GroupName::Main, 0usize)];

        while let Some(frame) = frames.last_mut() {
            if self.is_finished() {
                break;
            }

            let (group, next) = *frame;
            let Some(&action) = program.group(group).get(next) else {
                frames.pop();
                // The invocation that entered this group is complete.
                if !frames.is_empty() {
                    self.sink.on_action();
                }
                continue;
            };
            frame.1 += 1;

            match action.invoked_group() {
                Some(callee) => {
                    let depth = frames.len();
                    if depth > self.config.max_call_depth {
                        return Err(RobotError::RecursionLimitExceeded { depth });
                    }

                    debug!(group = callee.as_str(), depth, "invoke");
                    frames.push((callee, 0));
                }
                None => {
                    self.apply(action);
                    self.sink.on_action();
                }
            }
        }

        Ok(())
    }

    /// Applies a primitive action. Invocations are expanded by `run_main`.
    fn apply(&mut self, action: Action) {
        match action {
            Action::RotateLeft => self.turn(self.state.direction.rotated_left()),
            Action::RotateRight => self.turn(self.state.direction.rotated_right()),
            Action::Move => self.step_forward(false),
            Action::Jump => self.step_forward(true),
            Action::ToggleSwitch => self.use_switch(),
            Action::InvokeF1 | Action::InvokeF2 => {}
        }
    }

    fn turn(&mut self, new: Direction) {
        let old = self.state.direction;
        self.state.direction = new;
        self.sink.on_turn(new, old);
    }

    /// Moves one cell ahead. A plain move needs equal heights, a jump a difference of
    /// exactly one. Anything else, including walking into a grid edge, is a bump and
    /// leaves the state untouched.
    fn step_forward(&mut self, jump: bool) {
        let old = self.state.position;
        let new = self.level.neighbor(old, self.state.direction);

        // Both cells are on the grid: `old` by construction, `new` by clamping.
        let old_height = self.level.height_at(old).unwrap_or_default();
        let new_height = self.level.height_at(new).unwrap_or_default();
        let climb = new_height.abs_diff(old_height);

        let allowed = new != old && if jump { climb == 1 } else { climb == 0 };

        if allowed {
            self.state.position = new;
            self.sink.on_move(new, old);
        } else {
            debug!(
                from = %old,
                direction = %self.state.direction,
                old_height,
                new_height,
                jump,
                "bump"
            );
        }
    }

    fn use_switch(&mut self) {
        let pos = self.state.position;
        if !self.level.has_switch(pos) {
            return;
        }

        self.state.toggle(pos);
        self.sink.on_use_switch(pos);
    }

    /// Enters the finished phase. Finishing twice is a no-op.
    fn finish(&mut self, success: bool) {
        if self.is_finished() {
            return;
        }

        self.phase = Phase::Finished { success };

        if success {
            info!("{} solved", self.level.name());
        } else {
            info!("{} not solved", self.level.name());
        }

        self.sink.on_result(success);
    }
}
