//! This module defines the `EventSink` observer interface through which a run reports
//! every state change, plus `EventLog`, a sink that records events in order.

use crate::types::{Direction, Position};
use serde::{Deserialize, Serialize};

/// Receives the events of a run, synchronously and in execution order.
///
/// The state-change callbacks default to doing nothing. `on_result` carries the verdict
/// and must be implemented.
pub trait EventSink {
    /// Called after every action of the program, whether or not it changed anything.
    fn on_action(&mut self) {}

    /// Called when the robot rotated.
    fn on_turn(&mut self, _new: Direction, _old: Direction) {}

    /// Called when a move or jump succeeded.
    fn on_move(&mut self, _new: Position, _old: Position) {}

    /// Called when a switch cell was flipped, on or off.
    fn on_use_switch(&mut self, _pos: Position) {}

    /// Called exactly once when the run finishes.
    fn on_result(&mut self, success: bool);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_action(&mut self) {
        (**self).on_action()
    }

    fn on_turn(&mut self, new: Direction, old: Direction) {
        (**self).on_turn(new, old)
    }

    fn on_move(&mut self, new: Position, old: Position) {
        (**self).on_move(new, old)
    }

    fn on_use_switch(&mut self, pos: Position) {
        (**self).on_use_switch(pos)
    }

    fn on_result(&mut self, success: bool) {
        (**self).on_result(success)
    }
}

/// A sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_result(&mut self, _success: bool) {}
}

/// One observable event of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Action,
    Turn { new: Direction, old: Direction },
    Move { new: Position, old: Position },
    UseSwitch { pos: Position },
    Result { success: bool },
}

/// Records every event it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Events other than the per-action tick.
    pub fn changes(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| **e != Event::Action)
    }

    /// Number of `Action` events recorded.
    pub fn action_count(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::Action).count()
    }

    /// The verdict of the last `Result` event, if the run finished.
    pub fn result(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Result { success } => Some(*success),
            _ => None,
        })
    }
}

impl EventSink for EventLog {
    fn on_action(&mut self) {
        self.events.push(Event::Action);
    }

    fn on_turn(&mut self, new: Direction, old: Direction) {
        self.events.push(Event::Turn { new, old });
    }

    fn on_move(&mut self, new: Position, old: Position) {
        self.events.push(Event::Move { new, old });
    }

    fn on_use_switch(&mut self, pos: Position) {
        self.events.push(Event::UseSwitch { pos });
    }

    fn on_result(&mut self, success: bool) {
        self.events.push(Event::Result { success });
    }
}
