//! This module provides static checks on action programs, run before execution to catch
//! programs that can never terminate or that carry dead subroutines.
//!
//! The action set has no conditionals, so any subroutine that can reach itself through
//! invocations is guaranteed to recurse without end once it is entered.

use crate::program::ActionProgram;
use crate::types::{GroupName, RobotError};
use std::collections::BTreeSet;

/// Represents problems found during the analysis of an action program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// A group reachable from `main` invokes itself, directly or through the other
    /// subroutine. Holds the invocation cycle, starting and ending with the same group.
    RecursiveInvocation(Vec<GroupName>),
    /// Subroutines that contain actions but are never invoked from `main`.
    UnreachableGroups(Vec<GroupName>),
}

impl From<AnalysisError> for RobotError {
    /// Converts an `AnalysisError` into a `RobotError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::RecursiveInvocation(cycle) => {
                let path = cycle
                    .iter()
                    .map(|g| g.as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                RobotError::ValidationError(format!("Recursive subroutine invocation: {}", path))
            }
            AnalysisError::UnreachableGroups(groups) => RobotError::ValidationError(format!(
                "Groups never invoked from main: {:?}",
                groups
            )),
        }
    }
}

/// Analyzes an `ActionProgram` for runaway recursion and unreachable subroutines.
///
/// # Returns
///
/// * `Ok(())` if no problems are found.
/// * `Err(RobotError::ValidationError)` describing the first problem otherwise.
pub fn analyze(program: &ActionProgram) -> Result<(), RobotError> {
    let errors = [check_recursion, check_unreachable_groups]
        .iter()
        .filter_map(|f| f(program).err())
        .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first) => Err(first.into()),
        None => Ok(()),
    }
}

/// Returns the deepest nesting of subroutine invocations starting from `main`,
/// or `None` when the program recurses.
///
/// A program that never invokes a subroutine has depth 0.
pub fn call_depth(program: &ActionProgram) -> Option<usize> {
    if find_cycle(program).is_some() {
        return None;
    }

    Some(depth_from(program, GroupName::Main))
}

/// Returns the groups reachable from `main` through invocations, `main` included.
pub fn reachable_groups(program: &ActionProgram) -> BTreeSet<GroupName> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![GroupName::Main];

    while let Some(group) = stack.pop() {
        if seen.insert(group) {
            stack.extend(callees(program, group));
        }
    }

    seen
}

/// Checks that no reachable group can invoke itself.
fn check_recursion(program: &ActionProgram) -> Result<(), AnalysisError> {
    match find_cycle(program) {
        Some(cycle) => Err(AnalysisError::RecursiveInvocation(cycle)),
        None => Ok(()),
    }
}

/// Checks that every non-empty subroutine is reachable from `main`.
fn check_unreachable_groups(program: &ActionProgram) -> Result<(), AnalysisError> {
    let reachable = reachable_groups(program);

    let unreachable = [GroupName::F1, GroupName::F2]
        .into_iter()
        .filter(|g| !program.group(*g).is_empty() && !reachable.contains(g))
        .collect::<Vec<_>>();

    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UnreachableGroups(unreachable))
    }
}

/// Distinct groups invoked by a group, in first-invocation order.
fn callees(program: &ActionProgram, group: GroupName) -> Vec<GroupName> {
    let mut out = Vec::new();
    for callee in program.group(group).iter().filter_map(|a| a.invoked_group()) {
        if !out.contains(&callee) {
            out.push(callee);
        }
    }
    out
}

fn find_cycle(program: &ActionProgram) -> Option<Vec<GroupName>> {
    let mut path = vec![GroupName::Main];
    walk(program, &mut path)
}

/// Depth-first walk over invocations, reporting the first group found on its own call path.
fn walk(program: &ActionProgram, path: &mut Vec<GroupName>) -> Option<Vec<GroupName>> {
    let current = *path.last()?;

    for callee in callees(program, current) {
        if let Some(start) = path.iter().position(|g| *g == callee) {
            let mut cycle = path[start..].to_vec();
            cycle.push(callee);
            return Some(cycle);
        }

        path.push(callee);
        if let Some(cycle) = walk(program, path) {
            return Some(cycle);
        }
        path.pop();
    }

    None
}

/// Longest invocation chain below `group`. Only valid for acyclic programs.
fn depth_from(program: &ActionProgram, group: GroupName) -> usize {
    callees(program, group)
        .into_iter()
        .map(|callee| 1 + depth_from(program, callee))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_clean_program() {
        let program = parse("X\nmain: m 1 2\nf1: j 2\nf2: s\n").unwrap();
        assert!(analyze(&program).is_ok());
        assert_eq!(call_depth(&program), Some(2));
    }

    #[test]
    fn test_program_without_subroutines() {
        let program = parse("X\nmain: m m s\n").unwrap();
        assert!(analyze(&program).is_ok());
        assert_eq!(call_depth(&program), Some(0));
    }

    #[test]
    fn test_direct_recursion() {
        let program = parse("X\nmain: 1\nf1: m 1\n").unwrap();

        assert_eq!(
            check_recursion(&program),
            Err(AnalysisError::RecursiveInvocation(vec![
                GroupName::F1,
                GroupName::F1
            ]))
        );
        assert_eq!(call_depth(&program), None);
    }

    #[test]
    fn test_mutual_recursion() {
        let program = parse("X\nmain: 1\nf1: 2\nf2: 1\n").unwrap();

        assert_eq!(
            check_recursion(&program),
            Err(AnalysisError::RecursiveInvocation(vec![
                GroupName::F1,
                GroupName::F2,
                GroupName::F1
            ]))
        );

        match analyze(&program) {
            Err(RobotError::ValidationError(msg)) => assert!(msg.contains("f1 -> f2 -> f1")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_unreached_recursion_is_harmless() {
        // f1 recurses, but main never enters it.
        let program = parse("X\nmain: m\nf1: 1\n").unwrap();

        assert!(check_recursion(&program).is_ok());
        assert_eq!(
            check_unreachable_groups(&program),
            Err(AnalysisError::UnreachableGroups(vec![GroupName::F1]))
        );
    }

    #[test]
    fn test_reachable_groups() {
        let program = parse("X\nmain: 2\nf1: m\nf2: s\n").unwrap();
        let reachable = reachable_groups(&program);

        assert!(reachable.contains(&GroupName::Main));
        assert!(reachable.contains(&GroupName::F2));
        assert!(!reachable.contains(&GroupName::F1));
    }

    #[test]
    fn test_empty_subroutines_are_not_reported() {
        let program = parse("X\nmain: m\n").unwrap();
        assert!(check_unreachable_groups(&program).is_ok());
    }
}
