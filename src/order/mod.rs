//! Topological ordering of a [`TargetSet`].
//!
//! The orderer runs a depth-first search over targets in declaration order,
//! visiting each target's dependencies in the order they are listed and
//! appending a target once all of its dependencies have been appended.
//!
//! Cycles are broken silently by default: re-entering a target that is still
//! being visited returns immediately, so the cycle is resolved by whichever
//! member the traversal reached first. [`CyclePolicy::Deny`] turns that
//! re-entry into an [`OrderError::Cycle`] instead.

use std::collections::HashMap;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::graph::{Target, TargetSet};

mod cycle;

/// How the orderer treats a dependency cycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CyclePolicy {
    /// Resolve cycles first-come-first-served without reporting them.
    #[default]
    Break,
    /// Fail with [`OrderError::Cycle`].
    Deny,
}

/// Errors raised while ordering targets.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum OrderError {
    /// A target lists a dependency that is never declared.
    #[error("target [{target}] depends on undeclared target [{dependency}]")]
    #[diagnostic(
        code(cake::order::unknown_dependency),
        help("declare `{dependency}:` or remove it from the dependency list")
    )]
    UnknownDependency {
        /// Target whose dependency list names the missing target.
        target: String,
        /// The undeclared name.
        dependency: String,
    },

    /// A cycle was found while cycles are denied.
    #[error("circular dependency detected: {}", cycle.join(" -> "))]
    #[diagnostic(code(cake::order::cycle))]
    Cycle {
        /// Closed cycle path starting and ending at its smallest member.
        cycle: Vec<String>,
    },
}

/// Target names in the order they must run. Each name appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionOrder(Vec<String>);

impl ExecutionOrder {
    /// Borrow the ordered names.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the ordered names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of names in the order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when the order is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of `name` within the order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }
}

impl<'a> IntoIterator for &'a ExecutionOrder {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Order `set` so every dependency precedes its dependents, breaking cycles.
///
/// # Errors
///
/// Returns [`OrderError::UnknownDependency`] when a dependency is undeclared.
pub fn execution_order(set: &TargetSet) -> Result<ExecutionOrder, OrderError> {
    execution_order_with(set, CyclePolicy::Break)
}

/// Order `set` under the given [`CyclePolicy`].
///
/// # Errors
///
/// Returns [`OrderError::UnknownDependency`] when a dependency is undeclared,
/// or [`OrderError::Cycle`] when `policy` is [`CyclePolicy::Deny`] and the
/// graph contains a cycle.
pub fn execution_order_with(
    set: &TargetSet,
    policy: CyclePolicy,
) -> Result<ExecutionOrder, OrderError> {
    let mut sorter = Sorter::new(set, policy);
    for target in set {
        sorter.visit(target)?;
    }
    Ok(ExecutionOrder(sorter.order))
}

/// Tracks the visitation state of a target during the search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum VisitState {
    Visiting,
    Visited,
}

/// A target on the search path and the index of its next dependency.
struct Frame<'a> {
    target: &'a Target,
    next: usize,
}

/// Depth-first search over an explicit stack of frames.
struct Sorter<'a> {
    set: &'a TargetSet,
    policy: CyclePolicy,
    states: HashMap<&'a str, VisitState>,
    frames: Vec<Frame<'a>>,
    order: Vec<String>,
}

impl<'a> Sorter<'a> {
    fn new(set: &'a TargetSet, policy: CyclePolicy) -> Self {
        Self {
            set,
            policy,
            states: HashMap::with_capacity(set.len()),
            frames: Vec::new(),
            order: Vec::with_capacity(set.len()),
        }
    }

    fn visit(&mut self, root: &'a Target) -> Result<(), OrderError> {
        if self.states.contains_key(root.name.as_str()) {
            return Ok(());
        }
        self.enter(root);

        while let Some(frame) = self.frames.last_mut() {
            let target = frame.target;
            let Some(dep) = target.dependencies.get(frame.next) else {
                self.frames.pop();
                self.states.insert(target.name.as_str(), VisitState::Visited);
                self.order.push(target.name.clone());
                continue;
            };
            frame.next += 1;

            let Some(dep_target) = self.set.get(dep) else {
                return Err(OrderError::UnknownDependency {
                    target: target.name.clone(),
                    dependency: dep.clone(),
                });
            };
            let state = self.states.get(dep_target.name.as_str()).copied();
            match state {
                Some(VisitState::Visited) => {}
                Some(VisitState::Visiting) => self.revisit(&dep_target.name)?,
                None => self.enter(dep_target),
            }
        }
        Ok(())
    }

    fn enter(&mut self, target: &'a Target) {
        self.states.insert(target.name.as_str(), VisitState::Visiting);
        self.frames.push(Frame { target, next: 0 });
    }

    /// Handle a dependency that is still on the search path.
    fn revisit(&self, name: &str) -> Result<(), OrderError> {
        match self.policy {
            CyclePolicy::Break => {
                debug!(target = name, "breaking dependency cycle");
                Ok(())
            }
            CyclePolicy::Deny => {
                let path: Vec<&str> = self
                    .frames
                    .iter()
                    .map(|frame| frame.target.name.as_str())
                    .collect();
                Err(OrderError::Cycle {
                    cycle: cycle::cycle_from_stack(&path, name),
                })
            }
        }
    }
}
