//! Target graph structures.
//!
//! A [`TargetSet`] is built once by the Cakefile parser and is read-only
//! afterwards. Iteration follows the order in which targets were first
//! declared, so the execution order derived from it is deterministic.
//!
//! # Examples
//!
//! ```
//! use cake::cakefile;
//!
//! let set = cakefile::from_str("a: b\n\techo A\nb:\n\techo B\n", "Cakefile")
//!     .expect("valid Cakefile");
//! let names: Vec<&str> = set.names().collect();
//! assert_eq!(names, ["a", "b"]);
//! ```

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

/// A named build unit with its dependencies and shell commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Unique, non-empty identifier of the target.
    pub name: String,
    /// Names of targets that must run first, in declaration order.
    pub dependencies: Vec<String>,
    /// Literal shell commands, run in order.
    pub commands: Vec<String>,
}

impl Target {
    /// Create a target with no dependencies or commands.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn absorb(&mut self, other: Self) {
        for dep in other.dependencies {
            if !self.dependencies.contains(&dep) {
                self.dependencies.push(dep);
            }
        }
        self.commands.extend(other.commands);
    }
}

/// Renders as `name: [command, command]`.
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}]", self.name, self.commands.join(", "))
    }
}

/// Mapping from target name to [`Target`], in first-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TargetSet(IndexMap<String, Target>);

impl TargetSet {
    /// Look up a target by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.0.get(name)
    }

    /// Return `true` when a target called `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of distinct targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when no targets are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over targets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.0.values()
    }

    /// Iterate over target names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Store `target`, merging it into an earlier declaration of the same name.
    ///
    /// Returns `true` when a merge happened.
    pub(crate) fn insert_or_merge(&mut self, target: Target) -> bool {
        match self.0.entry(target.name.clone()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().absorb(target);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(target);
                false
            }
        }
    }
}

impl FromIterator<Target> for TargetSet {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        let mut set = Self::default();
        for target in iter {
            set.insert_or_merge(target);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a Target;
    type IntoIter = indexmap::map::Values<'a, String, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}
