//! Atomic tasks and the histories built from them.
//!
//! A [`History`] describes which task one employee performed on each day up to
//! and including its final day. The workforce model creates one decision
//! variable per history, so the full set of histories for a horizon is
//! enumerated up front by [`generate_histories`] and never filtered: business
//! rules are expressed later as constraints.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single-character job label, e.g. `R` or `M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(pub char);

impl Task {
    pub fn label(self) -> char {
        self.0
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Consecutive-day task assignments of one employee, day 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct History(Vec<Task>);

impl History {
    pub fn new(tasks: Vec<Task>) -> Self {
        History(tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zero-based index of the final day. Panics on an empty history.
    pub fn day(&self) -> usize {
        self.0.len() - 1
    }

    /// Task performed on the final day.
    pub fn last(&self) -> Option<Task> {
        self.0.last().copied()
    }

    pub fn get(&self, day: usize) -> Option<Task> {
        self.0.get(day).copied()
    }

    /// The history of the previous day, i.e. this one without its final task.
    pub fn prefix(&self) -> History {
        let end = self.0.len().saturating_sub(1);
        History(self.0[..end].to_vec())
    }

    pub fn extended(&self, task: Task) -> History {
        let mut tasks = Vec::with_capacity(self.0.len() + 1);
        tasks.extend_from_slice(&self.0);
        tasks.push(task);
        History(tasks)
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for task in &self.0 {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

impl FromStr for History {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::invalid("history must contain at least one task"));
        }
        Ok(History(s.chars().map(Task).collect()))
    }
}

/// Enumerates every task history for a horizon of `days` days.
///
/// Element `d` of the result holds all `alphabet.len().pow(d + 1)` histories of
/// length `d + 1`, in Cartesian-product order with the last day varying
/// fastest. For `["R", "M"]` and two days this is `[R, M]`, `[RR, RM, MR, MM]`.
///
/// Fails with [`Error::InvalidArgument`] if the alphabet is empty, contains a
/// label twice, or `days` is zero.
pub fn generate_histories(alphabet: &[Task], days: usize) -> Result<Vec<Vec<History>>> {
    if alphabet.is_empty() {
        return Err(Error::invalid("task alphabet is empty"));
    }
    if days == 0 {
        return Err(Error::invalid("planning horizon must be at least one day"));
    }
    let mut seen = HashSet::with_capacity(alphabet.len());
    for task in alphabet {
        if !seen.insert(task) {
            return Err(Error::invalid(format!("task {task} appears twice in the alphabet")));
        }
    }

    let mut histories = Vec::with_capacity(days);
    for day in 0..days {
        histories.push(cartesian_power(alphabet, day + 1));
    }
    Ok(histories)
}

fn cartesian_power(alphabet: &[Task], len: usize) -> Vec<History> {
    let mut current = vec![History::default()];
    for _ in 0..len {
        let mut next = Vec::with_capacity(current.len() * alphabet.len());
        for prefix in &current {
            for &task in alphabet {
                next.push(prefix.extended(task));
            }
        }
        current = next;
    }
    current
}

/// Whether an employee following `history` keeps the same task on `day` as on
/// the day before. Always true on day 0.
///
/// Only the last transition is inspected; earlier switches inside the history
/// do not matter.
pub fn keeps_task(day: usize, history: &History) -> bool {
    if day == 0 {
        return true;
    }
    match (history.get(day), history.get(day - 1)) {
        (Some(today), Some(yesterday)) => today == yesterday,
        _ => false,
    }
}
