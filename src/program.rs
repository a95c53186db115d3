//! Solver-independent description of a linear program.
//!
//! Variables are registered under a typed key chosen by the model builder, so
//! rows refer to `(day, history)`-like keys instead of formatted names. The
//! names are only carried along for the solver and for exported solutions.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Continuous,
    Integer,
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<K> {
    pub key: K,
    pub name: String,
    pub domain: Domain,
    pub lower: f64,
    pub upper: f64,
    /// Coefficient in the objective.
    pub cost: f64,
}

/// A named linear range `lower <= Σ coef * x <= upper`.
///
/// Terms hold positions into [`Program::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone)]
pub struct Program<K> {
    name: String,
    sense: Sense,
    columns: Vec<Column<K>>,
    index: HashMap<K, usize>,
    rows: Vec<Row>,
}

impl<K> Program<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Program {
            name: name.into(),
            sense,
            columns: Vec::new(),
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn columns(&self) -> &[Column<K>] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column(&self, key: &K) -> Option<&Column<K>> {
        self.index.get(key).map(|&i| &self.columns[i])
    }

    /// Registers a non-negative, unbounded variable.
    pub fn add_var(
        &mut self,
        key: K,
        name: impl Into<String>,
        domain: Domain,
        cost: f64,
    ) -> Result<usize> {
        self.add_bounded_var(key, name, domain, 0.0, f64::INFINITY, cost)
    }

    pub fn add_bounded_var(
        &mut self,
        key: K,
        name: impl Into<String>,
        domain: Domain,
        lower: f64,
        upper: f64,
        cost: f64,
    ) -> Result<usize> {
        if self.index.contains_key(&key) {
            return Err(Error::invalid(format!("variable {key:?} registered twice")));
        }
        if lower > upper {
            return Err(Error::invalid(format!(
                "variable {key:?} has empty bounds [{lower}, {upper}]"
            )));
        }
        let position = self.columns.len();
        self.index.insert(key.clone(), position);
        self.columns.push(Column {
            key,
            name: name.into(),
            domain,
            lower,
            upper,
            cost,
        });
        Ok(position)
    }

    /// Adds `lower <= Σ coef * x[key] <= upper`.
    ///
    /// Repeated keys are summed into a single term.
    pub fn add_range<'a, I>(
        &mut self,
        name: impl Into<String>,
        terms: I,
        lower: f64,
        upper: f64,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (&'a K, f64)>,
        K: 'a,
    {
        let name = name.into();
        let mut resolved: Vec<(usize, f64)> = Vec::new();
        for (key, coef) in terms {
            let Some(&position) = self.index.get(key) else {
                return Err(Error::invalid(format!(
                    "row {name} references unknown variable {key:?}"
                )));
            };
            match resolved.iter_mut().find(|(p, _)| *p == position) {
                Some((_, c)) => *c += coef,
                None => resolved.push((position, coef)),
            }
        }
        self.rows.push(Row {
            name,
            terms: resolved,
            lower,
            upper,
        });
        Ok(())
    }

    pub fn add_ge<'a, I>(&mut self, name: impl Into<String>, terms: I, rhs: f64) -> Result<()>
    where
        I: IntoIterator<Item = (&'a K, f64)>,
        K: 'a,
    {
        self.add_range(name, terms, rhs, f64::INFINITY)
    }

    pub fn add_le<'a, I>(&mut self, name: impl Into<String>, terms: I, rhs: f64) -> Result<()>
    where
        I: IntoIterator<Item = (&'a K, f64)>,
        K: 'a,
    {
        self.add_range(name, terms, f64::NEG_INFINITY, rhs)
    }

    pub fn add_eq<'a, I>(&mut self, name: impl Into<String>, terms: I, rhs: f64) -> Result<()>
    where
        I: IntoIterator<Item = (&'a K, f64)>,
        K: 'a,
    {
        self.add_range(name, terms, rhs, rhs)
    }

    pub fn summary(&self) -> Summary {
        let integer = self
            .columns
            .iter()
            .filter(|c| c.domain == Domain::Integer)
            .count();
        Summary {
            name: self.name.clone(),
            continuous: self.columns.len() - integer,
            integer,
            rows: self.rows.len(),
            nonzeros: self.rows.iter().map(|r| r.terms.len()).sum(),
        }
    }
}

/// Model size figures, logged before solving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub continuous: usize,
    pub integer: usize,
    pub rows: usize,
    pub nonzeros: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model {}: {} variables ({} continuous, {} integer), {} constraints, {} nonzeros",
            self.name,
            self.continuous + self.integer,
            self.continuous,
            self.integer,
            self.rows,
            self.nonzeros
        )
    }
}
