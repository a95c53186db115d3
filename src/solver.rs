use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use log::{debug, info};
use russcip::{Model, ObjSense, ProblemOrSolving, Status, VarType, WithSolutions};

use crate::error::{Error, Result};
use crate::program::{Domain, Program, Sense};

/// Values the solver assigned to every variable of a [`Program`].
#[derive(Debug, Clone)]
pub struct Plan<K> {
    problem: String,
    objective: f64,
    keys: Vec<K>,
    names: Vec<String>,
    values: Vec<f64>,
    index: HashMap<K, usize>,
}

impl<K> Plan<K>
where
    K: Clone + Eq + Hash,
{
    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn value(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&i| self.values[i])
    }

    /// `(key, name, value)` in the order the variables were registered.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &str, f64)> + '_ {
        self.keys
            .iter()
            .zip(&self.names)
            .zip(&self.values)
            .map(|((key, name), &value)| (key, name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Hands `program` to SCIP and reads back the optimal assignment.
pub fn solve<K>(program: &Program<K>) -> Result<Plan<K>>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    info!("{}", program.summary());

    let sense = match program.sense() {
        Sense::Minimize => ObjSense::Minimize,
        Sense::Maximize => ObjSense::Maximize,
    };
    let mut model = Model::new()
        .hide_output()
        .include_default_plugins()
        .create_prob(program.name())
        .set_obj_sense(sense);

    let mut vars = Vec::with_capacity(program.columns().len());
    for column in program.columns() {
        let var_type = match column.domain {
            Domain::Continuous => VarType::Continuous,
            Domain::Integer => VarType::Integer,
        };
        vars.push(model.add_var(
            column.lower,
            column.upper,
            column.cost,
            &column.name,
            var_type,
        ));
    }

    for row in program.rows() {
        let row_vars: Vec<_> = row.terms.iter().map(|&(p, _)| &vars[p]).collect();
        let coefs: Vec<f64> = row.terms.iter().map(|&(_, c)| c).collect();
        debug!("row {}: {} terms in [{}, {}]", row.name, coefs.len(), row.lower, row.upper);
        model.add_cons(row_vars, &coefs, row.lower, row.upper, &row.name);
    }

    let solved_model = model.solve();
    let status = solved_model.status();
    info!("{} finished with status {:?}", program.name(), status);

    match status {
        Status::Optimal => {}
        Status::Infeasible | Status::Inforunbd => return Err(Error::Infeasible),
        other => return Err(Error::Unsolved(format!("{other:?}"))),
    }

    let Some(sol) = solved_model.best_sol() else {
        return Err(Error::Unsolved("optimal without a stored solution".to_string()));
    };

    let mut keys = Vec::with_capacity(vars.len());
    let mut names = Vec::with_capacity(vars.len());
    let mut values = Vec::with_capacity(vars.len());
    let mut index = HashMap::with_capacity(vars.len());
    for (i, (column, var)) in program.columns().iter().zip(&vars).enumerate() {
        keys.push(column.key.clone());
        names.push(column.name.clone());
        let value = sol.val(var);
        values.push(match column.domain {
            // SCIP reports integers within its feasibility tolerance
            Domain::Integer => value.round(),
            Domain::Continuous => value,
        });
        index.insert(column.key.clone(), i);
    }

    Ok(Plan {
        problem: program.name().to_string(),
        objective: solved_model.obj_val(),
        keys,
        names,
        values,
        index,
    })
}
