//! Multi-day workforce allocation.
//!
//! Every employee follows one task history. A history that switches task on
//! its final day is rated with `switch_factor` applied to the task's base
//! efficiency; the histories ending in a task must together meet that task's
//! daily target, and the head-count of every day is fixed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::program::{Domain, Program, Sense};
use crate::solver::{self, Plan};
use crate::tasks::{History, Task, generate_histories, keeps_task};

/// A job type and the units one employee produces per hour doing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRate {
    pub task: Task,
    pub efficiency: f64,
}

/// Units of `task` required on each day of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTarget {
    pub task: Task,
    pub per_day: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceConfig {
    /// Alphabet of the task histories, in reporting order.
    pub tasks: Vec<TaskRate>,
    pub days: usize,
    pub total_employees: f64,
    pub hours_per_day: f64,
    /// Multiplier on the base efficiency when a history changes task on its final day.
    pub switch_factor: f64,
    /// Employees whose final task is this one are not paid.
    pub idle_task: Task,
    pub cost_per_employee: f64,
    pub targets: Vec<DailyTarget>,
}

impl Default for WorkforceConfig {
    fn default() -> Self {
        let rate = |task, efficiency| TaskRate {
            task: Task(task),
            efficiency,
        };
        let target = |task, per_day: [f64; 3]| DailyTarget {
            task: Task(task),
            per_day: per_day.to_vec(),
        };
        WorkforceConfig {
            tasks: vec![rate('R', 15.0), rate('M', 35.0), rate('O', 30.0), rate('N', 0.0)],
            days: 3,
            total_employees: 18.0,
            hours_per_day: 8.0,
            switch_factor: 1.1,
            idle_task: Task('N'),
            cost_per_employee: 12.0,
            targets: vec![
                target('R', [450.0, 500.0, 350.0]),
                target('O', [300.0, 0.0, 360.0]),
                target('M', [150.0, 139.0, 143.0]),
                target('N', [0.0, 0.0, 0.0]),
            ],
        }
    }
}

impl WorkforceConfig {
    pub fn alphabet(&self) -> Vec<Task> {
        self.tasks.iter().map(|r| r.task).collect()
    }

    pub fn efficiency(&self, task: Task) -> Option<f64> {
        self.tasks
            .iter()
            .find(|r| r.task == task)
            .map(|r| r.efficiency)
    }

    /// Checks the parts of the configuration the history generator does not.
    pub fn validate(&self) -> Result<()> {
        for rate in &self.tasks {
            if !rate.efficiency.is_finite() || rate.efficiency < 0.0 {
                return Err(Error::invalid(format!(
                    "task {} has efficiency {}",
                    rate.task, rate.efficiency
                )));
            }
        }
        if self.efficiency(self.idle_task).is_none() {
            return Err(Error::invalid(format!(
                "idle task {} is not one of the tasks",
                self.idle_task
            )));
        }
        if !(self.hours_per_day > 0.0) {
            return Err(Error::invalid("hours_per_day must be positive"));
        }
        if !(self.switch_factor > 0.0) {
            return Err(Error::invalid("switch_factor must be positive"));
        }
        if !(self.total_employees >= 0.0) {
            return Err(Error::invalid("total_employees must not be negative"));
        }
        for target in &self.targets {
            if self.efficiency(target.task).is_none() {
                return Err(Error::invalid(format!(
                    "target for unknown task {}",
                    target.task
                )));
            }
            if target.per_day.len() != self.days {
                return Err(Error::invalid(format!(
                    "task {} has {} daily targets for a {}-day horizon",
                    target.task,
                    target.per_day.len(),
                    self.days
                )));
            }
        }
        Ok(())
    }
}

/// The allocation program together with the histories it was built from.
#[derive(Debug, Clone)]
pub struct WorkforceModel {
    alphabet: Vec<Task>,
    histories: Vec<Vec<History>>,
    program: Program<History>,
}

pub fn build(config: &WorkforceConfig) -> Result<WorkforceModel> {
    config.validate()?;
    let alphabet = config.alphabet();
    let histories = generate_histories(&alphabet, config.days)?;

    let mut program = Program::new("workforce_allocation", Sense::Minimize);
    for history in histories.iter().flatten() {
        let cost = if history.last() == Some(config.idle_task) {
            0.0
        } else {
            config.cost_per_employee
        };
        program.add_var(
            history.clone(),
            format!("x_{history}"),
            Domain::Continuous,
            cost,
        )?;
    }

    for target in &config.targets {
        let efficiency = config.efficiency(target.task).unwrap_or_default();
        for (day, &goal) in target.per_day.iter().enumerate() {
            let terms = histories[day]
                .iter()
                .filter(|h| h.last() == Some(target.task))
                .map(|h| {
                    let rate = if keeps_task(day, h) {
                        efficiency
                    } else {
                        efficiency * config.switch_factor
                    };
                    (h, config.hours_per_day * rate)
                });
            program.add_ge(format!("target_{}_day_{}", target.task, day + 1), terms, goal)?;
        }
    }

    for (day, set) in histories.iter().enumerate() {
        program.add_eq(
            format!("employees_day_{}", day + 1),
            set.iter().map(|h| (h, 1.0)),
            config.total_employees,
        )?;
    }

    Ok(WorkforceModel {
        alphabet,
        histories,
        program,
    })
}

impl WorkforceModel {
    pub fn program(&self) -> &Program<History> {
        &self.program
    }

    pub fn histories(&self) -> &[Vec<History>] {
        &self.histories
    }

    pub fn solve(self) -> Result<Staffing> {
        let plan = solver::solve(&self.program)?;
        Ok(Staffing {
            alphabet: self.alphabet,
            histories: self.histories,
            plan,
        })
    }
}

/// A solved allocation.
#[derive(Debug, Clone)]
pub struct Staffing {
    alphabet: Vec<Task>,
    histories: Vec<Vec<History>>,
    plan: Plan<History>,
}

impl Staffing {
    pub fn plan(&self) -> &Plan<History> {
        &self.plan
    }

    pub fn objective(&self) -> f64 {
        self.plan.objective()
    }

    /// Employees following `history`.
    pub fn employees(&self, history: &History) -> Option<f64> {
        self.plan.value(history)
    }

    /// Head-count per task performed on each day, tasks in alphabet order.
    pub fn per_day(&self) -> Vec<Vec<(Task, f64)>> {
        self.histories
            .iter()
            .map(|set| {
                self.alphabet
                    .iter()
                    .map(|&task| {
                        let total: f64 = set
                            .iter()
                            .filter(|h| h.last() == Some(task))
                            .filter_map(|h| self.plan.value(h))
                            .sum();
                        (task, total)
                    })
                    .collect()
            })
            .collect()
    }
}
