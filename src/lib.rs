//! Production-planning models solved with SCIP.
//!
//! Two problems are modelled: allocating a fixed workforce to tasks over a
//! multi-day horizon ([`workforce`]), and assembling furniture from salvaged
//! and bought parts ([`furniture`]). Both describe their linear program as a
//! [`program::Program`] and hand it to [`solver::solve`].

pub mod config;
pub mod error;
pub mod export;
pub mod furniture;
pub mod logging;
pub mod program;
pub mod solver;
pub mod tasks;
pub mod workforce;

pub use error::{Error, Result};
pub use solver::{Plan, solve};
pub use tasks::{History, Task, generate_histories, keeps_task};
