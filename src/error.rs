use std::fmt;

/// Errors raised while building or solving a planning model.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The caller supplied input the model cannot be built from.
    InvalidArgument(String),
    /// The solver proved that no assignment satisfies every row.
    Infeasible,
    /// The solver stopped without an optimal solution (carries the status it reported).
    Unsolved(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::Infeasible => write!(f, "model is infeasible"),
            Error::Unsolved(status) => write!(f, "solver finished with status: {status}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
