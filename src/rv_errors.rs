use thiserror::Error;

#[derive(Error, Debug)]
pub enum RvError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Eccentric anomaly computation not converged after {iterations} iterations (last step: {last_step:e})"
    )]
    ConvergenceError { iterations: usize, last_step: f64 },

    #[error("Malformed parameter line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Parameter '{key}' was not converted to a number ({value}), check the parameter file")]
    UnconvertedParameter { key: String, value: String },

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Display mode '{0}' is not implemented")]
    NotImplemented(String),

    #[error("Division by zero: {0}")]
    DivisionError(String),

    #[error("Unknown observatory '{code}'. Valid codes are: {valid}")]
    UnknownObservatory { code: String, valid: String },

    #[error("Invalid target '{0}', expected NAME:RA_DEG:DEC_DEG")]
    InvalidTarget(String),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Time conversion error: {0}")]
    TimeError(#[from] hifitime::HifitimeError),
}

impl PartialEq for RvError {
    fn eq(&self, other: &Self) -> bool {
        use RvError::*;
        match (self, other) {
            (InvalidInput(a), InvalidInput(b)) => a == b,
            (
                ConvergenceError { iterations: a, .. },
                ConvergenceError { iterations: b, .. },
            ) => a == b,
            (ParseError { line: a, reason: ra }, ParseError { line: b, reason: rb }) => {
                a == b && ra == rb
            }
            (UnconvertedParameter { key: a, .. }, UnconvertedParameter { key: b, .. }) => a == b,
            (MissingParameter(a), MissingParameter(b)) => a == b,
            (NotImplemented(a), NotImplemented(b)) => a == b,
            (DivisionError(a), DivisionError(b)) => a == b,
            (UnknownObservatory { code: a, .. }, UnknownObservatory { code: b, .. }) => a == b,
            (InvalidTarget(a), InvalidTarget(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,

            // not comparable: same variant means equal
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (TimeError(_), TimeError(_)) => true,

            _ => false,
        }
    }
}
