use thiserror::Error;

use super::Kind;

/**********************************************\
|* Converting between rust values and Values  *|
\**********************************************/
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    #[error(
        "Can't convert builtin type '{builtin_type}' to rust type '{rust_type}'"
    )]
    Conversion {
        builtin_type: String,
        rust_type: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error("type error: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("{kind} has no method '{method}'")]
    UnknownMethod { kind: Kind, method: String },

    #[error(
        "Method {name} takes {arity} arguments but got {num_args_provided}"
    )]
    Arity {
        name: String,
        arity: usize,
        num_args_provided: usize,
    },

    #[error("integer overflow: {lhs} + {rhs}")]
    Overflow { lhs: i64, rhs: i64 },
}

impl EvalError {
    /// Shorthand for the common "wanted one kind, got another" failure
    pub fn type_mismatch(
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let err = EvalError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        };
        log::debug!("{err}");
        err
    }
}

pub type EResult<T> = Result<T, EvalError>;
