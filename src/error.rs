use thiserror::Error;

use crate::pointer::PointerError;

#[derive(Error, Debug, Clone)]
pub enum BexprError {
    /// Malformed predicate syntax.
    #[error("{0}")]
    Parse(String),

    /// A selector path could not be resolved and absence handling does not apply.
    #[error("error finding value in datum: {0}")]
    Selector(#[from] PointerError),

    /// No suitable primitive comparison or math dispatch exists for the operand kinds.
    #[error("{0}")]
    Type(String),

    /// Regex compilation failed, or an operand cannot be matched against one.
    #[error("{0}")]
    Regex(String),

    /// A raw literal or datum value could not be coerced to the requested scalar.
    #[error("{0}")]
    Coerce(String),

    /// The datum could not be serialized into a structured value.
    #[error("failed to serialize datum: {0}")]
    Datum(String),

    /// The evaluator met an AST shape the parser never produces.
    #[error("{0}")]
    InvalidAst(String),
}
