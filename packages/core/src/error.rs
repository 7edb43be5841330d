use thiserror::Error;

use crate::role::{Position, TermTypeSet};
use crate::term::TermType;

/// Errors raised synchronously while constructing a term or quad.
///
/// A value that was constructed successfully is well-formed; none of these
/// errors can surface later.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FactoryError {
    /// Malformed or mutually exclusive construction arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A term's variant is not permitted in the quad position it was given for.
    #[error("{found} is not permitted as {position}; expected one of {permitted}")]
    RoleViolation {
        position: Position,
        found: TermType,
        permitted: TermTypeSet,
    },

    /// An optional factory capability was invoked but is not enabled.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}
