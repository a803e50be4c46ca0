use ibig::error::OutOfBoundsError;
use strum::EnumMessage;
use strum_macros::{Display, EnumMessage};

use crate::dispatch::Operation;

/// Dispatch error code.
///
/// Each code documents itself; the first paragraph of the documentation is
/// available as [`Error::message`], the rest as [`Error::note`].
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumMessage)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// Unsupported function shape.
    ///
    /// The function declares a number of parameters for which the operation
    /// has no calling convention. Filter and map accept functions taking the
    /// element, optionally followed by the index. Reduce accepts functions
    /// taking the element and the accumulator, optionally followed by the
    /// index.
    ShapeMismatch,
    /// Type mismatch.
    ///
    /// A value handed to a function does not have the type of the parameter
    /// that receives it, or the value a function returned cannot be used as
    /// the result the operation requires. Values are never coerced: an `i64`
    /// parameter only accepts `i64` values.
    TypeMismatch,
    /// Integer overflow.
    ///
    /// An integer value does not fit into the requested integer type.
    Overflow,
}

impl Error {
    /// Locate this error at an element of a traversal.
    pub fn at(self, operation: Operation, index: usize) -> DispatchError {
        DispatchError::Element {
            operation,
            index,
            error: self,
        }
    }

    pub fn code(&self) -> String {
        self.to_string()
    }

    pub fn message(&self) -> &str {
        self.documentation_pieces().0
    }

    pub fn note(&self) -> &str {
        self.documentation_pieces().1
    }

    fn documentation_pieces(&self) -> (&str, &str) {
        if let Some(documentation) = self.get_documentation() {
            let mut pieces = documentation.splitn(2, "\n\n");
            let first = pieces.next().unwrap_or("");
            let second = pieces.next().unwrap_or("");
            (first.trim(), second.trim())
        } else {
            ("", "")
        }
    }
}

impl std::error::Error for Error {}

impl From<OutOfBoundsError> for Error {
    fn from(_e: OutOfBoundsError) -> Self {
        Error::Overflow
    }
}

/// An error code located in a collection operation.
///
/// Shape errors are raised before any element is visited, so they carry the
/// signature of the rejected function instead of an index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DispatchError {
    #[error("{operation}: {error} for function {signature}")]
    Shape {
        operation: Operation,
        signature: String,
        error: Error,
    },
    #[error("{operation}: {error} at index {index}")]
    Element {
        operation: Operation,
        index: usize,
        error: Error,
    },
}

impl DispatchError {
    pub fn operation(&self) -> Operation {
        match self {
            DispatchError::Shape { operation, .. } => *operation,
            DispatchError::Element { operation, .. } => *operation,
        }
    }

    /// The underlying error code.
    pub fn error(&self) -> &Error {
        match self {
            DispatchError::Shape { error, .. } => error,
            DispatchError::Element { error, .. } => error,
        }
    }

    /// The index of the element the traversal stopped at, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            DispatchError::Shape { .. } => None,
            DispatchError::Element { index, .. } => Some(*index),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
/// The result type of collection operations.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
