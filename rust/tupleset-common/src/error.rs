use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn out_of_range(index: usize, len: usize) -> Error {
        ErrorKind::OutOfRange { index, len }.into()
    }

    pub fn no_such_element(direction: Direction) -> Error {
        ErrorKind::NoSuchElement { direction }.into()
    }

    pub fn invalid_state(operation: impl Into<String>) -> Error {
        ErrorKind::InvalidState {
            operation: operation.into(),
        }
        .into()
    }

    pub fn unknown_subset(subset_id: impl Into<String>) -> Error {
        ErrorKind::UnknownSubset {
            subset_id: subset_id.into(),
        }
        .into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    /// Returns `true` if this is an [`ErrorKind::OutOfRange`] error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    /// Returns `true` if this is an [`ErrorKind::NoSuchElement`] error.
    pub fn is_no_such_element(&self) -> bool {
        matches!(self.kind(), ErrorKind::NoSuchElement { .. })
    }

    /// Returns `true` if this is an [`ErrorKind::InvalidState`] error.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidState { .. })
    }

    /// Returns `true` if this is an [`ErrorKind::UnknownSubset`] error.
    pub fn is_unknown_subset(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnknownSubset { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An absolute or subset-relative index lies outside the valid range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Cursor traversal found no row in the requested direction.
    #[error("no {direction} element")]
    NoSuchElement { direction: Direction },

    /// A cursor-relative modification was attempted without a preceding
    /// traversal step, or after a structural change discarded it.
    #[error("{operation} requires a row returned by the last cursor move")]
    InvalidState { operation: String },

    #[error("unknown subset '{subset_id}'")]
    UnknownSubset { subset_id: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

/// Direction of a cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => f.write_str("next"),
            Direction::Previous => f.write_str("previous"),
        }
    }
}
