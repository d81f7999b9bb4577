use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A single failing entry of a bulk index specification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexFailure {
    /// Position of the entry within the input specification.
    pub position: usize,
    /// The raw signed value supplied at that position.
    pub value: i64,
}

impl fmt::Display for IndexFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {} (value {})", self.position, self.value)
    }
}

fn list_failures(failures: &[IndexFailure]) -> String {
    let parts: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
    parts.join(", ")
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// A numeric argument violated a stated constraint.
    #[error("{op}: {reason}")]
    InvalidArgument { op: &'static str, reason: String },

    /// One or more positions fell outside the valid range. Every failing
    /// entry of the specification is enumerated, not just the first.
    #[error("{op}: {} out of range for length {len}", list_failures(.failures))]
    IndexOutOfRange {
        op: &'static str,
        len: usize,
        failures: Vec<IndexFailure>,
    },

    /// An element could not be re-constructed into the target member type.
    #[error("{op}: element at position {position}: {detail}")]
    TypeMismatch {
        op: &'static str,
        position: usize,
        detail: String,
    },

    /// `then`/`else_` called with no open `if_` block.
    #[error("`{call}` called with no active block")]
    NoActiveBlock { call: &'static str },

    /// A multi-sequence combinator received sequences of differing lengths.
    #[error("{op}: length mismatch ({left} vs {right})")]
    LengthMismatch {
        op: &'static str,
        left: usize,
        right: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{Error, IndexFailure};

    #[test]
    fn index_error_message_enumerates_all_failures() {
        let err = Error::IndexOutOfRange {
            op: "keep_indices",
            len: 5,
            failures: vec![
                IndexFailure {
                    position: 1,
                    value: -8,
                },
                IndexFailure {
                    position: 2,
                    value: 9,
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("keep_indices"));
        assert!(message.contains("entry 1 (value -8)"));
        assert!(message.contains("entry 2 (value 9)"));
        assert!(message.contains("length 5"));
    }

    #[test]
    fn no_active_block_names_the_call() {
        let err = Error::NoActiveBlock { call: "then" };
        assert_eq!(err.to_string(), "`then` called with no active block");
    }
}
