//! Error types for core value parsing.

use std::error::Error;
use std::fmt;

/// A string did not name a [`Direction`](crate::Direction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.input)
    }
}

impl Error for ParseDirectionError {}
