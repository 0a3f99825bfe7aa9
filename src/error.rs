//! Error types for the allocation pipeline
//!
//! These are broken invariants of the network construction or caller preconditions,
//! never bad-but-tolerable input. Tolerable input problems are reported as
//! [`crate::matching::Warning`].

use thiserror::Error;

/// Allocation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The same node was inserted twice into the node table
    #[error("Collision in node creation: {0} already exists")]
    NodeCollision(String),

    /// A node expected to exist was not found
    #[error("Failed to find node: {0}")]
    MissingNode(String),

    /// An applicant carries flow to more than one target
    #[error("Applicant {0} matched more than once")]
    MultipleMatches(String),

    /// An applicant carries flow to a node that is not a provider
    #[error("Applicant {applicant} matched to non-provider node {node}")]
    UnexpectedTarget { applicant: String, node: String },

    /// A weight table is too short for the requested rank
    #[error("No {table} weight at index {index}")]
    MissingWeight { table: &'static str, index: usize },

    /// A weight table is shorter than the longest list of the applicants ranked by it
    #[error("{table} weights have {len} entries, applicants need {required}")]
    WeightTableTooShort {
        table: &'static str,
        required: usize,
        len: usize,
    },

    /// Weights and fallbacks must not be negative
    #[error("Negative {table} weight {value}")]
    NegativeWeight { table: &'static str, value: i64 },

    /// Cap percentage outside `0..=100`
    #[error("Capped percentage {0} is not within 0..=100")]
    InvalidPercentage(u32),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
