//! Error types for CIGAR parsing and indel realignment.

use thiserror::Error;

/// Result type alias for realignment operations
pub type Result<T> = std::result::Result<T, LeftAlignError>;

/// Failure of a single alignment's normalization.
///
/// These never describe a problem with the process as a whole; callers
/// normalizing many alignments report the failing one and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeftAlignError {
    /// An indel was realigned to the left of the end of the indel before it.
    ///
    /// The operation sequence no longer agrees with the read and reference,
    /// so anything rebuilt from it would be meaningless.
    #[error(
        "indel {indel} realigned left of the previous indel ending at {previous_end}\n{reference}\n{read}"
    )]
    IndelOverlap {
        /// Printed form of the offending indel
        indel: String,
        /// Reference end of the indel before it
        previous_end: usize,
        /// Reference window the read was aligned against
        reference: String,
        /// The read
        read: String,
    },

    /// Operation lengths add up past what a reference or read offset can hold.
    #[error("CIGAR {cigar} spans more bases than can be addressed")]
    LengthOverflow {
        /// Printed form of the rejected CIGAR
        cigar: String,
    },
}

/// Errors raised while parsing CIGAR text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CigarParseError {
    /// Operation code outside of M, I, D, S, H, N
    #[error("unknown CIGAR operation '{0}'")]
    UnknownOperation(char),

    /// An operation with length zero
    #[error("CIGAR operation lengths must be positive")]
    ZeroLength,

    /// Operation code without a preceding length
    #[error("CIGAR operation '{0}' has no length")]
    MissingLength(char),

    /// Digits left over after the last operation code
    #[error("CIGAR ends with a length but no operation: '{0}'")]
    TrailingLength(String),

    /// Length that does not fit in a usize
    #[error("invalid CIGAR operation length '{0}'")]
    InvalidLength(String),
}
