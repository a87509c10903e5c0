//! Left alignment of indels in CIGAR alignments.
//!
//! Indels inside repeats can be placed in several equally good ways. This
//! crate moves every insertion and deletion as far left as it can go without
//! introducing a mismatch, merges neighbouring indels of the same kind, and
//! repeats until the CIGAR no longer changes, giving one canonical form per
//! alignment.
//!
//! ```
//! use leftalign::{stably_left_align, Cigar};
//!
//! let reference = b"GTGTGACGTGT";
//! let read = b"GTGACGTGT";
//! let mut cigar: Cigar = "2M2D7M".parse().unwrap();
//! assert!(stably_left_align(read, reference, &mut cigar, 10).unwrap());
//! assert_eq!(cigar.to_string(), "2D9M");
//! ```

pub mod batch;
pub mod cigar;
pub mod cli;
pub mod config;
pub mod entropy;
pub mod error;
pub mod extract;
pub mod indel;
pub mod left_align;
pub mod merge;
pub mod shift;

pub use batch::{normalize_all, AlignmentRecord, BatchSummary, NormalizedRecord, Status};
pub use cigar::{Cigar, CigarElement, CigarOp};
pub use config::LeftAlignConfig;
pub use entropy::{entropy, is_homopolymer};
pub use error::{CigarParseError, LeftAlignError};
pub use indel::IndelAllele;
pub use left_align::{left_align, stably_left_align};
