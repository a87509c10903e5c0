//! A single insertion or deletion pulled out of an alignment.
//!
//! `position` is a 0-based offset into the reference window. For an
//! insertion it is the reference base before which the read bases were
//! inserted; for a deletion it is the first deleted reference base.
//! `read_position` is the matching 0-based offset into the read.
use std::cmp::Ordering;
use std::fmt;

use crate::cigar::CigarOp;
use crate::entropy::is_homopolymer;

#[derive(Debug, Clone)]
pub struct IndelAllele {
    pub insertion: bool,
    pub length: usize,
    pub position: usize,
    pub read_position: usize,
    /// Inserted read bases or deleted reference bases
    pub sequence: Vec<u8>,
}

impl IndelAllele {
    pub fn new(
        insertion: bool,
        length: usize,
        position: usize,
        read_position: usize,
        sequence: Vec<u8>,
    ) -> Self {
        Self {
            insertion,
            length,
            position,
            read_position,
            sequence,
        }
    }

    /// Reference offset just past this indel
    #[inline]
    pub fn reference_end(&self) -> usize {
        if self.insertion {
            self.position
        } else {
            self.position + self.length
        }
    }

    /// Read offset just past this indel
    #[inline]
    pub fn read_end(&self) -> usize {
        if self.insertion {
            self.read_position + self.length
        } else {
            self.read_position
        }
    }

    pub fn is_homopolymer(&self) -> bool {
        is_homopolymer(&self.sequence)
    }

    pub fn op(&self) -> CigarOp {
        if self.insertion {
            CigarOp::Insertion
        } else {
            CigarOp::Deletion
        }
    }

    /// Whether this indel, sitting before `next` in reference order, lets
    /// `next` move to reference offset `candidate`.
    ///
    /// Insertions hold their successor at or after their own position,
    /// deletions at or after their last deleted base.
    #[inline]
    pub fn admits(&self, candidate: usize) -> bool {
        candidate >= self.reference_end()
    }

    /// Rotate the sequence right by one base, so the last base leads.
    pub fn rotate_right(&mut self) {
        self.sequence.rotate_right(1);
    }
}

impl fmt::Display for IndelAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            if self.insertion { 'i' } else { 'd' },
            self.position,
            self.read_position,
            String::from_utf8_lossy(&self.sequence)
        )
    }
}

impl PartialEq for IndelAllele {
    fn eq(&self, other: &Self) -> bool {
        self.insertion == other.insertion
            && self.length == other.length
            && self.position == other.position
            && self.sequence == other.sequence
    }
}

impl Eq for IndelAllele {}

impl PartialOrd for IndelAllele {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndelAllele {
    /// Lexicographic order of the printed form. Only meant for ordered
    /// containers; it does not reflect reference order.
    ///
    /// The printed form includes `read_position`, which equality ignores, so
    /// two alleles can be `==` yet compare as `Less` or `Greater`. A
    /// `BTreeSet` keeps both.
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}
