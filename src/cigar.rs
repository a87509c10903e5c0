//! CIGAR operations, elements and the operation sequence they form
use std::fmt;
use std::str::FromStr;

use crate::error::CigarParseError;

/// Kind of a single CIGAR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// Match or mismatch, consumes reference and read
    Match,
    /// Bases present in the read only
    Insertion,
    /// Bases present in the reference only
    Deletion,
    /// Read bases kept in the record but not aligned
    SoftClip,
    /// Read bases removed from the record
    HardClip,
    /// Reference bases skipped over, e.g. an intron
    Skip,
}

impl CigarOp {
    /// One-letter SAM code
    pub fn code(self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Insertion => 'I',
            CigarOp::Deletion => 'D',
            CigarOp::SoftClip => 'S',
            CigarOp::HardClip => 'H',
            CigarOp::Skip => 'N',
        }
    }

    pub fn from_code(code: char) -> Result<Self, CigarParseError> {
        match code {
            'M' => Ok(CigarOp::Match),
            'I' => Ok(CigarOp::Insertion),
            'D' => Ok(CigarOp::Deletion),
            'S' => Ok(CigarOp::SoftClip),
            'H' => Ok(CigarOp::HardClip),
            'N' => Ok(CigarOp::Skip),
            other => Err(CigarParseError::UnknownOperation(other)),
        }
    }

    pub fn consumes_reference(self) -> bool {
        matches!(self, CigarOp::Match | CigarOp::Deletion | CigarOp::Skip)
    }

    pub fn consumes_read(self) -> bool {
        matches!(self, CigarOp::Match | CigarOp::Insertion | CigarOp::SoftClip)
    }
}

/// A run of `len` operations of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CigarElement {
    pub len: usize,
    pub op: CigarOp,
}

impl CigarElement {
    pub fn new(len: usize, op: CigarOp) -> Self {
        Self { len, op }
    }
}

impl fmt::Display for CigarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.op.code())
    }
}

/// Ordered alignment-operation sequence describing how a read lies on a
/// reference window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cigar(Vec<CigarElement>);

impl Cigar {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, len: usize, op: CigarOp) {
        self.0.push(CigarElement::new(len, op));
    }

    pub fn elements(&self) -> &[CigarElement] {
        &self.0
    }

    pub fn last_mut(&mut self) -> Option<&mut CigarElement> {
        self.0.last_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CigarElement> {
        self.0.iter()
    }

    /// Number of reference bases consumed (M + D + N)
    pub fn reference_length(&self) -> usize {
        self.0
            .iter()
            .filter(|e| e.op.consumes_reference())
            .map(|e| e.len)
            .sum()
    }

    /// Number of read bases consumed (M + I + S)
    pub fn read_length(&self) -> usize {
        self.0
            .iter()
            .filter(|e| e.op.consumes_read())
            .map(|e| e.len)
            .sum()
    }

    /// True if the sequence contains at least one insertion or deletion
    pub fn has_indels(&self) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e.op, CigarOp::Insertion | CigarOp::Deletion))
    }
}

impl From<Vec<CigarElement>> for Cigar {
    fn from(elements: Vec<CigarElement>) -> Self {
        Self(elements)
    }
}

impl<'a> IntoIterator for &'a Cigar {
    type Item = &'a CigarElement;
    type IntoIter = std::slice::Iter<'a, CigarElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.0 {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

impl FromStr for Cigar {
    type Err = CigarParseError;

    /// Parse SAM-style CIGAR text such as `"10M2D5M"`. `"*"` is the empty
    /// sequence.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut cigar = Cigar::new();
        if s == "*" {
            return Ok(cigar);
        }

        let mut digits = String::new();
        for ch in s.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }
            if digits.is_empty() {
                // unknown codes win over the missing length
                return Err(match CigarOp::from_code(ch) {
                    Ok(_) => CigarParseError::MissingLength(ch),
                    Err(e) => e,
                });
            }
            let len = digits
                .parse::<usize>()
                .map_err(|_| CigarParseError::InvalidLength(digits.clone()))?;
            if len == 0 {
                return Err(CigarParseError::ZeroLength);
            }
            cigar.push(len, CigarOp::from_code(ch)?);
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(CigarParseError::TrailingLength(digits));
        }
        Ok(cigar)
    }
}
