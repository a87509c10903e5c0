//! Walk an operation sequence and pull out its indels.

use crate::cigar::{Cigar, CigarOp};
use crate::error::{LeftAlignError, Result};
use crate::indel::IndelAllele;

/// `seq[start, start + len)`, cut short at the end of `seq`.
///
/// A window starting past the end is empty.
#[inline]
pub(crate) fn window(seq: &[u8], start: usize, len: usize) -> &[u8] {
    let begin = start.min(seq.len());
    let end = start.saturating_add(len).min(seq.len());
    &seq[begin..end]
}

/// Reference and read offsets while walking a CIGAR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub reference: usize,
    pub read: usize,
}

impl Cursor {
    /// Step past `len` operations of kind `op`. Returns `None` if either
    /// offset would overflow, leaving the cursor where it was.
    fn advance(&mut self, len: usize, op: CigarOp) -> Option<()> {
        let reference = if op.consumes_reference() {
            self.reference.checked_add(len)?
        } else {
            self.reference
        };
        let read = if op.consumes_read() {
            self.read.checked_add(len)?
        } else {
            self.read
        };
        *self = Cursor { reference, read };
        Some(())
    }
}

/// Everything one pass needs from the input alignment.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Indels in reference order
    pub indels: Vec<IndelAllele>,
    /// Reference bases spanned by the alignment, skips included
    pub aligned_length: usize,
    /// Leading soft-clipped read bases
    pub soft_begin: Vec<u8>,
    /// Trailing soft-clipped read bases
    pub soft_end: Vec<u8>,
}

impl Extraction {
    /// Pad the read and reference so they line up column by column.
    ///
    /// Returns `(aligned_reference, aligned_read)`. Insertions show up as `-`
    /// in the reference, deletions as `-` in the read, and soft clips as `*`
    /// in the reference. Only meant for diagnostics.
    pub fn render_aligned(&self, read: &[u8], reference: &[u8]) -> (String, String) {
        let mut aligned_reference = vec![b'*'; self.soft_begin.len()];
        let mut ref_cursor = 0;
        for indel in self.indels.iter().filter(|i| i.insertion) {
            let upto = indel.position.clamp(ref_cursor, reference.len().max(ref_cursor));
            aligned_reference.extend_from_slice(window(reference, ref_cursor, upto - ref_cursor));
            aligned_reference.extend(std::iter::repeat(b'-').take(indel.sequence.len()));
            ref_cursor = upto;
        }
        aligned_reference.extend_from_slice(window(reference, ref_cursor, reference.len()));
        aligned_reference.extend(std::iter::repeat(b'*').take(self.soft_end.len()));

        let mut aligned_read = Vec::with_capacity(read.len());
        let mut read_cursor = 0;
        for indel in self.indels.iter().filter(|i| !i.insertion) {
            let upto = indel.read_position.clamp(read_cursor, read.len().max(read_cursor));
            aligned_read.extend_from_slice(window(read, read_cursor, upto - read_cursor));
            aligned_read.extend(std::iter::repeat(b'-').take(indel.sequence.len()));
            read_cursor = upto;
        }
        aligned_read.extend_from_slice(window(read, read_cursor, read.len()));

        (
            String::from_utf8_lossy(&aligned_reference).into_owned(),
            String::from_utf8_lossy(&aligned_read).into_owned(),
        )
    }
}

/// Walk `cigar` once, collecting indels and soft clips.
///
/// Deletions take their sequence from the reference and insertions from the
/// read. A soft clip seen before any read base is the leading clip; any other
/// soft clip is taken as the trailing one.
///
/// Fails with [`LeftAlignError::LengthOverflow`] if the operation lengths
/// cannot be summed into reference or read offsets.
pub fn extract_indels(read: &[u8], reference: &[u8], cigar: &Cigar) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    let mut cursor = Cursor::default();

    for element in cigar {
        let len = element.len;
        match element.op {
            CigarOp::Deletion | CigarOp::Insertion if len == 0 => {}
            CigarOp::Deletion => {
                extraction.indels.push(IndelAllele::new(
                    false,
                    len,
                    cursor.reference,
                    cursor.read,
                    window(reference, cursor.reference, len).to_vec(),
                ));
            }
            CigarOp::Insertion => {
                extraction.indels.push(IndelAllele::new(
                    true,
                    len,
                    cursor.reference,
                    cursor.read,
                    window(read, cursor.read, len).to_vec(),
                ));
            }
            CigarOp::SoftClip => {
                if cursor.read == 0 {
                    extraction.soft_begin = window(read, 0, len).to_vec();
                } else {
                    extraction.soft_end =
                        window(read, read.len().saturating_sub(len), len).to_vec();
                }
            }
            CigarOp::Match | CigarOp::Skip | CigarOp::HardClip => {}
        }
        cursor
            .advance(len, element.op)
            .ok_or_else(|| LeftAlignError::LengthOverflow {
                cigar: cigar.to_string(),
            })?;
    }

    extraction.aligned_length = cursor.reference;
    Ok(extraction)
}
