//! Merging of neighbouring indels and reconstruction of the CIGAR.
//!
//! After left shifting, two indels of the same kind may still be separated
//! by a short stretch the earlier one could slide right through. Such a
//! predecessor is moved up against its successor so the two collapse into a
//! single CIGAR element when the operation sequence is rebuilt.

use log::debug;

use crate::cigar::{Cigar, CigarOp};
use crate::entropy::is_homopolymer;
use crate::error::{LeftAlignError, Result};
use crate::extract::{window, Extraction};
use crate::indel::IndelAllele;

/// Slide indels right onto a same-kind successor where that keeps the
/// alignment equivalent.
///
/// Homopolymer indels move when the gap to the successor is a homopolymer
/// in both sequences and starts with the indel's base. Other deletions move
/// in steps of their own length while the reference keeps repeating them,
/// and only if the last step lands them right against the successor. Other
/// insertions stay put.
///
/// Only reference positions are updated.
pub fn shift_right_for_merge(indels: &mut [IndelAllele], read: &[u8], reference: &[u8]) {
    for k in 1..indels.len() {
        let (before, rest) = indels.split_at_mut(k);
        let previous = &mut before[k - 1];
        let indel = &rest[0];

        if previous.insertion != indel.insertion || previous.length == 0 {
            continue;
        }
        let strictly_left = if previous.insertion {
            previous.position < indel.position
        } else {
            previous.position + previous.length < indel.position
        };
        if !strictly_left || previous.read_position >= indel.read_position {
            continue;
        }

        if previous.is_homopolymer() {
            let prev_end_ref = previous.reference_end();
            let prev_end_read = previous.read_end();
            let gap = indel.position - prev_end_ref;
            let seq = window(reference, prev_end_ref, gap);
            let read_seq = window(read, prev_end_read, gap);
            // only the leading base is checked against the indel
            if seq.first().is_some()
                && seq.first() == previous.sequence.first()
                && is_homopolymer(seq)
                && is_homopolymer(read_seq)
            {
                let target = if indel.insertion {
                    indel.position
                } else {
                    indel.position - previous.length
                };
                debug!("moving {} right to {}", previous, target);
                previous.position = target;
            }
        } else if !previous.insertion && previous.sequence.len() == previous.length {
            let length = previous.length;
            let mut pos = previous.position;
            while pos < reference.len()
                && pos + length < indel.position
                && window(reference, pos + length, length) == &previous.sequence[..]
            {
                pos += length;
            }
            if pos > previous.position && pos + length == indel.position {
                debug!("right-merging tandem repeat: moving {} right to {}", previous, pos);
                previous.position = pos;
            }
        }
    }
}

/// Rebuild the operation sequence from the shifted indels.
///
/// Same-kind indels that meet at a boundary are coalesced into one element.
/// An indel that starts before the end of the one before it means the input
/// alignment does not fit its sequences; that is reported as
/// [`LeftAlignError::IndelOverlap`].
pub fn reconstruct(extraction: &Extraction, read: &[u8], reference: &[u8]) -> Result<Cigar> {
    let mut cigar = Cigar::new();
    if !extraction.soft_begin.is_empty() {
        cigar.push(extraction.soft_begin.len(), CigarOp::SoftClip);
    }

    let mut last: Option<&IndelAllele> = None;
    for indel in &extraction.indels {
        let last_end = last.map_or(0, |l| l.reference_end());
        match last {
            Some(prev) if indel.position < last_end => {
                return Err(LeftAlignError::IndelOverlap {
                    indel: indel.to_string(),
                    previous_end: prev.reference_end(),
                    reference: String::from_utf8_lossy(reference).into_owned(),
                    read: String::from_utf8_lossy(read).into_owned(),
                });
            }
            Some(prev) if indel.position == last_end && indel.insertion == prev.insertion => {
                if let Some(element) = cigar.last_mut() {
                    element.len += indel.length;
                }
            }
            _ => {
                if indel.position > last_end {
                    cigar.push(indel.position - last_end, CigarOp::Match);
                }
                cigar.push(indel.length, indel.op());
            }
        }
        last = Some(indel);
    }

    let last_end = last.map_or(0, |l| l.reference_end());
    if last_end < extraction.aligned_length {
        cigar.push(extraction.aligned_length - last_end, CigarOp::Match);
    }
    if !extraction.soft_end.is_empty() {
        cigar.push(extraction.soft_end.len(), CigarOp::SoftClip);
    }

    Ok(cigar)
}
