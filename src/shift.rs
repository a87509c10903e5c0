//! Left shifting of indels through repeats and exchangeable flanks.
//!
//! Every indel is moved left as far as it can go without introducing a
//! mismatch and without crossing the indel before it. Two moves are tried,
//! in order:
//!
//! 1. Repeat shift: for each period `p` dividing the indel length, smallest
//!    first, step left by `p` while the `length` bases `p` to the left are the
//!    indel sequence in both the reference and the read.
//! 2. Flank exchange: step left one base at a time while the base crossed
//!    matches in read and reference and equals the indel's last base,
//!    rotating the indel sequence as it goes.
//!
//! ```text
//! GTGTGACGTGT        GTGTGACGTGT
//! GTGTG-----T  --->  GT-----GTGT
//! ```

use log::debug;

use crate::extract::window;
use crate::indel::IndelAllele;

/// Shift every indel of `indels` left, in reference order.
///
/// Each indel is bounded by its already-shifted predecessor.
pub fn shift_indels_left(indels: &mut [IndelAllele], read: &[u8], reference: &[u8]) {
    for k in 0..indels.len() {
        let (before, rest) = indels.split_at_mut(k);
        let previous = before.last();
        let indel = &mut rest[0];
        repeat_shift(indel, previous, read, reference);
        flank_exchange(indel, previous, read, reference);
    }
}

/// Move `indel` left by whole repeat periods of its own sequence.
pub fn repeat_shift(
    indel: &mut IndelAllele,
    previous: Option<&IndelAllele>,
    read: &[u8],
    reference: &[u8],
) {
    let length = indel.length;
    // a sequence clamped at the end of its window holds fewer bases than `length`
    let longest = length.min(indel.sequence.len());
    for period in (1..=longest).filter(|p| length % p == 0) {
        while indel.position >= period
            && indel.read_position >= period
            && window(reference, indel.position - period, length) == &indel.sequence[..]
            && window(read, indel.read_position - period, length) == &indel.sequence[..]
            && previous.map_or(true, |p| p.admits(indel.position - period))
        {
            debug!(
                "{} {} shifting {}bp left",
                if indel.insertion { "insertion" } else { "deletion" },
                indel,
                period
            );
            indel.position -= period;
            indel.read_position -= period;
        }
    }
}

/// Move `indel` left one base at a time while the crossed base equals its
/// last base in both sequences.
pub fn flank_exchange(
    indel: &mut IndelAllele,
    previous: Option<&IndelAllele>,
    read: &[u8],
    reference: &[u8],
) {
    while indel.position >= 1 && indel.read_position >= 1 {
        let step = indel.position - 1;
        let read_step = indel.read_position - 1;
        let (Some(&read_base), Some(&ref_base), Some(&last)) =
            (read.get(read_step), reference.get(step), indel.sequence.last())
        else {
            break;
        };
        if read_base != ref_base || read_base != last {
            break;
        }
        if !previous.map_or(true, |p| p.admits(step)) {
            break;
        }
        debug!(
            "{} {} exchanging bases 1bp left",
            if indel.insertion { "insertion" } else { "deletion" },
            indel
        );
        indel.rotate_right();
        indel.position = step;
        indel.read_position = read_step;
    }
}
