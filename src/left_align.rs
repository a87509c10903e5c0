//! Single-pass left alignment and the driver that repeats it to a fixed
//! point.
//!
//! One pass shifts every indel as far left as it can go without mismatch,
//! moves same-kind neighbours together and rebuilds the CIGAR. A merge can
//! expose a new left shift, so callers normally use [`stably_left_align`].

use log::trace;

use crate::cigar::Cigar;
use crate::error::Result;
use crate::extract::extract_indels;
use crate::merge::{reconstruct, shift_right_for_merge};
use crate::shift::shift_indels_left;

/// Left-align and merge the indels of `cigar` once.
///
/// `cigar` is replaced with the realigned operation sequence. Returns whether
/// its printed form changed. A CIGAR without insertions or deletions is
/// returned untouched. On error `cigar` is left untouched too.
pub fn left_align(read: &[u8], cigar: &mut Cigar, reference: &[u8]) -> Result<bool> {
    if !cigar.has_indels() {
        return Ok(false);
    }
    let mut extraction = extract_indels(read, reference, cigar)?;
    if extraction.indels.is_empty() {
        return Ok(false);
    }

    let before = cigar.to_string();
    if log::log_enabled!(log::Level::Trace) {
        let (aligned_reference, aligned_read) = extraction.render_aligned(read, reference);
        trace!("| {}\n| {}\n| {}", before, aligned_reference, aligned_read);
    }

    shift_indels_left(&mut extraction.indels, read, reference);
    shift_right_for_merge(&mut extraction.indels, read, reference);
    let realigned = reconstruct(&extraction, read, reference)?;

    let after = realigned.to_string();
    trace!("{} -> {}", before, after);
    *cigar = realigned;
    Ok(after != before)
}

/// Repeat [`left_align`] until the CIGAR stops changing.
///
/// Returns `Ok(true)` once a pass leaves the CIGAR unchanged and `Ok(false)`
/// if `max_iterations` further passes all changed it. In the latter case
/// `cigar` holds the output of the last pass, which may not be fully
/// normalized.
pub fn stably_left_align(
    read: &[u8],
    reference: &[u8],
    cigar: &mut Cigar,
    max_iterations: usize,
) -> Result<bool> {
    stabilize(max_iterations, || left_align(read, cigar, reference))
}

/// Run `pass` until it reports no change or the iteration budget runs out.
///
/// The first pass is free: if it changes nothing the result is stable
/// straight away. Otherwise up to `max_iterations` more passes are run and
/// the budget counts down on every pass that still reports a change. A budget
/// of zero behaves like one.
pub fn stabilize<F, E>(max_iterations: usize, mut pass: F) -> std::result::Result<bool, E>
where
    F: FnMut() -> std::result::Result<bool, E>,
{
    if !pass()? {
        return Ok(true);
    }

    let mut remaining = max_iterations.max(1);
    while pass()? {
        remaining -= 1;
        if remaining == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}
