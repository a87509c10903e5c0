use leftalign::{Cigar, CigarElement, CigarOp};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A read placed on its reference by a known CIGAR.
#[derive(Debug, Clone)]
pub struct SimulatedAlignment {
    pub reference: Vec<u8>,
    pub read: Vec<u8>,
    pub cigar: Cigar,
}

pub struct AlignmentSimulator {
    rng: StdRng,
    alphabet: &'static [u8],
    insertions: bool,
}

impl AlignmentSimulator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            alphabet: b"ACGT",
            insertions: true,
        }
    }

    /// Small alphabets make repeats, and so shiftable indels, common.
    pub fn with_alphabet(mut self, alphabet: &'static [u8]) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn deletions_only(mut self) -> Self {
        self.insertions = false;
        self
    }

    pub fn random_sequence(&mut self, length: usize) -> Vec<u8> {
        (0..length)
            .map(|_| self.alphabet[self.rng.gen_range(0..self.alphabet.len())])
            .collect()
    }

    /// Walk a random reference emitting matches, deletions and insertions.
    ///
    /// The walk always opens with a match so that a trailing soft clip is
    /// never mistaken for a leading one.
    pub fn simulate(&mut self, reference_length: usize) -> SimulatedAlignment {
        let reference = self.random_sequence(reference_length.max(2));
        let mut read = Vec::new();
        let mut ops: Vec<(usize, CigarOp)> = Vec::new();

        if self.rng.gen_bool(0.3) {
            let len = self.rng.gen_range(1..=3);
            read.extend(self.random_sequence(len));
            push(&mut ops, len, CigarOp::SoftClip);
        }

        let mut pos = 0;
        let first = self.rng.gen_range(1..=3).min(reference.len() - 1);
        read.extend_from_slice(&reference[..first]);
        push(&mut ops, first, CigarOp::Match);
        pos += first;

        while pos < reference.len() {
            let roll = self.rng.gen_range(0..10);
            if roll < 5 {
                let len = self.rng.gen_range(1..=4).min(reference.len() - pos);
                read.extend_from_slice(&reference[pos..pos + len]);
                push(&mut ops, len, CigarOp::Match);
                pos += len;
            } else if roll < 8 || !self.insertions {
                let len = self.rng.gen_range(1..=3).min(reference.len() - pos);
                push(&mut ops, len, CigarOp::Deletion);
                pos += len;
            } else {
                let len = self.rng.gen_range(1..=3);
                read.extend(self.random_sequence(len));
                push(&mut ops, len, CigarOp::Insertion);
            }
        }

        if self.rng.gen_bool(0.3) {
            let len = self.rng.gen_range(1..=3);
            read.extend(self.random_sequence(len));
            push(&mut ops, len, CigarOp::SoftClip);
        }

        let cigar = Cigar::from(
            ops.into_iter()
                .map(|(len, op)| CigarElement::new(len, op))
                .collect::<Vec<_>>(),
        );
        SimulatedAlignment {
            reference,
            read,
            cigar,
        }
    }
}

fn push(ops: &mut Vec<(usize, CigarOp)>, len: usize, op: CigarOp) {
    match ops.last_mut() {
        Some((last_len, last_op)) if *last_op == op => *last_len += len,
        _ => ops.push((len, op)),
    }
}

/// Count aligned columns where the read base differs from the reference
/// base. Columns that run off either sequence count as mismatches too.
pub fn count_mismatches(read: &[u8], reference: &[u8], cigar: &Cigar) -> usize {
    let mut mismatches = 0;
    let mut read_pos = 0;
    let mut ref_pos = 0;
    for element in cigar {
        match element.op {
            CigarOp::Match => {
                for i in 0..element.len {
                    match (read.get(read_pos + i), reference.get(ref_pos + i)) {
                        (Some(a), Some(b)) if a == b => {}
                        _ => mismatches += 1,
                    }
                }
                read_pos += element.len;
                ref_pos += element.len;
            }
            CigarOp::Insertion | CigarOp::SoftClip => read_pos += element.len,
            CigarOp::Deletion | CigarOp::Skip => ref_pos += element.len,
            CigarOp::HardClip => {}
        }
    }
    mismatches
}
