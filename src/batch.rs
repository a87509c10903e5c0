//! Normalization of many independent alignments in parallel.
//!
//! Each record is realigned on its own copy of the data, so the work splits
//! cleanly across a rayon pool. A record that fails or does not converge is
//! reported in its result and never stops the rest of the batch.

use std::fmt;

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cigar::Cigar;
use crate::config::LeftAlignConfig;
use crate::left_align::stably_left_align;

/// One read aligned against its reference window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub name: String,
    pub reference: String,
    pub read: String,
    pub cigar: String,
}

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// Already in left-aligned form
    Unchanged,
    /// Rewritten and converged
    Stable,
    /// Iteration budget exhausted; the last rewrite is kept
    Unstable,
    /// Not normalized; the input CIGAR is kept
    Failed { reason: String },
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Unchanged => "unchanged",
            Status::Stable => "stable",
            Status::Unstable => "unstable",
            Status::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub name: String,
    pub original_cigar: String,
    pub cigar: String,
    #[serde(flatten)]
    pub status: Status,
}

/// Left-align a single record.
pub fn normalize_record(record: &AlignmentRecord, config: &LeftAlignConfig) -> NormalizedRecord {
    let failed = |reason: String| {
        warn!("{}: {}", record.name, reason);
        NormalizedRecord {
            name: record.name.clone(),
            original_cigar: record.cigar.clone(),
            cigar: record.cigar.clone(),
            status: Status::Failed { reason },
        }
    };

    let original: Cigar = match record.cigar.parse() {
        Ok(cigar) => cigar,
        Err(e) => return failed(format!("invalid CIGAR '{}': {}", record.cigar, e)),
    };

    let mut cigar = original.clone();
    let status = match stably_left_align(
        record.read.as_bytes(),
        record.reference.as_bytes(),
        &mut cigar,
        config.max_iterations,
    ) {
        Ok(true) if cigar == original => Status::Unchanged,
        Ok(true) => Status::Stable,
        Ok(false) => {
            warn!(
                "{}: did not stabilize within {} iterations, keeping {}",
                record.name, config.max_iterations, cigar
            );
            Status::Unstable
        }
        Err(e) => return failed(e.to_string()),
    };

    NormalizedRecord {
        name: record.name.clone(),
        original_cigar: record.cigar.clone(),
        cigar: cigar.to_string(),
        status,
    }
}

/// Left-align every record in parallel. Results come back in input order.
pub fn normalize_all(records: &[AlignmentRecord], config: &LeftAlignConfig) -> Vec<NormalizedRecord> {
    records
        .par_iter()
        .map(|record| normalize_record(record, config))
        .collect()
}

/// Size the global rayon pool. A pool that already exists is left alone.
pub fn configure_thread_pool(threads: usize) {
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global();
}

/// Per-status counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub unchanged: usize,
    pub stable: usize,
    pub unstable: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[NormalizedRecord]) -> Self {
        let mut summary = BatchSummary::default();
        for result in results {
            summary.total += 1;
            match result.status {
                Status::Unchanged => summary.unchanged += 1,
                Status::Stable => summary.stable += 1,
                Status::Unstable => summary.unstable += 1,
                Status::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} alignments: {} unchanged, {} realigned, {} unstable, {} failed",
            self.total, self.unchanged, self.stable, self.unstable, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, reference: &str, read: &str, cigar: &str) -> AlignmentRecord {
        AlignmentRecord {
            name: name.to_string(),
            reference: reference.to_string(),
            read: read.to_string(),
            cigar: cigar.to_string(),
        }
    }

    #[test]
    fn test_statuses() {
        let config = LeftAlignConfig::default();

        let unchanged = normalize_record(&record("a", "ACGT", "ACGT", "4M"), &config);
        assert_eq!(unchanged.status, Status::Unchanged);
        assert_eq!(unchanged.cigar, "4M");

        let stable = normalize_record(&record("b", "AAAATAAAA", "AAATAAAA", "3M1D5M"), &config);
        assert_eq!(stable.status, Status::Stable);
        assert_eq!(stable.original_cigar, "3M1D5M");
        assert_eq!(stable.cigar, "1D8M");

        let failed = normalize_record(&record("c", "ACGT", "ACGT", "4Q"), &config);
        assert!(matches!(failed.status, Status::Failed { ref reason } if reason.contains("4Q")));
        assert_eq!(failed.cigar, "4Q");
    }

    #[test]
    fn test_unstable_keeps_last_rewrite() {
        let config = LeftAlignConfig::default().with_max_iterations(1);
        let result = normalize_record(
            &record("x", "CAAAGGGTC", "CAAGGC", "1M1D2M1D2M1D1M"),
            &config,
        );
        assert_eq!(result.status, Status::Unstable);
        assert_eq!(result.cigar, "1M1D4M2D1M");
    }

    #[test]
    fn test_oversized_lengths_fail_only_their_record() {
        let config = LeftAlignConfig::default();
        let records = vec![
            record("overflow", "ACGTAC", "ACGT", "2M18446744073709551615D2M"),
            record("huge", "ACGT", "AC", "2M1000000000000D"),
            record("fine", "AAAATAAAA", "AAATAAAA", "3M1D5M"),
        ];
        let results = normalize_all(&records, &config);

        assert!(matches!(
            results[0].status,
            Status::Failed { ref reason } if reason.contains("spans more bases")
        ));
        assert_eq!(results[0].cigar, "2M18446744073709551615D2M");
        assert_eq!(results[1].status, Status::Unchanged);
        assert_eq!(results[1].cigar, "2M1000000000000D");
        assert_eq!(results[2].status, Status::Stable);
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let records: Vec<_> = (0..64)
            .map(|i| {
                if i % 2 == 0 {
                    record(&format!("r{i}"), "AAAATAAAA", "AAATAAAA", "2M1D6M")
                } else {
                    record(&format!("r{i}"), "ACGT", "ACGT", "4M")
                }
            })
            .collect();
        let results = normalize_all(&records, &LeftAlignConfig::default());
        assert_eq!(results.len(), 64);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.name, format!("r{i}"));
        }

        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 64);
        assert_eq!(summary.stable, 32);
        assert_eq!(summary.unchanged, 32);
        assert_eq!(
            summary.to_string(),
            "64 alignments: 32 unchanged, 32 realigned, 0 unstable, 0 failed"
        );
    }

    #[test]
    fn test_status_json() {
        let result = NormalizedRecord {
            name: "r1".to_string(),
            original_cigar: "4Q".to_string(),
            cigar: "4Q".to_string(),
            status: Status::Failed {
                reason: "bad".to_string(),
            },
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"name":"r1","original_cigar":"4Q","cigar":"4Q","status":"failed","reason":"bad"}"#
        );
        let back: NormalizedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
