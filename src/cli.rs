use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use crate::batch::{
    configure_thread_pool, normalize_all, AlignmentRecord, BatchSummary, NormalizedRecord, Status,
};
use crate::config::{LeftAlignConfig, DEFAULT_MAX_ITERATIONS};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "leftalign",
    version,
    about = "Left-align and merge indels in CIGAR alignments"
)]
pub struct Args {
    /// Input TSV: name, reference, read, cigar ("-" for stdin)
    pub input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of threads
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Realignment passes allowed before giving up on convergence
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Write JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> LeftAlignConfig {
        LeftAlignConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_threads(self.threads)
    }
}

/// Parse alignment records from tab-separated text.
///
/// Blank lines and lines starting with `#` are skipped. `source` only names
/// the input in error messages.
pub fn parse_records<R: BufRead>(reader: R, source: &str) -> Result<Vec<AlignmentRecord>> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", source))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 4 {
            bail!(
                "{}:{}: expected 4 tab-separated fields (name, reference, read, cigar), found {}",
                source,
                i + 1,
                fields.len()
            );
        }
        records.push(AlignmentRecord {
            name: fields[0].to_string(),
            reference: fields[1].to_string(),
            read: fields[2].to_string(),
            cigar: fields[3].to_string(),
        });
    }
    Ok(records)
}

pub fn load_records(path: &str) -> Result<Vec<AlignmentRecord>> {
    if path == "-" {
        let stdin = io::stdin();
        return parse_records(stdin.lock(), "<stdin>");
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    parse_records(BufReader::new(file), path)
}

pub fn write_tsv<W: Write>(mut out: W, results: &[NormalizedRecord]) -> io::Result<()> {
    writeln!(out, "#name\toriginal_cigar\tcigar\tstatus\treason")?;
    for result in results {
        let reason = match &result.status {
            Status::Failed { reason } => reason.replace(['\t', '\n'], " "),
            _ => ".".to_string(),
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            result.name,
            result.original_cigar,
            result.cigar,
            result.status.label(),
            reason
        )?;
    }
    out.flush()
}

pub fn write_json<W: Write>(mut out: W, results: &[NormalizedRecord]) -> Result<()> {
    for result in results {
        serde_json::to_writer(&mut out, result)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Load, normalize and write every record named by `args`.
pub fn run(args: &Args) -> Result<BatchSummary> {
    let config = args.config();
    configure_thread_pool(config.threads);

    let records = load_records(&args.input)?;
    info!("Loaded {} alignments from {}", records.len(), args.input);

    let results = normalize_all(&records, &config);

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if args.json {
        write_json(out, &results)?;
    } else {
        write_tsv(out, &results)?;
    }

    Ok(BatchSummary::from_results(&results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_skips_comments_and_blanks() {
        let text = "# header\nr1\tACGT\tACGT\t4M\n\nr2\tAAAATAAAA\tAAATAAAA\t3M1D5M\r\n";
        let records = parse_records(text.as_bytes(), "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "r2");
        assert_eq!(records[1].cigar, "3M1D5M");
    }

    #[test]
    fn test_parse_records_rejects_short_lines() {
        let err = parse_records("r1\tACGT\t4M\n".as_bytes(), "input.tsv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("input.tsv:1"));
        assert!(msg.contains("found 3"));
    }

    #[test]
    fn test_write_tsv() {
        let results = vec![
            NormalizedRecord {
                name: "r1".to_string(),
                original_cigar: "3M1D5M".to_string(),
                cigar: "1D8M".to_string(),
                status: Status::Stable,
            },
            NormalizedRecord {
                name: "r2".to_string(),
                original_cigar: "4Q".to_string(),
                cigar: "4Q".to_string(),
                status: Status::Failed {
                    reason: "bad\tinput".to_string(),
                },
            },
        ];
        let mut buf = Vec::new();
        write_tsv(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "#name\toriginal_cigar\tcigar\tstatus\treason");
        assert_eq!(lines[1], "r1\t3M1D5M\t1D8M\tstable\t.");
        assert_eq!(lines[2], "r2\t4Q\t4Q\tfailed\tbad input");
    }

    #[test]
    fn test_args_parse() {
        let args =
            Args::try_parse_from(["leftalign", "in.tsv", "-t", "4", "-m", "7", "--json"]).unwrap();
        assert_eq!(args.input, "in.tsv");
        assert_eq!(args.threads, 4);
        assert!(args.json);
        assert_eq!(
            args.config(),
            LeftAlignConfig::default().with_max_iterations(7).with_threads(4)
        );
        assert!(args.output.is_none());
    }
}
