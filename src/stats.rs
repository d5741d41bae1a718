//! Per-run transformation statistics.
//!
//! [`Stats`] is an append-only ledger of [`FileRecord`] entries, one per
//! successfully written file. Aggregates are recomputed on every read; run
//! sizes are bounded by the file count of a single invocation, so there is
//! no caching.

/// Size accounting for one transformed file.
///
/// Sizes are character counts. `ratio` is output over input as a percentage,
/// rounded to two decimals; for decompression callers display its reciprocal.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Source path as given on the command line.
    pub path: String,
    /// Characters read from the input file.
    pub input_size: usize,
    /// Characters written to the output file.
    pub output_size: usize,
    /// output / input × 100, rounded to two decimals.
    pub ratio: f64,
}

/// Append-only ledger of file records with derived aggregates.
#[derive(Debug, Default)]
pub struct Stats {
    records: Vec<FileRecord>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Existing entries are never mutated or removed.
    pub fn add(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Number of files recorded.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Sum of input sizes across all records.
    pub fn total_input(&self) -> usize {
        self.records.iter().map(|r| r.input_size).sum()
    }

    /// Sum of output sizes across all records.
    pub fn total_output(&self) -> usize {
        self.records.iter().map(|r| r.output_size).sum()
    }

    /// Mean of per-file ratios. Returns 0.0 for an empty ledger.
    pub fn average_ratio(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.ratio).sum::<f64>() / self.records.len() as f64
    }

    /// Estimated tokens saved across the run, at roughly 4 characters per
    /// token. Floored, so a negative delta rounds toward minus infinity.
    pub fn estimated_tokens_saved(&self) -> i64 {
        (self.total_input() as i64 - self.total_output() as i64)
            .div_euclid(crate::constants::CHARS_PER_TOKEN)
    }
}

/// Round to two decimal places, matching the ratio precision recorded per file.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: usize, output: usize, ratio: f64) -> FileRecord {
        FileRecord {
            path: "spec.yaml".to_string(),
            input_size: input,
            output_size: output,
            ratio,
        }
    }

    #[test]
    fn test_average_ratio_empty_is_zero() {
        let stats = Stats::new();
        assert_eq!(stats.average_ratio(), 0.0);
    }

    #[test]
    fn test_totals_and_count() {
        let mut stats = Stats::new();
        stats.add(record(1000, 250, 25.0));
        stats.add(record(3000, 750, 25.0));
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.total_input(), 4000);
        assert_eq!(stats.total_output(), 1000);
        assert_eq!(stats.average_ratio(), 25.0);
    }

    #[test]
    fn test_estimated_tokens_saved() {
        let mut stats = Stats::new();
        stats.add(record(4000, 1000, 25.0));
        assert_eq!(stats.estimated_tokens_saved(), 750);
    }

    #[test]
    fn test_estimated_tokens_saved_negative_floors() {
        let mut stats = Stats::new();
        // Output grew by 3 characters; floor(-3/4) is -1, not 0.
        stats.add(record(10, 13, 130.0));
        assert_eq!(stats.estimated_tokens_saved(), -1);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(250.0 / 1000.0 * 100.0), 25.0);
        assert_eq!(round2(1000.0 / 250.0 * 100.0), 400.0);
        assert_eq!(round2(33.33333), 33.33);
    }
}
