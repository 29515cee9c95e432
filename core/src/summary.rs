//! Reduction of a sample set into the statistics written to result CSVs.

use crate::record::BenchRecord;

/// Header of every per-run results file. Text columns are quoted.
pub const RESULTS_HEADER: &str = r#""key","sys","desc","runs","minimum","maximum","mean","median""#;

/// Summary statistics over a non-empty sample set, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub runs: usize,
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Summary {
    /// Computes the statistics of `samples`.
    ///
    /// The median is the element at `len / 2` of the sorted samples: the middle
    /// element for odd counts and the upper of the two middle elements for even
    /// counts (`[1, 2, 3, 4]` yields `3`). There is no interpolation.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty; the runner never completes a record without
    /// at least one sample.
    pub fn from_samples(samples: &[f64]) -> Self {
        assert!(!samples.is_empty(), "cannot summarise an empty sample set");
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let runs = sorted.len();
        let sum: f64 = sorted.iter().sum();
        Self {
            runs,
            minimum: sorted[0],
            maximum: sorted[runs - 1],
            mean: sum / runs as f64,
            median: sorted[runs / 2],
        }
    }
}

/// Summary of one completed record, tagged with the system that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: String,
    pub sys: String,
    pub desc: String,
    pub stats: Summary,
}

impl SummaryRow {
    pub fn from_record(record: &BenchRecord, sys: &str) -> Self {
        Self {
            key: record.key().to_string(),
            sys: sys.to_string(),
            desc: record.desc().to_string(),
            stats: Summary::from_samples(record.samples().as_slice()),
        }
    }

    /// Serialises the row in results-file layout, without a trailing newline.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            quote(&self.key),
            quote(&self.sys),
            quote(&self.desc),
            self.stats.runs,
            form(self.stats.minimum),
            form(self.stats.maximum),
            form(self.stats.mean),
            form(self.stats.median),
        )
    }
}

/// Two fraction digits, the precision of every numeric CSV field.
pub fn form(value: f64) -> String {
    format!("{value:.2}")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
