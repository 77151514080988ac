//! Batch summary report types.
//!
//! The summary maps each (input file, method) pair to a record of status
//! and statistics, plus per-method aggregates over the mask differences.
//! It is serialized once to `summary.json` at the end of a run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use subdiv_core::MaskDiff;

/// Outcome of one method invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Failed,
}

/// Mask difference against the expansion baseline, in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
    pub change: i64,
    pub count_changes: u64,
    pub percent_change: f64,
}

impl From<MaskDiff> for DiffRecord {
    fn from(diff: MaskDiff) -> Self {
        Self {
            additions: diff.additions,
            deletions: diff.deletions,
            total: diff.total,
            change: diff.change(),
            count_changes: diff.count_changes(),
            percent_change: diff.percent_change(),
        }
    }
}

/// Statistics for one (input file, method) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodRecord {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voxels: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffRecord>,
}

impl MethodRecord {
    pub fn ok(output: String, size_bytes: Option<u64>, elapsed_ms: u64) -> Self {
        Self {
            status: Status::Ok,
            error: None,
            output: Some(output),
            voxels: None,
            size_bytes,
            elapsed_ms,
            diff: None,
        }
    }

    pub fn failed(error: String, elapsed_ms: u64) -> Self {
        Self {
            status: Status::Failed,
            error: Some(error),
            output: None,
            voxels: None,
            size_bytes: None,
            elapsed_ms,
            diff: None,
        }
    }
}

/// Per-method sums over all inputs that produced a mask difference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodAggregate {
    pub additions: u64,
    pub deletions: u64,
    pub count_changes: u64,
    pub mean_percent_change: f64,
    /// Number of (file, method) pairs contributing to this aggregate.
    pub count: usize,
}

/// Aggregate report for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub count_inputs: usize,
    /// Input file name -> method name -> record.
    pub results: BTreeMap<String, BTreeMap<String, MethodRecord>>,
    /// Method name -> aggregate over the per-file mask differences.
    pub aggregates: BTreeMap<String, MethodAggregate>,
}

impl Summary {
    pub fn new(count_inputs: usize) -> Self {
        Self {
            count_inputs,
            results: BTreeMap::new(),
            aggregates: BTreeMap::new(),
        }
    }

    /// Store the record for one (file, method) pair.
    pub fn record(&mut self, file: &str, method: &str, record: MethodRecord) {
        self.results
            .entry(file.to_string())
            .or_default()
            .insert(method.to_string(), record);
    }

    /// Mutable access to a stored record.
    pub fn record_mut(&mut self, file: &str, method: &str) -> Option<&mut MethodRecord> {
        self.results.get_mut(file)?.get_mut(method)
    }

    /// Total number of (file, method) records.
    pub fn record_count(&self) -> usize {
        self.results.values().map(|methods| methods.len()).sum()
    }

    /// Recompute the per-method aggregates from the stored diffs.
    pub fn aggregate(&mut self) {
        let mut sums: BTreeMap<String, (MethodAggregate, f64)> = BTreeMap::new();
        for methods in self.results.values() {
            for (method, record) in methods {
                if let Some(diff) = &record.diff {
                    let (aggregate, percent_sum) = sums.entry(method.clone()).or_default();
                    aggregate.additions += diff.additions;
                    aggregate.deletions += diff.deletions;
                    aggregate.count_changes += diff.count_changes;
                    aggregate.count += 1;
                    *percent_sum += diff.percent_change;
                }
            }
        }

        self.aggregates = sums
            .into_iter()
            .map(|(method, (mut aggregate, percent_sum))| {
                aggregate.mean_percent_change = percent_sum / aggregate.count as f64;
                (method, aggregate)
            })
            .collect();
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(additions: u64, deletions: u64, total: u64) -> DiffRecord {
        DiffRecord::from(MaskDiff {
            additions,
            deletions,
            total,
        })
    }

    #[test]
    fn test_record_count() {
        let mut summary = Summary::new(2);
        summary.record("a.mnc", "trilinear", MethodRecord::ok("a.out".into(), None, 1));
        summary.record("a.mnc", "kron", MethodRecord::ok("a.np".into(), None, 1));
        summary.record("b.mnc", "trilinear", MethodRecord::failed("boom".into(), 1));
        assert_eq!(summary.record_count(), 3);
    }

    #[test]
    fn test_aggregate_sums_and_means() {
        let mut summary = Summary::new(2);

        let mut first = MethodRecord::ok("a".into(), None, 1);
        first.diff = Some(diff(2, 1, 10));
        summary.record("a.mnc", "trilinear", first);

        let mut second = MethodRecord::ok("b".into(), None, 1);
        second.diff = Some(diff(4, 0, 10));
        summary.record("b.mnc", "trilinear", second);

        summary.record("a.mnc", "kron", MethodRecord::ok("base".into(), None, 1));
        summary.aggregate();

        let aggregate = &summary.aggregates["trilinear"];
        assert_eq!(aggregate.additions, 6);
        assert_eq!(aggregate.deletions, 1);
        assert_eq!(aggregate.count_changes, 7);
        assert_eq!(aggregate.count, 2);
        assert!((aggregate.mean_percent_change - (0.1 + 0.4) / 2.0).abs() < 1e-12);
        assert!(!summary.aggregates.contains_key("kron"));
    }

    #[test]
    fn test_failed_records_serialize_with_error() {
        let record = MethodRecord::failed("mincresample: exit status: 1".into(), 12);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("mincresample"));
        assert!(!json.contains("voxels"));
    }
}
