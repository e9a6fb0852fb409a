//! Flatten report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::SpecFlattenError;

/// Aggregate counters and diagnostics for one `flatten_copy` run.
#[derive(Debug, Default, Clone)]
pub struct ReportFlatten {
    /// Number of candidate files discovered.
    pub cnt_found: u64,
    /// Number of candidates copied successfully.
    pub cnt_converted: u64,
    /// Number of copied candidates that landed under a collision suffix.
    pub cnt_renamed: u64,
    /// Absolute output directory the run wrote into.
    pub path_dir_output: PathBuf,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
    /// Per-file failures.
    pub errors: Vec<SpecFlattenError>,
}

impl ReportFlatten {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_found".to_string(), self.cnt_found);
        dict_counts.insert("cnt_converted".to_string(), self.cnt_converted);
        dict_counts.insert("cnt_renamed".to_string(), self.cnt_renamed);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} found={} converted={} renamed={} errors={} warnings={}",
            dict_counts["cnt_found"],
            dict_counts["cnt_converted"],
            dict_counts["cnt_renamed"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportFlatten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[FLATTEN]"))
    }
}

/// Mutable accumulator for flatten statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportFlattenBuilder {
    /// See [`ReportFlatten::cnt_found`].
    pub cnt_found: u64,
    /// See [`ReportFlatten::cnt_converted`].
    pub cnt_converted: u64,
    /// See [`ReportFlatten::cnt_renamed`].
    pub cnt_renamed: u64,
    /// See [`ReportFlatten::path_dir_output`].
    pub path_dir_output: PathBuf,
    /// See [`ReportFlatten::errors`].
    pub errors: Vec<SpecFlattenError>,
    /// See [`ReportFlatten::warnings`].
    pub warnings: Vec<String>,
}

impl ReportFlattenBuilder {
    pub fn new(path_dir_output: PathBuf) -> Self {
        Self {
            path_dir_output,
            ..Self::default()
        }
    }

    pub fn add_found(&mut self) {
        self.cnt_found += 1;
    }

    pub fn add_converted(&mut self) {
        self.cnt_converted += 1;
    }

    pub fn add_renamed(&mut self) {
        self.cnt_renamed += 1;
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one per-file error.
    pub fn add_error(
        &mut self,
        path_source: PathBuf,
        path_destination: Option<PathBuf>,
        exception: String,
    ) {
        self.errors.push(SpecFlattenError {
            path_source,
            path_destination,
            exception,
        });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportFlatten {
        ReportFlatten {
            cnt_found: self.cnt_found,
            cnt_converted: self.cnt_converted,
            cnt_renamed: self.cnt_renamed,
            path_dir_output: self.path_dir_output,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}
