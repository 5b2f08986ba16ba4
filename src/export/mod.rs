//! Export system for usage reports

mod console;
mod json;

use crate::config::OutputFormat;
use crate::core::{Tally, Usage};
use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

/// Usage of one requested path
#[derive(Debug, Clone)]
pub struct MeasuredPath {
    /// Path as given on the command line
    pub path: PathBuf,
    /// Blocks and traversal counters for that path
    pub usage: Usage,
}

/// Everything measured in one run
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub paths: Vec<MeasuredPath>,
}

impl Report {
    pub fn push(&mut self, path: PathBuf, usage: Usage) {
        self.paths.push(MeasuredPath { path, usage });
    }

    /// Sum of all measured paths
    pub fn total(&self) -> u64 {
        self.paths.iter().map(|p| p.usage.blocks).sum()
    }

    /// Counters of all traversals combined
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for p in &self.paths {
            tally.merge(&p.usage.tally);
        }
        tally
    }

    /// Whether any traversal raised the error indicator
    pub fn had_errors(&self) -> bool {
        self.paths.iter().any(|p| p.usage.tally.had_errors())
    }
}

/// Trait for output formatting
pub trait Exporter {
    /// Write the complete output for the given report
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter),
    }
}

#[cfg(test)]
pub(crate) fn sample_report() -> Report {
    let mut report = Report::default();
    report.push(
        PathBuf::from("alpha"),
        Usage {
            blocks: 10,
            tally: Tally {
                recomputed_dirs: 1,
                plain_walks: 2,
                ..Default::default()
            },
        },
    );
    report.push(
        PathBuf::from("beta"),
        Usage {
            blocks: 32,
            tally: Tally {
                errors: 1,
                ..Default::default()
            },
        },
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals() {
        let report = sample_report();
        assert_eq!(report.total(), 42);
        assert!(report.had_errors());
        assert_eq!(report.tally().plain_walks, 2);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert_eq!(report.total(), 0);
        assert!(!report.had_errors());
    }
}
