//! JSON exporter

use crate::error::{CacheduError, Result};
use crate::export::{Exporter, Report};
use serde::Serialize;
use std::io::Write;

/// JSON output exporter
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonOutput {
    paths: Vec<JsonPath>,
    total: u64,
    errors: u64,
}

#[derive(Serialize)]
struct JsonPath {
    path: String,
    blocks: u64,
    recomputed_dirs: u64,
    plain_walks: u64,
}

impl Exporter for JsonExporter {
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()> {
        let paths = report
            .paths
            .iter()
            .map(|measured| JsonPath {
                path: measured.path.display().to_string(),
                blocks: measured.usage.blocks,
                recomputed_dirs: measured.usage.tally.recomputed_dirs,
                plain_walks: measured.usage.tally.plain_walks,
            })
            .collect();

        let output = JsonOutput {
            paths,
            total: report.total(),
            errors: report.tally().errors,
        };

        let json =
            serde_json::to_string_pretty(&output).map_err(|e| CacheduError::Other(e.to_string()))?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
