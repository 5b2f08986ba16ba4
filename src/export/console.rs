//! Console (du style) exporter

use crate::error::Result;
use crate::export::{Exporter, Report};
use std::io::Write;

/// `<blocks>\t<path>` per measured path, plus a total line when more than
/// one path was measured
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()> {
        for measured in &report.paths {
            writeln!(
                writer,
                "{}\t{}",
                measured.usage.blocks,
                measured.path.display()
            )?;
        }

        if report.paths.len() > 1 {
            writeln!(writer, "{}\ttotal", report.total())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Usage;
    use crate::export::sample_report;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_console_export_with_total() {
        let mut output = Vec::new();
        ConsoleExporter
            .export(&sample_report(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "10\talpha\n32\tbeta\n42\ttotal\n"
        );
    }

    #[test]
    fn test_console_export_single_path_has_no_total() {
        let mut report = Report::default();
        report.push(
            PathBuf::from("."),
            Usage {
                blocks: 6,
                tally: Default::default(),
            },
        );

        let mut output = Vec::new();
        ConsoleExporter.export(&report, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "6\t.\n");
    }
}
