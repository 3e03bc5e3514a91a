//! Report renderers. Both write to any [`std::io::Write`] and only read
//! the report.

pub mod json;
pub mod terminal;

use crate::OutputFormat;
use specwatch_validator::Report;
use std::io::{self, Write};

/// Writes `report` in `format`.
pub fn write_report<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Terminal => terminal::write_report(report, out),
        OutputFormat::Json => json::write_report(report, out),
    }
}
