use specwatch_validator::Report;
use std::io::{self, Write};

/// Writes `report` as pretty-printed JSON followed by a newline.
pub fn write_report<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
