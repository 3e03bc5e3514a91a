//! Colored, human-readable output.

use colored::Colorize;
use specwatch_spec::Spec;
use specwatch_validator::{BeaconResult, DimensionResult, Report, Status};
use std::io::{self, Write};

const RULE_WIDTH: usize = 55;
const MAX_URL_LEN: usize = 80;

fn rule() -> String {
    "═".repeat(RULE_WIDTH)
}

/// Shortens `url` to at most [`MAX_URL_LEN`] characters.
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() <= MAX_URL_LEN {
        return url.to_string();
    }
    let head: String = url.chars().take(MAX_URL_LEN - 3).collect();
    format!("{head}...")
}

fn marker(status: Status) -> colored::ColoredString {
    match status {
        Status::Pass => "✓".green(),
        Status::Fail => "✗".red(),
        Status::Warning => "⚠".yellow(),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Writes the full report: one block per beacon, then the summary.
pub fn write_report<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let target = if report.mapping_name.is_empty() {
        "no mapping".to_string()
    } else {
        format!("{} mapping", report.mapping_name)
    };
    writeln!(
        out,
        "{} — Validating against: {target}",
        format!("SpecWatch v{}", env!("CARGO_PKG_VERSION")).bold()
    )?;
    writeln!(
        out,
        "Total analytics calls detected: {} (of {} requests)\n",
        report.total_calls, report.total_entries
    )?;

    for beacon in &report.beacons {
        write_beacon(beacon, out)?;
    }
    write_summary(report, out)
}

fn write_beacon<W: Write>(br: &BeaconResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", rule())?;

    let Some(event) = br.event_name.as_deref().filter(|_| br.matched) else {
        writeln!(out, " {} — {}", "⚠ UNMATCHED".yellow(), truncate_url(&br.url))?;
        let mut detail = format!("   vendor={}  platform={}", br.vendor, br.platform);
        if !br.rsid.is_empty() {
            detail.push_str(&format!("  rsid={}", br.rsid));
        }
        if !br.events_fired.is_empty() {
            detail.push_str(&format!("  events=[{}]", br.events_fired.join(",")));
        }
        writeln!(out, " {}", detail.dimmed())?;
        writeln!(out, "{}\n", rule())?;
        return Ok(());
    };

    writeln!(out, " {} — {}", event.to_uppercase().bold(), truncate_url(&br.url))?;
    writeln!(out, "{}", rule())?;
    for dim in &br.dimensions {
        write_dimension(dim, out)?;
    }

    let verdict = if br.errors > 0 {
        "FAIL".red()
    } else {
        "PASS".green()
    };
    writeln!(
        out,
        "\n Result: {verdict} ({} error(s), {} warning(s))\n",
        br.errors, br.warnings
    )
}

fn write_dimension<W: Write>(dim: &DimensionResult, out: &mut W) -> io::Result<()> {
    let field = if dim.field.is_empty() {
        &dim.dimension
    } else {
        &dim.field
    };
    writeln!(out, " {} {field:<14} {}", marker(dim.status), dim.message)
}

fn write_summary<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, " {}", "SUMMARY".bold())?;
    writeln!(out, "{}", rule())?;
    writeln!(out, " Total calls:    {}", report.total_calls)?;

    if report.total_calls > 0 {
        writeln!(
            out,
            " Matched specs:  {} ({:.1}%)",
            report.matched,
            percent(report.matched, report.total_calls)
        )?;
        writeln!(
            out,
            " Unmatched:      {} ({:.1}%) — no matching event spec\n",
            report.unmatched,
            percent(report.unmatched, report.total_calls)
        )?;
        if report.matched > 0 {
            writeln!(
                out,
                " {}         {} ({:.1}%)",
                "Passed:".green(),
                report.passed,
                percent(report.passed, report.matched)
            )?;
            writeln!(
                out,
                " {}         {} ({:.1}%)",
                "Failed:".red(),
                report.failed,
                percent(report.failed, report.matched)
            )?;
        }
    }

    if !report.top_issues.is_empty() {
        writeln!(out, "\n {}", "Top issues:".bold())?;
        for (i, issue) in report.top_issues.iter().enumerate() {
            writeln!(
                out,
                "  {}. {:<40} — {} occurrence(s)",
                i + 1,
                issue.message,
                issue.count
            )?;
        }
    }
    writeln!(out)
}

/// Writes catalog counts plus one line per event, mapping and package.
pub fn write_spec_summary<W: Write>(spec: &Spec, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} {}", "Spec:".bold(), spec.summary())?;

    if !spec.enums.is_empty() {
        writeln!(out, "\n {}", "Enum sets".bold())?;
        for set in spec.enums.values() {
            writeln!(out, "  {:<24} {} values", set.name, set.len())?;
        }
    }

    if !spec.events.is_empty() {
        writeln!(out, "\n {}", "Events".bold())?;
        for event in spec.events.values() {
            let mut line = format!(
                "  {:<24} {} required, {} optional",
                event.name,
                event.required.len(),
                event.optional.len()
            );
            if !event.overrides.is_empty() {
                let vendors: Vec<&str> = event.overrides.keys().map(String::as_str).collect();
                line.push_str(&format!("  overrides: {}", vendors.join(", ")));
            }
            writeln!(out, "{line}")?;
        }
    }

    if !spec.mappings.is_empty() {
        writeln!(out, "\n {}", "Mappings".bold())?;
        for m in spec.mappings.values() {
            writeln!(
                out,
                "  {:<24} prod={} dev={}  {} dimensions, {} events",
                m.name,
                or_dash(&m.prod_rsid),
                or_dash(&m.dev_rsid),
                m.dim_map.len(),
                m.event_map.len()
            )?;
        }
    }

    if !spec.packages.is_empty() {
        writeln!(out, "\n {}", "Packages".bold())?;
        for p in spec.packages.values() {
            writeln!(
                out,
                "  {:<24} {} {}",
                p.name,
                or_dash(&p.endpoint_pattern),
                or_dash(&p.method)
            )?;
        }
    }
    Ok(())
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
