// src/report.rs
// =============================================================================
// Renders a ResultSet as a human-readable text report.
//
// Layout:
//   <title>
//   ========
//
//   Checked at / Total time
//   Which page and selector were checked
//   Either the page-level error, "no URLs found", or the summary counts
//   followed by one block per link
//
// We write to any io::Write instead of calling println! directly, so tests
// can render into a Vec<u8> and main can hand us a locked stdout.
// =============================================================================

use crate::checker::{LinkResult, ResultSet};
use std::io::{self, Write};
use std::time::Duration;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn write_report(out: &mut impl Write, set: &ResultSet) -> io::Result<()> {
    writeln!(out, "{}", set.title)?;
    writeln!(out, "========")?;
    writeln!(out)?;
    writeln!(out, "Checked at: {}", set.started_at.format(DATETIME_FORMAT))?;
    writeln!(out, "Total time: {}", seconds(set.elapsed()))?;
    writeln!(out)?;
    writeln!(out, "Checked the links matching selector `{}`", set.selector)?;
    writeln!(out, "on page `{}`.", set.url)?;
    writeln!(out)?;

    if let Some(error) = &set.error {
        writeln!(out, "Error while accessing `{}`", set.url)?;
        writeln!(out, "Error: {}", error)?;
        return Ok(());
    }

    if set.results.is_empty() {
        writeln!(out, "Error: no URLs found to check.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} link(s): {} OK, {} failed",
        set.results.len(),
        set.ok_count(),
        set.failed_count()
    )?;
    writeln!(out)?;

    for (i, result) in set.results.iter().enumerate() {
        write_result(out, i + 1, result)?;
    }

    Ok(())
}

fn write_result(out: &mut impl Write, number: usize, result: &LinkResult) -> io::Result<()> {
    writeln!(out, "{}. {}", number, result.caption)?;
    writeln!(out, "--------")?;
    writeln!(out, " * URL: {}", result.url)?;
    match (&result.error, result.status) {
        (Some(error), _) => writeln!(out, " * Error: {}", error)?,
        (None, Some(status)) => writeln!(out, " * Status: {}", status)?,
        // check_link always sets one of the two
        (None, None) => writeln!(out, " * Status: none")?,
    }
    writeln!(out, " * Time: {}", seconds(result.elapsed()))?;
    writeln!(out)
}

fn seconds(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}
