//! Console reports for the walker
//!
//! All output goes through a caller-supplied writer so the coordinator can be
//! pointed at stdout in the binary and at a buffer in tests.

use crate::walker::{RootReport, SizeTally};
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

/// Sizes of one regular file, as printed in listing mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub total_size: u64,
    pub actual_size: u64,
}

/// Print one file of a directory listing
pub fn write_file_report<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    writeln!(out, "File: {}", report.path.display())?;
    writeln!(out, "Total size: {}", report.total_size)?;
    writeln!(out, "Actual size: {}", report.actual_size)?;
    writeln!(out)
}

/// Print the totals of one root
pub fn write_root_report<W: Write>(out: &mut W, report: &RootReport) -> io::Result<()> {
    writeln!(out, "File/Dir: {}", report.path.display())?;
    writeln!(out, "Total Disk size: {}", report.tally.total_size)?;
    writeln!(out, "Actual Disk size: {}", report.tally.actual_size)?;
    writeln!(out)
}

/// Print the grand totals over all roots
pub fn write_grand_total<W: Write>(out: &mut W, total: &SizeTally) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("The stats for the given files:").bold())?;
    writeln!(out, "Total Disk Size: {}", total.total_size)?;
    writeln!(out, "Actual Disk Size: {}", total.actual_size)
}
