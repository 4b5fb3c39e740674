use std::io::{self, Write};

use crate::analyzer::Analysis;
use crate::models::{BlockDelta, Summary};

pub fn delta_line(delta: &BlockDelta) -> String {
    format!(
        "Time difference between block {} and block {}: {} seconds",
        delta.from_height, delta.to_height, delta.seconds
    )
}

pub fn summary_lines(summary: &Summary) -> Vec<String> {
    let average = match summary.average {
        Some(avg) => format!("Average duration between blocks: {avg:.2} seconds"),
        None => "Average duration between blocks: undefined (no intervals computed)".to_string(),
    };
    vec![
        average,
        format!(
            "Number of time intervals between blocks longer than {} seconds: {}",
            summary.threshold_secs, summary.count_above
        ),
        format!(
            "Number of time intervals between blocks shorter than {} seconds: {}",
            summary.threshold_secs, summary.count_below
        ),
    ]
}

pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    for delta in &analysis.deltas {
        writeln!(out, "{}", delta_line(delta))?;
    }
    writeln!(out)?;
    for line in summary_lines(&analysis.summary) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
