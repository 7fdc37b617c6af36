//! Rendering the summary table
//!
//! Purely a formatting concern: all statistics arrive precomputed in the
//! ordered `RunResult` sequence.

use crate::stats::{throughput, RunResult};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use copybench_types::format_throughput;
use std::io::Write;

/// Render the final comparison table, one row per strategy in execution
/// order.
pub fn render_summary<W: Write>(
    writer: &mut W,
    results: &[RunResult],
    total_bytes: u64,
) -> std::io::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Average").add_attribute(Attribute::Bold),
        Cell::new("Best").add_attribute(Attribute::Bold),
    ]);

    for result in results {
        table.add_row(vec![
            Cell::new(&result.name),
            Cell::new(format_timing(result.average, total_bytes)),
            Cell::new(format_timing(result.best, total_bytes)),
        ]);
    }

    writeln!(writer, "{table}")
}

/// Format a timing cell as `<seconds>s (<rate>/s)`, or `-` when no runs
/// were recorded.
pub fn format_timing(seconds: f64, total_bytes: u64) -> String {
    if !seconds.is_finite() {
        return "-".to_string();
    }
    format!(
        "{:.2}s ({})",
        seconds,
        format_throughput(throughput(total_bytes, seconds))
    )
}
