//! Report rendering

use crate::record::RootCauseAnalysis;
use crate::Result;

/// Banner printed above a successful report
pub const SUCCESS_BANNER: &str = "SUCCESS! Generated RCA Report:";

/// Width of the separator lines framing the report
pub const SEPARATOR_WIDTH: usize = 40;

/// Render the record as 2-space indented JSON in field declaration order
pub fn render_report(rca: &RootCauseAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(rca)?)
}

/// Full framed report block as printed to stdout
pub fn format_report(rca: &RootCauseAnalysis) -> Result<String> {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    Ok(format!(
        "\n {}\n{}\n{}\n{}",
        SUCCESS_BANNER,
        separator,
        render_report(rca)?,
        separator
    ))
}

/// Print the framed report to stdout
pub fn print_report(rca: &RootCauseAnalysis) -> Result<()> {
    println!("{}", format_report(rca)?);
    Ok(())
}
