//! Output formatting for command reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::DeprecationReport;
use std::io::{self, Write};

/// Formats a deprecation report in one output style
pub trait OutputFormatter {
    fn format_deprecations(
        &self,
        report: &DeprecationReport,
        writer: &mut dyn Write,
    ) -> io::Result<()>;
}

/// Create a formatter for the requested style
pub fn create_formatter(json: bool, color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter::new())
    } else {
        Box::new(TextFormatter::new(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_formatter_json() {
        let formatter = create_formatter(true, true);
        let mut output = Vec::new();
        formatter
            .format_deprecations(&DeprecationReport::default(), &mut output)
            .unwrap();
        assert!(String::from_utf8(output).unwrap().starts_with('{'));
    }

    #[test]
    fn test_create_formatter_text() {
        let formatter = create_formatter(false, false);
        let mut output = Vec::new();
        formatter
            .format_deprecations(&DeprecationReport::default(), &mut output)
            .unwrap();
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("No deprecations found!"));
    }
}
