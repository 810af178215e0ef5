//! JSON output formatter for machine processing

use super::OutputFormatter;
use crate::domain::DeprecationReport;
use std::io::{self, Write};

/// JSON formatter for machine-readable output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_deprecations(
        &self,
        report: &DeprecationReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeprecatedPackage;

    #[test]
    fn test_json_report_shape() {
        let report = DeprecationReport {
            deprecated_packages: vec![DeprecatedPackage {
                package: "request".to_string(),
                reason: "deprecated".to_string(),
            }],
            ..Default::default()
        };

        let mut output = Vec::new();
        JsonFormatter::new()
            .format_deprecations(&report, &mut output)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(json["deprecatedPackages"][0]["package"], "request");
        assert_eq!(json["deprecatedNodeApis"], serde_json::json!([]));
        assert_eq!(json["deprecatedCodePatterns"], serde_json::json!([]));
    }

    #[test]
    fn test_json_empty_report_is_pretty() {
        let mut output = Vec::new();
        JsonFormatter::new()
            .format_deprecations(&DeprecationReport::default(), &mut output)
            .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("{\n  \"deprecatedPackages\": []"));
        assert!(text.ends_with("}\n"));
    }
}
