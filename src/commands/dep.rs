//! `nph dep`: report deprecated packages and deprecated API uses

use super::{CommandContext, CommandStatus};
use crate::deprecation::{DeprecationScanner, PatternScanner};
use crate::error::AppError;
use crate::manifest::read_manifest;
use crate::output::create_formatter;
use crate::progress::Progress;
use crate::registry::RegistryClient;
use std::io::Write;
use tracing::{info, warn};

/// Flags of the `dep` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepArgs {
    /// Only explains that fixes are manual
    pub fix: bool,
    /// Print the report as JSON
    pub json: bool,
}

pub async fn run(
    ctx: &CommandContext<'_>,
    registry: &dyn RegistryClient,
    patterns: &dyn PatternScanner,
    args: DepArgs,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let manifest = read_manifest(&ctx.config.manifest_path)?;
    let dependencies = manifest.document.declared_dependencies();

    // JSON output stays machine readable: no banner, no spinner
    let mut progress = if args.json {
        Progress::disabled()
    } else {
        ctx.text.banner(out, "Deprecated Packages")?;
        ctx.text.info(out, "Scanning for deprecated patterns...")?;
        writeln!(out)?;
        ctx.progress("Checking packages...")
    };

    let report = DeprecationScanner::new(registry, patterns)
        .scan(&dependencies, &progress)
        .await;
    progress.finish_and_clear();

    create_formatter(args.json, ctx.color).format_deprecations(&report, out)?;
    if args.json {
        return Ok(CommandStatus::Success);
    }

    if report.is_empty() {
        info!("no deprecations found");
    } else {
        warn!(
            packages = report.deprecated_packages.len(),
            patterns = report.deprecated_code_patterns.len(),
            "deprecations found"
        );
        if args.fix {
            ctx.text.info(
                out,
                "Automatic fixes not available for deprecations. Manual review required.",
            )?;
        }
    }
    Ok(CommandStatus::Success)
}
