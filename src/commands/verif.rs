//! `nph verif`: check declared dependencies against the registry

use super::{CommandContext, CommandStatus};
use crate::error::AppError;
use crate::manifest::{read_manifest, write_manifest};
use crate::registry::RegistryClient;
use crate::verify::{compute_fixes, FixOptions, VerificationEngine};
use std::io::Write;
use tracing::{info, warn};

pub async fn run(
    ctx: &CommandContext<'_>,
    registry: &dyn RegistryClient,
    options: FixOptions,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let manifest = read_manifest(&ctx.config.manifest_path)?;
    let dependencies = manifest.document.declared_dependencies();
    if dependencies.is_empty() {
        ctx.text.warning(out, "No dependencies found in package.json")?;
        return Ok(CommandStatus::Success);
    }

    ctx.text.banner(out, "Dependency Verifier")?;
    ctx.text
        .info(out, &format!("Checking {} dependencies...", dependencies.len()))?;
    writeln!(out)?;

    let mut progress = ctx.progress("Checking dependencies...");
    let results = VerificationEngine::new(registry)
        .verify_with_progress(&dependencies, &progress)
        .await;
    progress.finish_and_clear();

    ctx.text.format_verification(&results, out)?;

    let has_problems = results.iter().any(|r| !r.is_ok());
    if !has_problems {
        writeln!(out)?;
        ctx.text.done(out, "All dependencies are valid!")?;
        info!("all dependencies are valid");
        return Ok(CommandStatus::Success);
    }

    if !options.any() {
        ctx.text.format_fix_hints(out)?;
        return Ok(CommandStatus::Success);
    }

    let draft = compute_fixes(&manifest.document, &results, options);
    if !draft.has_fixes() {
        writeln!(out)?;
        ctx.text.warning(out, "No fixes available for the selected issue types")?;
        ctx.text.format_fix_hints(out)?;
        warn!("fix requested but nothing could be fixed");
        return Ok(CommandStatus::Success);
    }

    ctx.text.format_fixes(&draft.fixes, out)?;
    write_manifest(&manifest.path, &draft.draft)?;
    info!(fixes = draft.fixes.len(), "package.json updated with fixes");
    ctx.text.done(out, "package.json has been updated")?;
    Ok(CommandStatus::Success)
}
