//! `nph upgrade`: raise declared ranges to the latest compatible versions

use super::{CommandContext, CommandStatus};
use crate::error::AppError;
use crate::manifest::{read_manifest, write_manifest};
use crate::prompt::Prompt;
use crate::registry::RegistryClient;
use crate::tree::TreeResolver;
use crate::upgrade::{apply_upgrades, UpgradeEngine, UpgradeOptions};
use std::io::Write;
use tracing::info;

/// Flags of the `upgrade` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeArgs {
    /// Report the plan without prompting or writing
    pub dry_run: bool,
    pub options: UpgradeOptions,
}

pub async fn run(
    ctx: &CommandContext<'_>,
    registry: &dyn RegistryClient,
    resolver: &dyn TreeResolver,
    prompt: &mut dyn Prompt,
    args: UpgradeArgs,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let mut manifest = read_manifest(&ctx.config.manifest_path)?;
    let dependencies = manifest.document.declared_dependencies();
    if dependencies.is_empty() {
        ctx.text.warning(out, "No dependencies found in package.json")?;
        return Ok(CommandStatus::Success);
    }

    ctx.text.banner(out, "Dependency Upgrade Analyzer")?;
    ctx.text.info(
        out,
        &format!(
            "Analyzing {} dependencies for safe upgrades...",
            dependencies.len()
        ),
    )?;
    writeln!(out)?;

    let mut progress = ctx.progress("Resolving dependency tree...");
    let tree = resolver.dependency_tree().await;
    let plan = UpgradeEngine::new(registry, args.options)
        .plan_with_progress(&dependencies, tree.as_ref(), &progress)
        .await;
    progress.finish_and_clear();

    ctx.text.format_upgrade_plan(&plan, out)?;
    if plan.is_empty() {
        info!("all packages up to date");
        return Ok(CommandStatus::Success);
    }

    if args.dry_run {
        ctx.text.info(out, "Dry run complete. No changes made.")?;
        info!(upgrades = plan.upgrades.len(), "upgrade dry run completed");
        return Ok(CommandStatus::Success);
    }

    if !prompt.confirm(&format!("Apply {} upgrade(s)", plan.upgrades.len()))? {
        ctx.text.warning(out, "Operation cancelled")?;
        return Ok(CommandStatus::Success);
    }

    apply_upgrades(&mut manifest.document, &plan);
    write_manifest(&manifest.path, &manifest.document)?;
    info!(upgrades = plan.upgrades.len(), "applied upgrades");

    ctx.text.success(out, "package.json updated successfully")?;
    ctx.text.info(out, "Run npm install to install updates")?;
    Ok(CommandStatus::Success)
}
