//! `nph script`: list, add, remove and edit package.json scripts

use super::{CommandContext, CommandStatus};
use crate::error::AppError;
use crate::manifest::{read_manifest, write_manifest};
use crate::prompt::{AskOptions, Prompt};
use std::io::Write;
use tracing::info;

const NO_SCRIPTS: &str = "No scripts found in package.json";
const CANCELLED: &str = "Operation cancelled";

/// Why a removal selection was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No part of the input was a number
    Empty,
    /// 1-based numbers outside the listed range
    OutOfRange(Vec<i64>),
}

/// Parse comma separated 1-based script numbers into 0-based indices
///
/// Parts that are not whole numbers (`x`, `3abc`, `1.5`) are ignored and duplicates
/// collapse to their first occurrence.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, SelectionError> {
    let mut numbers: Vec<i64> = Vec::new();
    for number in input.split(',').filter_map(|part| part.trim().parse::<i64>().ok()) {
        if !numbers.contains(&number) {
            numbers.push(number);
        }
    }

    if numbers.is_empty() {
        return Err(SelectionError::Empty);
    }

    let in_range = |n: &i64| *n >= 1 && (*n as u64) <= count as u64;
    let invalid: Vec<i64> = numbers.iter().copied().filter(|n| !in_range(n)).collect();
    if !invalid.is_empty() {
        return Err(SelectionError::OutOfRange(invalid));
    }

    Ok(numbers.into_iter().map(|n| (n - 1) as usize).collect())
}

/// Parse one 1-based script number
fn parse_single(input: &str, count: usize) -> Option<usize> {
    let number = input.trim().parse::<usize>().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}

/// Print every script, aligned on the longest name
pub fn list(ctx: &CommandContext<'_>, out: &mut dyn Write) -> Result<CommandStatus, AppError> {
    let manifest = read_manifest(&ctx.config.manifest_path)?;
    let scripts = manifest.document.scripts();
    if scripts.is_empty() {
        ctx.text.warning(out, NO_SCRIPTS)?;
        return Ok(CommandStatus::Success);
    }

    ctx.text.banner(out, "Print Script CLI")?;
    ctx.text.format_scripts(&scripts, false, out)?;
    writeln!(out)?;
    Ok(CommandStatus::Success)
}

/// Ask for a name and command, then insert or overwrite the script
pub fn add(
    ctx: &CommandContext<'_>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let mut manifest = read_manifest(&ctx.config.manifest_path)?;

    let name = prompt.ask("Type Command", AskOptions::hint("e.g npm run COMMAND"))?;
    if name.is_empty() {
        ctx.text.error(out, "Script command cannot be empty")?;
        return Ok(CommandStatus::Failure);
    }

    let command = prompt.ask("Script to execute", AskOptions::hint("e.g node ./index.js"))?;
    if command.is_empty() {
        ctx.text.error(out, "Command cannot be empty")?;
        return Ok(CommandStatus::Failure);
    }

    let question = format!(
        "Confirm adding {} ⟶ {} script to package.json ?",
        name, command
    );
    if !prompt.confirm(&question)? {
        ctx.text.warning(out, CANCELLED)?;
        return Ok(CommandStatus::Success);
    }

    manifest.document.set_script(&name, &command);
    write_manifest(&manifest.path, &manifest.document)?;
    info!(script = %name, command = %command, "added script");
    ctx.text.done(out, "Script added successfully")?;
    Ok(CommandStatus::Success)
}

/// Remove one or more scripts chosen by number
pub fn remove(
    ctx: &CommandContext<'_>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let mut manifest = read_manifest(&ctx.config.manifest_path)?;
    let scripts = manifest.document.scripts();
    if scripts.is_empty() {
        ctx.text.warning(out, NO_SCRIPTS)?;
        return Ok(CommandStatus::Success);
    }

    writeln!(out)?;
    ctx.text.format_scripts(&scripts, true, out)?;
    writeln!(out)?;

    let input = prompt.ask(
        "Please type which script to remove",
        AskOptions::hint("e.g 3 (or 3,4,7 for multiple)"),
    )?;
    let indices = match parse_selection(&input, scripts.len()) {
        Ok(indices) => indices,
        Err(SelectionError::Empty) => {
            ctx.text.error(out, "No valid script numbers provided")?;
            return Ok(CommandStatus::Failure);
        }
        Err(SelectionError::OutOfRange(numbers)) => {
            let listed: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
            ctx.text
                .error(out, &format!("Invalid script numbers: {}", listed.join(", ")))?;
            return Ok(CommandStatus::Failure);
        }
    };

    let selected: Vec<(String, String)> = indices.iter().map(|&i| scripts[i].clone()).collect();
    writeln!(out)?;
    ctx.text.format_scripts(&selected, false, out)?;

    if !prompt.confirm(&format!("Confirm removing {} script(s)", selected.len()))? {
        ctx.text.warning(out, CANCELLED)?;
        return Ok(CommandStatus::Success);
    }

    for (name, _) in &selected {
        manifest.document.remove_script(name);
    }
    write_manifest(&manifest.path, &manifest.document)?;

    let names: Vec<&str> = selected.iter().map(|(name, _)| name.as_str()).collect();
    info!(scripts = %names.join(", "), "removed scripts");
    ctx.text.success(out, "Script(s) removed successfully")?;
    Ok(CommandStatus::Success)
}

/// Rename a script and/or replace its command
pub fn edit(
    ctx: &CommandContext<'_>,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<CommandStatus, AppError> {
    let mut manifest = read_manifest(&ctx.config.manifest_path)?;
    let scripts = manifest.document.scripts();
    if scripts.is_empty() {
        ctx.text.warning(out, NO_SCRIPTS)?;
        return Ok(CommandStatus::Success);
    }

    writeln!(out)?;
    ctx.text.format_scripts(&scripts, true, out)?;
    writeln!(out)?;

    let input = prompt.ask(
        "Please type which script to update",
        AskOptions::hint("comma separated not accepted for edit"),
    )?;
    let Some(index) = parse_single(&input, scripts.len()) else {
        ctx.text.error(out, "Invalid script number")?;
        return Ok(CommandStatus::Failure);
    };

    let (old_name, old_command) = scripts[index].clone();
    writeln!(out)?;
    ctx.text.info(out, &format!("Current: {} → {}", old_name, old_command))?;
    writeln!(out)?;

    let new_name = prompt.ask("New script name", AskOptions::default_value(&old_name))?;
    let new_command = prompt.ask(
        "New command to execute",
        AskOptions::default_value(&old_command),
    )?;

    if !prompt.confirm(&format!("Confirm updating to {}: {}", new_name, new_command))? {
        ctx.text.warning(out, CANCELLED)?;
        return Ok(CommandStatus::Success);
    }

    if new_name != old_name {
        manifest.document.rename_script(&old_name, &new_name);
    }
    manifest.document.set_script(&new_name, &new_command);
    write_manifest(&manifest.path, &manifest.document)?;

    info!(from = %old_name, to = %new_name, command = %new_command, "updated script");
    ctx.text.success(out, "Script updated successfully")?;
    Ok(CommandStatus::Success)
}
