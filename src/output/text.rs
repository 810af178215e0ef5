//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Banners and status markers shared by every command
//! - Verification, upgrade and deprecation reports
//! - Semantic version change type indication (major/minor/patch)
//! - Aligned script listings

use super::OutputFormatter;
use crate::domain::{
    DeprecationReport, ManifestFix, PeerConflict, SkippedUpgrade, UpgradeCandidate, UpgradePlan,
    VerificationResult,
};
use crate::version;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

const POINTER: &str = "▍";
const SUCCESS: &str = "✔";
const ERROR: &str = "✘";
const WARNING: &str = "⚠";
const RULE: &str = "=====";

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two declared ranges
    ///
    /// Range operators are stripped before comparing, so `^1.2.0 → ^2.0.0` is major.
    pub fn from_ranges(old: &str, new: &str) -> Self {
        let old = version::parse(version::strip_prefix(old));
        let new = version::parse(version::strip_prefix(new));

        match (old, new) {
            (Ok(old), Ok(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { color: true }
    }
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn pointer(&self) -> String {
        self.paint(POINTER, |s| s.blue())
    }

    fn highlight(&self, text: &str) -> String {
        self.paint(text, |s| s.bright_cyan().bold())
    }

    fn accent(&self, text: &str) -> String {
        self.paint(text, |s| s.cyan())
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, |s| s.dimmed())
    }

    /// Command title framed by rule lines
    pub fn banner(&self, writer: &mut dyn Write, title: &str) -> io::Result<()> {
        let heading = format!("{} {} {}", RULE, title, RULE);
        let bar = "=".repeat(heading.chars().count());
        writeln!(writer)?;
        writeln!(writer, "{}", self.paint(&bar, |s| s.blue()))?;
        writeln!(writer, "{}", self.paint(&heading, |s| s.bright_cyan().bold()))?;
        writeln!(writer, "{}", self.paint(&bar, |s| s.blue()))?;
        writeln!(writer)
    }

    /// `▍ message` progress or hint line
    pub fn info(&self, writer: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(writer, "{} {}", self.pointer(), message)
    }

    pub fn success(&self, writer: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(writer, "{} {}", self.paint(SUCCESS, |s| s.green().bold()), self.paint(message, |s| s.green()))
    }

    pub fn warning(&self, writer: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(writer, "{} {}", self.paint(WARNING, |s| s.yellow().bold()), self.paint(message, |s| s.yellow()))
    }

    pub fn error(&self, writer: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(writer, "{} {}", self.paint(ERROR, |s| s.red().bold()), self.paint(message, |s| s.red()))
    }

    /// Green `▍ message` closing line
    pub fn done(&self, writer: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(writer, "{}", self.paint(&format!("{} {}", POINTER, message), |s| s.green().bold()))?;
        writeln!(writer)
    }

    fn section(&self, writer: &mut dyn Write, title: &str) -> io::Result<()> {
        writeln!(writer, "{}", self.paint(title, |s| s.cyan().bold()))?;
        writeln!(writer)
    }

    /// Usage summary printed when no command is given
    pub fn format_welcome(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.banner(writer, "Node Package Helper")?;
        let commands = [
            ("nph script", "Manage package.json scripts"),
            ("nph verif", "Verify dependencies"),
            ("nph upgrade", "Upgrade dependencies"),
            ("nph dep", "Check for deprecations"),
        ];
        for (command, description) in commands {
            writeln!(
                writer,
                "{} {} {}",
                self.pointer(),
                self.paint(&format!("{:<14}", command), |s| s.bright_cyan()),
                self.paint(description, |s| s.blue())
            )?;
        }
        writeln!(writer)?;
        self.info(
            writer,
            &format!("Run {} for more information", self.accent("nph {command} --help")),
        )?;
        writeln!(writer)
    }

    /// Scripts as `name → command`, names padded to the longest one
    ///
    /// With `numbered`, each line carries its 1-based index.
    pub fn format_scripts(
        &self,
        scripts: &[(String, String)],
        numbered: bool,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        let width = scripts.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        for (index, (name, command)) in scripts.iter().enumerate() {
            let number = if numbered {
                format!("{}. ", index + 1)
            } else {
                String::new()
            };
            let padded = if numbered {
                name.clone()
            } else {
                format!("{:<width$}", name, width = width)
            };
            writeln!(
                writer,
                "{} {}{} {} {}",
                self.pointer(),
                number,
                self.highlight(&padded),
                self.dim("→"),
                self.paint(command, |s| s.bright_cyan())
            )?;
        }
        Ok(())
    }

    /// One block per verification result
    pub fn format_verification(
        &self,
        results: &[VerificationResult],
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        for result in results {
            let dependency = result.dependency();
            let label = dependency.to_string();
            match result {
                VerificationResult::Ok { .. } => self.success(writer, &label)?,
                VerificationResult::VersionNotFound {
                    closest_version, ..
                } => {
                    self.error(writer, &label)?;
                    writeln!(
                        writer,
                        "  {} Version {} does not exist for {}",
                        self.pointer(),
                        dependency.declared_range(),
                        dependency.name
                    )?;
                    writeln!(
                        writer,
                        "  {} Closest version available: {}",
                        self.pointer(),
                        self.accent(closest_version)
                    )?;
                    writeln!(writer)?;
                }
                VerificationResult::PackageNotFound { suggestion, .. } => {
                    self.error(writer, &label)?;
                    writeln!(writer, "  {} This package does not exist", self.pointer())?;
                    match suggestion {
                        Some(suggestion) => writeln!(
                            writer,
                            "  {} Did you mean: {}",
                            self.pointer(),
                            self.accent(suggestion)
                        )?,
                        None => writeln!(writer, "  {} No similar packages found", self.pointer())?,
                    }
                    writeln!(writer)?;
                }
                VerificationResult::Error { message, .. } => {
                    self.warning(writer, &format!("{} - Error: {}", label, message))?;
                }
            }
        }
        Ok(())
    }

    /// Fixes written to the manifest
    pub fn format_fixes(&self, fixes: &[ManifestFix], writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.paint(&format!("{} Applying Fixes", POINTER), |s| s.blue().bold()))?;
        writeln!(writer)?;
        for fix in fixes {
            self.info(writer, &fix.to_string())?;
        }
        writeln!(writer)
    }

    /// Flags that would repair the reported problems
    pub fn format_fix_hints(&self, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer)?;
        let hints = [
            ("--fix-all", "to fix all issues"),
            ("--fix-version", "to fix version issues only"),
            ("--fix-name", "to fix package name issues only"),
        ];
        for (flag, purpose) in hints {
            self.info(writer, &format!("Run with {} {}", self.accent(flag), purpose))?;
        }
        writeln!(writer)
    }

    fn format_upgrade(&self, candidate: &UpgradeCandidate, writer: &mut dyn Write) -> io::Result<()> {
        let change = VersionChangeType::from_ranges(&candidate.from, &candidate.to);
        let change_label = if self.color {
            change.colored_label()
        } else {
            change.label().to_string()
        };
        let dev_marker = if candidate.dep_type.is_dev() {
            self.dim(" (dev)")
        } else {
            String::new()
        };

        writeln!(
            writer,
            "{} {} [{}]{}",
            self.pointer(),
            self.highlight(&candidate.name),
            change_label,
            dev_marker
        )?;
        writeln!(writer, "  {} {}", self.dim("Current:"), candidate.from)?;
        writeln!(writer, "  {} {}", self.dim("Latest:"), self.accent(&candidate.to))?;
        if !candidate.warnings.is_empty() {
            write!(writer, "  ")?;
            self.warning(writer, "Peer dependency warnings:")?;
            self.format_conflicts(&candidate.warnings, "    ", writer)?;
        }
        writeln!(writer)
    }

    fn format_skipped(&self, skipped: &SkippedUpgrade, writer: &mut dyn Write) -> io::Result<()> {
        writeln!(
            writer,
            "{} {}: {}",
            self.pointer(),
            self.highlight(&skipped.dependency.name),
            skipped.reason
        )?;
        self.format_conflicts(&skipped.conflicts, "  ", writer)?;
        writeln!(writer)
    }

    fn format_conflicts(
        &self,
        conflicts: &[PeerConflict],
        indent: &str,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        for conflict in conflicts {
            writeln!(
                writer,
                "{}{}",
                indent,
                self.dim(&format!("{} requires {}", conflict.package, conflict.required))
            )?;
        }
        Ok(())
    }

    /// Upgrades then skipped packages; a note when peer checks were unavailable
    pub fn format_upgrade_plan(&self, plan: &UpgradePlan, writer: &mut dyn Write) -> io::Result<()> {
        if !plan.upgrades.is_empty() {
            self.section(writer, "Upgrades available:")?;
            for candidate in &plan.upgrades {
                self.format_upgrade(candidate, writer)?;
            }
        }

        if !plan.skipped.is_empty() {
            self.section(writer, "Skipped packages:")?;
            for skipped in &plan.skipped {
                self.format_skipped(skipped, writer)?;
            }
        }

        if !plan.tree_available {
            self.warning(
                writer,
                "Dependency tree unavailable; peer dependency conflicts were not checked",
            )?;
            writeln!(writer)?;
        }

        if plan.is_empty() {
            self.done(writer, "All packages are up to date!")?;
        }
        Ok(())
    }

    /// Deprecated packages then deprecated code locations
    pub fn format_deprecation_report(
        &self,
        report: &DeprecationReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        if !report.deprecated_packages.is_empty() {
            self.section(writer, "Deprecated packages:")?;
            for package in &report.deprecated_packages {
                writeln!(writer, "{} {}", self.pointer(), self.highlight(&package.package))?;
                writeln!(writer, "  {} {}", self.dim("Reason:"), package.reason)?;
                writeln!(writer)?;
            }
        }

        if !report.deprecated_code_patterns.is_empty() {
            self.section(writer, "Deprecated code patterns:")?;
            for pattern in &report.deprecated_code_patterns {
                let location = format!("{}:{}:{}", pattern.file, pattern.line, pattern.column);
                writeln!(writer, "{} {}", self.pointer(), self.highlight(&location))?;
                writeln!(writer, "  {} {}", self.dim("Issue:"), pattern.message)?;
                writeln!(writer)?;
            }
        }

        if report.is_empty() {
            self.done(writer, "No deprecations found!")?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_deprecations(
        &self,
        report: &DeprecationReport,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        self.format_deprecation_report(report, writer)
    }
}
