//! CLI argument parsing module for nph

use clap::{Args, Parser, Subcommand};

/// Node Package Helper CLI
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "nph", version, about = "Node Package Helper CLI")]
pub struct CliArgs {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Display and manage package.json scripts
    Script {
        #[command(subcommand)]
        action: Option<ScriptAction>,
    },

    /// Verify dependencies against the npm registry
    Verif(VerifArgs),

    /// Upgrade packages to latest compatible versions without conflicts
    Upgrade(UpgradeArgs),

    /// Check for deprecated packages and code patterns
    Dep(DepArgs),
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    /// Add a new script interactively
    Add,
    /// Remove scripts interactively
    Rm,
    /// Edit a script interactively
    Edit,
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifArgs {
    /// Fix all issues automatically
    #[arg(long)]
    pub fix_all: bool,

    /// Fix version issues only
    #[arg(long)]
    pub fix_version: bool,

    /// Fix package name issues only
    #[arg(long)]
    pub fix_name: bool,
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeArgs {
    /// Show what would be upgraded without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Override peer dependency conflicts
    #[arg(long)]
    pub force: bool,

    /// Proceed despite deprecated packages
    #[arg(long)]
    pub ignore_deprecated: bool,
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepArgs {
    /// Explain how to address deprecations (no automatic fixes)
    #[arg(long)]
    pub fix: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command() {
        let args = CliArgs::parse_from(["nph"]);
        assert_eq!(args.command, None);
        assert!(!args.no_color);
    }

    #[test]
    fn test_script_list() {
        let args = CliArgs::parse_from(["nph", "script"]);
        assert_eq!(args.command, Some(Commands::Script { action: None }));
    }

    #[test]
    fn test_script_actions() {
        for (word, action) in [
            ("add", ScriptAction::Add),
            ("rm", ScriptAction::Rm),
            ("edit", ScriptAction::Edit),
        ] {
            let args = CliArgs::parse_from(["nph", "script", word]);
            assert_eq!(
                args.command,
                Some(Commands::Script {
                    action: Some(action)
                })
            );
        }
    }

    #[test]
    fn test_verif_flags() {
        let args = CliArgs::parse_from(["nph", "verif", "--fix-version", "--fix-name"]);
        assert_eq!(
            args.command,
            Some(Commands::Verif(VerifArgs {
                fix_all: false,
                fix_version: true,
                fix_name: true,
            }))
        );
    }

    #[test]
    fn test_upgrade_flags() {
        let args = CliArgs::parse_from(["nph", "upgrade", "--dry-run", "--ignore-deprecated"]);
        assert_eq!(
            args.command,
            Some(Commands::Upgrade(UpgradeArgs {
                dry_run: true,
                force: false,
                ignore_deprecated: true,
            }))
        );
    }

    #[test]
    fn test_dep_flags() {
        let args = CliArgs::parse_from(["nph", "dep", "--json", "--no-color"]);
        assert!(args.no_color);
        assert_eq!(
            args.command,
            Some(Commands::Dep(DepArgs {
                fix: false,
                json: true,
            }))
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(CliArgs::try_parse_from(["nph", "verig"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(CliArgs::try_parse_from(["nph", "upgrade", "--yes"]).is_err());
    }
}
