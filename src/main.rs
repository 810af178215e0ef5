//! nph - Node Package Helper CLI
//!
//! Manages package.json scripts, verifies and upgrades dependencies against
//! the npm registry and reports deprecations.

use anyhow::Context;
use clap::Parser;
use nph::cli::{CliArgs, Commands, ScriptAction};
use nph::commands::{dep, script, upgrade, verif, CommandContext, CommandStatus};
use nph::config::Config;
use nph::deprecation::EslintScanner;
use nph::error::AppError;
use nph::logging;
use nph::output::TextFormatter;
use nph::prompt::TerminalPrompt;
use nph::registry::NpmRegistry;
use nph::tree::NpmTreeResolver;
use nph::upgrade::UpgradeOptions;
use nph::verify::FixOptions;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    let color = !args.no_color && io::stdout().is_terminal();
    let text = TextFormatter::new(color);

    let Some(command) = args.command else {
        let mut stdout = io::stdout().lock();
        let _ = text.format_welcome(&mut stdout);
        return ExitCode::SUCCESS;
    };

    // Ctrl-C outside a prompt ends the command without touching the manifest
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\nOperation cancelled");
            std::process::exit(0);
        }
    });

    match run(command, color).await {
        Ok(status) => status.exit_code(),
        Err(e) if e.downcast_ref::<AppError>().is_some_and(AppError::is_cancelled) => {
            println!("\nOperation cancelled");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{:#}", e), "command failed");
            let _ = text.error(&mut io::stderr(), &format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Build the shared context and dispatch to the command
async fn run(command: Commands, color: bool) -> anyhow::Result<CommandStatus> {
    let project_dir = std::env::current_dir().context("cannot determine current directory")?;
    let config = Config::from_env(project_dir);
    logging::init(&config.log_path);

    let ctx = CommandContext::new(&config, color, color);
    let mut stdout = io::stdout();

    let status = match command {
        Commands::Script { action } => {
            let mut prompt = TerminalPrompt::new(color);
            match action {
                None => script::list(&ctx, &mut stdout)?,
                Some(ScriptAction::Add) => script::add(&ctx, &mut prompt, &mut stdout)?,
                Some(ScriptAction::Rm) => script::remove(&ctx, &mut prompt, &mut stdout)?,
                Some(ScriptAction::Edit) => script::edit(&ctx, &mut prompt, &mut stdout)?,
            }
        }
        Commands::Verif(args) => {
            let registry = NpmRegistry::from_config(&config)?;
            let options = FixOptions::from_flags(args.fix_all, args.fix_name, args.fix_version);
            verif::run(&ctx, &registry, options, &mut stdout).await?
        }
        Commands::Upgrade(args) => {
            let registry = NpmRegistry::from_config(&config)?;
            let resolver = NpmTreeResolver::new(config.project_dir(), config.scan_timeout);
            let mut prompt = TerminalPrompt::new(color);
            let upgrade_args = upgrade::UpgradeArgs {
                dry_run: args.dry_run,
                options: UpgradeOptions {
                    force: args.force,
                    ignore_deprecated: args.ignore_deprecated,
                },
            };
            upgrade::run(&ctx, &registry, &resolver, &mut prompt, upgrade_args, &mut stdout)
                .await?
        }
        Commands::Dep(args) => {
            let registry = NpmRegistry::from_config(&config)?;
            let scanner = EslintScanner::new(config.project_dir(), config.scan_timeout);
            let dep_args = dep::DepArgs {
                fix: args.fix,
                json: args.json,
            };
            let ctx = if args.json {
                CommandContext::new(&config, color, false)
            } else {
                ctx
            };
            dep::run(&ctx, &registry, &scanner, dep_args, &mut stdout).await?
        }
    };

    stdout.flush()?;
    Ok(status)
}
