/* src/main.rs */

mod app;
mod config;
mod git;
mod llm;
mod prompt;
mod settings;
mod suggestions;
mod tui;
mod ui;

use crate::config::Config;
use crate::git::GitService;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;

#[derive(Parser)]
#[command(
    name = "better-commit",
    version,
    about = "AI-powered git commit message generator with beautiful TUI"
)]
struct Cli {
    /// Stage all files before committing
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Push to remote after committing
    #[arg(short = 'p', long = "push")]
    push: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure better-commit settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Failures and cancellations are communicated via printed text; every
    // documented path exits with status 0.
    match cli.command {
        Some(Commands::Config) => run_config(),
        None => run_commit(cli.all, cli.push),
    }
}

fn run_config() -> Result<()> {
    if !std::io::stdin().is_terminal() {
        println!("Configuration interface not supported in this terminal.");
        print_terminal_hints();
        return Ok(());
    }

    let config = Config::load();
    match tui::run_config_ui(config) {
        Ok(Some(message)) => println!("{message}"),
        Ok(None) => {}
        Err(e) => println!("Error: {e:#}"),
    }
    Ok(())
}

fn run_commit(stage_all: bool, push_after_commit: bool) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        println!("Interactive interface not supported in this terminal.");
        print_terminal_hints();
        return Ok(());
    }

    let git = GitService::new()?;
    if !git.is_repository() {
        println!(
            "Error: Not a git repository. Please run this command from inside a git repository."
        );
        return Ok(());
    }

    if stage_all && git.has_unstaged_changes() {
        if let Err(e) = git.stage_all() {
            println!("Error: {e:#}");
            return Ok(());
        }
    }

    if !git.has_staged_changes() {
        if git.has_unstaged_changes() {
            println!(
                "No staged files. Use \"git add .\" or run \"better-commit -a\" to stage all files."
            );
        } else {
            println!("No changes to commit. Working tree is clean.");
        }
        return Ok(());
    }

    let config = Config::load();
    match tui::run_commit_ui(config, git, push_after_commit) {
        Ok(Some(message)) => println!("{message}"),
        Ok(None) => {}
        Err(e) => println!("Error: {e:#}"),
    }
    Ok(())
}

fn print_terminal_hints() {
    println!("Please try running in a compatible terminal like:");
    println!("- Windows Terminal");
    println!("- PowerShell with proper TTY support");
    println!("- Git Bash");
    println!("- WSL terminal");
}
