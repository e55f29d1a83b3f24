use colored::Colorize;
use sprig_sdk::{FileStatus, LogEntry, MergeOutcome, Repository, SdkError, SdkResult};

use crate::cli::*;

/// Run one command. Refusals are printed and are not failures; only
/// internal errors make the process exit non-zero.
pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let result = match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Add(args) => cmd_add(args),
        Command::Rm(args) => cmd_rm(args),
        Command::Commit(args) => cmd_commit(args),
        Command::Log(args) => cmd_log(args),
        Command::Status(_) => cmd_status(),
        Command::Branch(args) => cmd_branch(args),
        Command::Checkout(args) => cmd_checkout(args),
        Command::Restore(args) => cmd_restore(args),
        Command::Merge(args) => cmd_merge(args),
    };
    match result {
        Err(SdkError::User(message)) => {
            println!("{message}");
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

fn open() -> SdkResult<Repository> {
    Repository::open(".")
}

fn cmd_init(args: InitArgs) -> SdkResult<()> {
    let path = args.path.unwrap_or_else(|| ".".into());
    let repo = Repository::init(&path)?;
    println!(
        "{} Initialized empty Sprig repository in {}",
        "✓".green().bold(),
        path.bold()
    );
    println!("  Branch: {}", repo.config().default_branch.yellow());
    Ok(())
}

fn cmd_add(args: AddArgs) -> SdkResult<()> {
    let mut repo = open()?;
    for path in &args.paths {
        repo.add(path)?;
    }
    Ok(())
}

fn cmd_rm(args: RmArgs) -> SdkResult<()> {
    let mut repo = open()?;
    for path in &args.paths {
        repo.rm(path)?;
    }
    Ok(())
}

fn cmd_commit(args: CommitArgs) -> SdkResult<()> {
    let mut repo = open()?;
    let id = repo.commit(&args.message)?;
    println!(
        "[{} {}] {}",
        repo.current_branch()?.yellow(),
        id.short_hex().dimmed(),
        args.message
    );
    Ok(())
}

fn cmd_log(args: LogArgs) -> SdkResult<()> {
    let repo = open()?;
    let entries = repo.log()?;
    let limit = args.limit.unwrap_or(entries.len());
    for entry in entries.iter().take(limit) {
        if args.oneline {
            println!("{} {}", entry.id.short_hex().yellow(), entry.commit.message);
        } else {
            print_log_entry(entry);
        }
    }
    Ok(())
}

fn print_log_entry(entry: &LogEntry) {
    println!("===");
    println!("{}", format!("commit {}", entry.id).yellow());
    if let Some((first, second)) = entry.merge_parents() {
        println!("Merge: {first} {second}");
    }
    println!(
        "Date: {}",
        entry.commit.timestamp.format("%a %b %e %H:%M:%S %Y %z")
    );
    println!("{}", entry.commit.message);
    println!();
}

fn cmd_status() -> SdkResult<()> {
    let repo = open()?;
    let status = repo.status()?;
    let workdir = &status.workdir;

    println!("=== Branches ===");
    for branch in &status.branches {
        if *branch == status.current_branch {
            println!("{}", format!("*{branch}").green().bold());
        } else {
            println!("{branch}");
        }
    }
    println!();

    println!("=== Staged Files ===");
    for entry in &workdir.staged {
        let line = if workdir.conflicts.contains(&entry.path) {
            format!("{} (conflict)", entry.path).red()
        } else {
            entry.path.green()
        };
        println!("{line}");
    }
    println!();

    println!("=== Removed Files ===");
    for path in &workdir.removed {
        println!("{}", path.red());
    }
    println!();

    println!("=== Modifications Not Staged For Commit ===");
    for entry in &workdir.unstaged {
        let label = match entry.status {
            FileStatus::Deleted => "deleted",
            FileStatus::Modified | FileStatus::New => "modified",
        };
        println!("{} ({label})", entry.path.red());
    }
    println!();

    println!("=== Untracked Files ===");
    for path in &workdir.untracked {
        println!("{}", path.dimmed());
    }
    println!();
    Ok(())
}

fn cmd_branch(args: BranchArgs) -> SdkResult<()> {
    let mut repo = open()?;
    match args.name {
        Some(name) if args.delete => {
            repo.remove_branch(&name)?;
            println!("Deleted branch {}", name.yellow());
        }
        Some(name) => {
            repo.branch(&name)?;
            println!("Created branch {}", name.yellow());
        }
        None => {
            let status = repo.status()?;
            for branch in &status.branches {
                if *branch == status.current_branch {
                    println!("* {}", branch.green().bold());
                } else {
                    println!("  {branch}");
                }
            }
        }
    }
    Ok(())
}

fn cmd_checkout(args: CheckoutArgs) -> SdkResult<()> {
    let mut repo = open()?;
    repo.checkout(&args.branch)?;
    println!("Switched to branch {}", args.branch.yellow().bold());
    Ok(())
}

fn cmd_restore(args: RestoreArgs) -> SdkResult<()> {
    let mut repo = open()?;
    let commit = match args.source {
        Some(source) => repo.resolve_commit(&source)?,
        None => repo.head_id()?,
    };
    repo.checkout_file(&commit, &args.file)
}

fn cmd_merge(args: MergeArgs) -> SdkResult<()> {
    let mut repo = open()?;
    let outcome = repo.merge(&args.branch)?;
    if let MergeOutcome::Merged { commit, .. } = &outcome {
        println!(
            "{} Merged {} into {} ({})",
            "✓".green().bold(),
            args.branch.yellow(),
            repo.current_branch()?.yellow(),
            commit.short_hex().dimmed()
        );
    }
    if let Some(message) = outcome.message() {
        if outcome.has_conflicts() {
            println!("{}", message.red().bold());
        } else {
            println!("{message}");
        }
    }
    Ok(())
}
