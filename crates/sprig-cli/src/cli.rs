use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "sprig",
    about = "Sprig: a small local version control system",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new repository
    Init(InitArgs),
    /// Stage files for the next commit
    Add(AddArgs),
    /// Unstage files, or stage their removal if tracked
    Rm(RmArgs),
    /// Record the staged changes
    Commit(CommitArgs),
    /// Show first-parent history of the current branch
    Log(LogArgs),
    /// Show branches, staged, removed, modified and untracked files
    Status(StatusArgs),
    /// List, create or delete branches
    Branch(BranchArgs),
    /// Switch to another branch
    Checkout(CheckoutArgs),
    /// Restore a file from a commit into the working tree
    Restore(RestoreArgs),
    /// Merge a branch into the current branch
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct BranchArgs {
    pub name: Option<String>,
    #[arg(short = 'd', long, requires = "name")]
    pub delete: bool,
}

#[derive(Args)]
pub struct CheckoutArgs {
    pub branch: String,
}

#[derive(Args)]
pub struct RestoreArgs {
    pub file: String,
    /// Commit id or unique prefix to restore from; defaults to the head commit
    #[arg(short, long)]
    pub source: Option<String>,
}

#[derive(Args)]
pub struct MergeArgs {
    pub branch: String,
}
