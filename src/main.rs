//! acp CLI entry point.
//!
//! Parses command-line arguments, loads configuration and dispatches to the
//! workflow. Every error ends up here and decides the exit code.

use acp::completion::{print_completion_script, ShellType};
use acp::config::{load_config, Config};
use acp::error::{AcpError, Result};
use acp::gh::MergeMethod;
use acp::output::{print_cancelled, print_error};
use acp::process::SystemRunner;
use acp::signal::SignalHandler;
use acp::workflow::{checkout_branch, create_pr, parse_reviewers, PrOptions};
use acp::{logging, Context};
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acp")]
#[command(
    version,
    about = "Turn staged changes into a GitHub pull request without leaving your branch",
    after_help = "EXAMPLES:
    # Open a PR from the staged changes
    acp pr \"fix: handle empty input\"

    # Stage everything, open the PR and merge it right away
    acp pr \"docs: typo\" -a --merge

    # Push only, then finish the PR in the browser
    acp pr \"feat: new flag\" -i

    # Check out a contributor's branch as shown on GitHub
    acp checkout octocat:fix-typo"
)]
struct Cli {
    /// Print each step as it runs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit staged changes to a temporary branch and open a pull request
    #[command(after_help = "BEHAVIOR:
    The staged changes are committed on a temporary branch named
    <prefix>/<github-user>/<number>, pushed to origin, and the original
    branch is checked out again before the PR is created. Unstaged changes
    are carried back via a labelled stash entry.

    With an 'upstream' remote the PR targets upstream and uses
    <origin-owner>:<branch> as its head.")]
    Pr(PrArgs),

    /// Check out a branch, accepting GitHub's user:branch notation
    Checkout {
        /// Branch name, optionally prefixed with 'user:'
        branch: String,
    },

    /// Output shell completion script to stdout (hidden utility command)
    #[command(hide = true)]
    Completions {
        /// Shell type to generate completions for (bash, zsh, or fish)
        shell: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct PrArgs {
    /// Commit message, also used as the PR title
    message: String,

    /// PR body
    #[arg(short, long, default_value = "")]
    body: String,

    /// Push the branch and print a PR creation URL instead of creating the PR
    #[arg(short, long)]
    interactive: bool,

    /// Merge the PR immediately and delete the temporary branch
    #[arg(long)]
    merge: bool,

    /// Enable auto-merge once required checks pass
    #[arg(long)]
    auto_merge: bool,

    /// merge, squash or rebase (default from config, else squash)
    #[arg(long, value_name = "METHOD")]
    merge_method: Option<String>,

    /// After --merge, pull the original branch
    #[arg(long, conflicts_with = "no_sync")]
    sync: bool,

    /// Do not pull after --merge, even if the config enables sync
    #[arg(long)]
    no_sync: bool,

    /// Stage all changes (git add -A) first
    #[arg(short = 'a', long = "add")]
    add: bool,

    /// Comma-separated reviewers
    #[arg(short, long, value_name = "USERS")]
    reviewers: Option<String>,
}

impl PrArgs {
    /// Combine flags with configured defaults; flags win.
    fn into_options(self, config: &Config) -> Result<PrOptions> {
        let merge_method = match self.merge_method.as_deref() {
            Some(method) => method.parse::<MergeMethod>()?,
            None => config.merge_method,
        };

        Ok(PrOptions {
            message: self.message,
            body: self.body,
            interactive: self.interactive,
            merge: self.merge,
            auto_merge: self.auto_merge,
            merge_method,
            sync: !self.no_sync && (self.sync || config.sync),
            stage_all: self.add,
            reviewers: self
                .reviewers
                .as_deref()
                .map(parse_reviewers)
                .unwrap_or_default(),
        })
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        match e {
            AcpError::Interrupted => print_cancelled(),
            _ => print_error(&e.to_string()),
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Completions don't need config or a git repo
        Commands::Completions { shell } => {
            let shell = ShellType::from_name(&shell)?;
            print_completion_script(shell, &mut Cli::command())
        }

        Commands::Checkout { branch } => {
            let config = load_config()?;
            let runner = SystemRunner::new();
            let ctx = Context::new(&runner, &config)
                .with_verbose(cli.verbose)
                .with_signals(SignalHandler::install()?);
            checkout_branch(&ctx, &branch).map(|_| ())
        }

        Commands::Pr(args) => {
            let config = load_config()?;
            let options = args.into_options(&config)?;
            let runner = SystemRunner::new();
            let ctx = Context::new(&runner, &config)
                .with_verbose(cli.verbose)
                .with_signals(SignalHandler::install()?);
            create_pr(&ctx, &options).map(|_| ())
        }
    }
}
