//! A tool to tally each collaborator's commits per weekday on a GitHub repository.
//!
//! # Overview
//!
//! `commit-tally` queries GitHub's GraphQL API and counts, for every direct
//! collaborator of a repository, how many commits they authored on the most
//! recent occurrence of each weekday. Commits that mention a secondary
//! contributor through a `Co-authored-by:` trailer credit that contributor
//! too. The result is written as a tab-separated values file with one row
//! per weekday and one column per contributor.
//!
//! Two corrections keep the counts honest:
//!
//! - A commit reachable from several branches is counted once, not once per
//!   branch.
//! - A commit whose authored date falls outside the queried day (rebased or
//!   cherry-picked history bleeding across the day boundary) is not counted.
//!
//! # Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! commit-tally collect --repo owner/name
//! ```
//!
//! This writes `front.csv` and prints a summary table.
//!
//! # Basic Usage
//!
//! **Tally a repository:**
//! ```bash
//! commit-tally collect --repo owner/name
//! commit-tally collect --repo https://github.com/owner/name
//! ```
//!
//! **Choose the output file:**
//! ```bash
//! commit-tally collect --repo owner/name --output weekly.tsv
//! ```
//!
//! **Also produce an Excel report:**
//! ```bash
//! commit-tally collect --repo owner/name --excel weekly.xlsx
//! ```
//!
//! # Configuration
//!
//! Settings live in `tally.[toml|yml|yaml|json]` in the working directory,
//! or a file named with `--config`. All fields are optional:
//!
//! ```toml
//! # Weekdays to collect (default: monday through friday)
//! weekdays = ["mon", "tue", "wed"]
//!
//! # Fixed UTC offset defining the local calendar day (default: "-03:00")
//! utc_offset = "-03:00"
//!
//! # Branches excluded from counting (default: master, develop)
//! excluded_branches = ["master", "develop"]
//!
//! # Collaborator logins excluded from counting (bots, maintainers)
//! excluded_logins = ["pyup-bot"]
//!
//! # Commits fetched per branch/day/collaborator query (default: 100)
//! page_size = 100
//!
//! # Known email → login translations for co-author credit
//! [email_logins]
//! "ada@example.com" = "ada"
//! ```
//!
//! **Generate a default config:**
//! ```bash
//! commit-tally init tally.toml
//! ```
//!
//! **Validate a config without collecting:**
//! ```bash
//! commit-tally validate --config tally.toml
//! ```
//!
//! # GitHub Access
//!
//! A personal access token with read access to the repository is required,
//! via the `GITHUB_TOKEN` environment variable or `--github-token`. Requests
//! are issued strictly one at a time; a failing request aborts the whole run
//! with no partial output.
//!
//! # Output
//!
//! The TSV file is UTF-8, one row per weekday label, one column per
//! contributor, cell = commit count. Co-author credit keyed by an email the
//! tool can translate (a collaborator's profile email or a configured
//! `email_logins` entry) is folded into that collaborator's column; other
//! emails get their own column.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use commit_tally::Result;

mod commands;

use crate::commands::{CollectArgs, InitArgs, ValidateArgs, init_config, process_collect, validate_config};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "commit-tally", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: TallySubcommand,
}

#[derive(Subcommand, Debug)]
enum TallySubcommand {
    /// Tally collaborator commits per weekday and export the result
    Collect(Box<CollectArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        TallySubcommand::Collect(collect_args) => process_collect(collect_args).await,
        TallySubcommand::Init(init_args) => init_config(init_args),
        TallySubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
