use super::common::{Common, CommonArgs, LogLevel};
use camino::Utf8PathBuf;
use clap::Parser;
use commit_tally::Result;
use commit_tally::collector::Collector;
use commit_tally::github::{Client, RepoSpec};
use commit_tally::reports::{generate_console, generate_tsv, generate_xlsx};
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::{IsTerminal, stdout};

#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Repository to tally, as OWNER/NAME or a GitHub URL
    #[arg(long, value_name = "OWNER/NAME", env = "GITHUB_REPOSITORY")]
    pub repo: String,

    /// Output TSV file path
    #[arg(long, short = 'o', value_name = "PATH", default_value = "front.csv")]
    pub output: Utf8PathBuf,

    /// Also output the tally to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Don't print the summary table to the terminal
    #[arg(long, help_heading = "Report Output")]
    pub no_summary: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_collect(args: &CollectArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    let Some(token) = args.common.github_token.as_deref() else {
        bail!("a GitHub token is required; pass --github-token or set GITHUB_TOKEN");
    };

    let repo = RepoSpec::parse(&args.repo)?;
    let client = Client::new(token)?;

    // The progress bar would interfere with log output, so it only shows
    // when logging is off.
    let show_progress = common.log_level == LogLevel::None && stdout().is_terminal();

    let collector = Collector::new(client, repo, &common.config, show_progress)?;
    let activity = collector.collect().await?;
    let table = activity.into_table(&common.config.email_logins);

    let mut file = fs::File::create(&args.output).into_app_err_with(|| format!("could not create output file {}", args.output))?;
    generate_tsv(&table, &mut file)?;
    println!("Wrote tally to {}", args.output);

    if let Some(filename) = &args.excel {
        let mut file = fs::File::create(filename).into_app_err_with(|| format!("could not create output file {filename}"))?;
        generate_xlsx(&table, &mut file)?;
        println!("Wrote tally to {filename}");
    }

    if !args.no_summary {
        let mut summary = String::new();
        generate_console(&table, stdout().is_terminal(), &mut summary)?;
        print!("{summary}");
    }

    Ok(())
}
