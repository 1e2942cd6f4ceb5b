use camino::Utf8PathBuf;
use clap::Parser;
use commit_tally::Result;
use commit_tally::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "tally.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    let config = Config::default();
    config.save(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
