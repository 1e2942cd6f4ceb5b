use camino::Utf8PathBuf;
use clap::Parser;
use commit_tally::Result;
use commit_tally::config::Config;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of tally.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    // The weekday and offset fields parse lazily, so force them here too.
    match Config::load(config_path).and_then(|(config, warnings)| {
        let _ = config.weekdays()?;
        let _ = config.utc_offset()?;
        Ok((config, warnings))
    }) {
        Ok((_, warnings)) => {
            println!("Configuration validation successful");
            if let Some(path) = config_path {
                println!("Config file: {path}");
            } else {
                println!("Using default configuration (no config file found)");
            }

            // Print warnings if any
            if !warnings.is_empty() {
                eprintln!("\n⚠️  Configuration validation warnings:");
                for warning in &warnings {
                    eprintln!("   {warning}");
                }
                eprintln!();
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            std::process::exit(1);
        }
    }
}
