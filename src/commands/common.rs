//! Argument handling and setup shared by the commands.

use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use commit_tally::Result;
use commit_tally::config::Config;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Path to configuration file [default: one of tally.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub log_level: LogLevel,
}

impl Common {
    /// Load the configuration and initialize logging
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let (config, warnings) = Config::load(args.config.as_ref())?;

        if !warnings.is_empty() {
            eprintln!("\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                eprintln!("   {warning}");
            }
            eprintln!();
        }

        Ok(Self {
            config,
            log_level: args.log_level,
        })
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
