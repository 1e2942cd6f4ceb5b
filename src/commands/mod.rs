mod collect;
mod common;
mod init;
mod validate;

pub use collect::{CollectArgs, process_collect};
pub use init::{InitArgs, init_config};
pub use validate::{ValidateArgs, validate_config};
