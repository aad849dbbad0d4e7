use clap::{Args, Subcommand};
use tracing::warn;

use crate::config;
use crate::rchain::provider::{API_KEY_ENV, is_api_key_present};

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    /// Validate the config file and, optionally, one profile
    Check {
        #[arg(long)]
        profile: Option<String>,
    },
}

pub fn run(args: ConfigArgs) -> Result<(), String> {
    match args.command {
        ConfigSubcommand::Check { profile } => {
            let path = config::validate_config(profile.as_deref())?;
            if !is_api_key_present() {
                warn!("{API_KEY_ENV} is not set; chat sessions will fail to start");
            }
            println!("config OK: {}", path.display());
            Ok(())
        }
    }
}
