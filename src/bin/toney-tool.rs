use std::process;

use clap::Parser;
use toneybot::commands::tool::{self, ToolArgs};
use toneybot::logging;

#[derive(Debug, Parser)]
#[command(
    name = "toney-tool",
    about = "Run a ToneyBot theory tool offline",
    disable_version_flag = true
)]
struct Cli {
    #[command(flatten)]
    tool: ToolArgs,
    /// Log debug details to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, false);
    if let Err(err) = tool::run(cli.tool) {
        eprintln!("{err}");
        process::exit(1);
    }
}
