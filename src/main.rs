use std::io;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, shells};
use toneybot::commands::chat::{self, ChatArgs};
use toneybot::commands::config::{self, ConfigArgs};
use toneybot::commands::tool::{self, ToolArgs};
use toneybot::logging;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("TONEY_GIT_SHA"),
    "\nbuilt: ",
    env!("TONEY_BUILD_TS")
);

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  toneybot\n  toneybot --model gpt-4o --temperature 0.5\n  toneybot --profile studio\n  toneybot tool get-scale --args '{\"tonic\": \"D\", \"scale_type\": \"dorian\"}'\n  toneybot config check --profile studio\n  toneybot completion bash > ~/.local/share/bash-completion/completions/toneybot";

#[derive(Debug, Parser)]
#[command(
    name = "toneybot",
    version,
    long_version = LONG_VERSION,
    about = "Pun-loving music theory chat assistant",
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    chat: ChatArgs,
    /// Log debug details to stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(about = "Run a theory tool offline and print its JSON result")]
    Tool(ToolArgs),
    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, "toneybot", &mut io::stdout()),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, "toneybot", &mut io::stdout()),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, "toneybot", &mut io::stdout()),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => chat::run(cli.chat),
        Some(Commands::Config(args)) => config::run(args),
        Some(Commands::Tool(args)) => tool::run(args),
        Some(Commands::Completion { shell }) => {
            print_completion(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
