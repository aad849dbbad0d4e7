use std::io::{self, IsTerminal};

use clap::Args;
use tracing::info;

use crate::config::{self, Overrides};
use crate::puns;
use crate::rchain::openai::OpenAiChat;
use crate::session::Session;

#[derive(Debug, Args, Clone, Default)]
pub struct ChatArgs {
    /// Chat model name (env: OPENAI_MODEL)
    #[arg(long)]
    pub model: Option<String>,
    /// Sampling temperature between 0.0 and 2.0 (env: TONEY_TEMPERATURE)
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Request timeout in seconds (env: TONEY_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Profile name from the config file
    #[arg(long)]
    pub profile: Option<String>,
}

impl ChatArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: self.timeout,
            profile: self.profile.clone(),
        }
    }
}

pub fn run(args: ChatArgs) -> Result<(), String> {
    let settings = config::resolve_settings(&args.overrides())?;
    let model = OpenAiChat::from_env(settings.model.clone(), &settings.chat_options())
        .map_err(|err| err.to_string())?;
    info!(
        model = %model.model(),
        base_url = %settings.base_url,
        temperature = settings.temperature,
        "starting chat session"
    );

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut output = stdout.lock();
    let mut session = Session::new(&model, settings.system_prompt).styled(styled);
    session
        .run(io::stdin().lock(), &mut output, puns::todays_pun())
        .map_err(|err| format!("Terminal I/O failed: {err}"))
}
