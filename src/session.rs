//! Interactive conversation loop.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use tracing::debug;

use crate::gateway;
use crate::rchain::chat_models::{ChatMessage, ChatModel};
use crate::rchain::provider::ProviderError;

pub const SYSTEM_PROMPT: &str = "You are ToneyBot, a witty, friendly assistant that teaches practical music theory.
You love subtle music puns but never at the expense of clarity.
Be concise, encouraging, and show steps with short examples.
Prefer note names with sharps by default unless the key favors flats, and mention enharmonics if useful.
When you call tools, do it only when they add concrete musical data (notes, degrees, intervals).";

const INTRO_REQUEST: &str =
    "Introduce yourself as ToneyBot and give one example music task I can try.";

pub fn is_exit_keyword(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// One chat session; owns the only conversation history.
pub struct Session<'a, M: ChatModel> {
    model: &'a M,
    system_prompt: String,
    history: Vec<ChatMessage>,
    styled: bool,
}

impl<'a, M: ChatModel> Session<'a, M> {
    pub fn new(model: &'a M, system_prompt: impl Into<String>) -> Self {
        let system_prompt = system_prompt.into();
        Self {
            model,
            history: vec![ChatMessage::system(system_prompt.clone())],
            system_prompt,
            styled: false,
        }
    }

    /// Enables terminal colors.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Runs the greeting, the intro exchange and the prompt loop until
    /// `quit`/`exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W, pun: &str) -> io::Result<()> {
        self.greet(output, pun)?;
        self.introduce(output)?;

        let mut line = String::new();
        loop {
            write!(output, "\nYou: ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }
            let text = line.trim();
            if is_exit_keyword(text) {
                break;
            }

            match self.ask(text) {
                Ok(answer) => self.print_answer(output, &answer)?,
                Err(err) => self.print_error(output, &err)?,
            }
        }
        debug!(messages = self.history.len(), "session finished");
        Ok(())
    }

    /// Appends the user message and answers it. The message stays in history
    /// even when the turn fails.
    pub fn ask(&mut self, text: &str) -> Result<String, ProviderError> {
        self.history.push(ChatMessage::user_text(text));
        gateway::respond(self.model, &mut self.history)
    }

    fn greet<W: Write>(&self, output: &mut W, pun: &str) -> io::Result<()> {
        let welcome = "Welcome to ToneyBot, your pun-loving music theory sidekick! Type 'quit' to exit.";
        if self.styled {
            writeln!(output, "🎵 {}", welcome.bold())?;
            writeln!(output, "🎤 {} {}", "Pun of the day:".magenta(), pun.italic())
        } else {
            writeln!(output, "🎵 {welcome}")?;
            writeln!(output, "🎤 Pun of the day: {pun}")
        }
    }

    /// The intro uses a throwaway history so it never reaches the conversation.
    fn introduce<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let mut intro = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user_text(INTRO_REQUEST),
        ];
        match gateway::respond(self.model, &mut intro) {
            Ok(answer) => writeln!(output, "{answer}"),
            Err(err) => self.print_error(output, &err),
        }
    }

    fn print_answer<W: Write>(&self, output: &mut W, answer: &str) -> io::Result<()> {
        if self.styled {
            writeln!(output, "\n{} {answer}", "ToneyBot:".cyan().bold())
        } else {
            writeln!(output, "\nToneyBot: {answer}")
        }
    }

    fn print_error<W: Write>(&self, output: &mut W, err: &ProviderError) -> io::Result<()> {
        if self.styled {
            writeln!(output, "{} {err}", "Error:".red().bold())
        } else {
            writeln!(output, "Error: {err}")
        }
    }
}
