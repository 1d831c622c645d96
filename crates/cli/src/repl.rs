//! REPL command parsing.
//!
//! Plain text goes to the main conversation. A leading `/` selects another
//! channel or a memory/maintenance action.

use recall_core::message::Channel;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chat(String),
    ChainOfThought(String),
    WebSearch(String),
    Vision(String),
    AddUrl(String),
    ListUrls,
    Improve,
    /// Apply the given text, or the stored suggestions when `None`.
    Apply(Option<String>),
    Verify,
    /// Export to a file, or print when `None`.
    Export(Option<PathBuf>),
    Import(PathBuf),
    Clear(Channel),
    History(Channel),
    Key(String),
    Help,
    Exit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("/{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("{0}")]
    UnknownChannel(String),

    #[error("unknown command /{0}; type /help for a list")]
    Unknown(String),
}

impl Command {
    /// Parse one input line. `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Self::Chat(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        let required = |cmd: &'static str| {
            arg.map(String::from)
                .ok_or(CommandError::MissingArgument(cmd))
        };
        let channel = || -> Result<Channel, CommandError> {
            match arg {
                Some(a) => a.parse().map_err(CommandError::UnknownChannel),
                None => Ok(Channel::Main),
            }
        };

        let command = match name {
            "cot" => Self::ChainOfThought(required("cot")?),
            "web" => Self::WebSearch(required("web")?),
            "vision" => Self::Vision(required("vision")?),
            "url" => Self::AddUrl(required("url")?),
            "urls" => Self::ListUrls,
            "improve" => Self::Improve,
            "apply" => Self::Apply(arg.map(String::from)),
            "verify" => Self::Verify,
            "export" => Self::Export(arg.map(PathBuf::from)),
            "import" => Self::Import(PathBuf::from(required("import")?)),
            "clear" => Self::Clear(channel()?),
            "history" => Self::History(channel()?),
            "key" => Self::Key(required("key")?),
            "help" | "?" => Self::Help,
            "exit" | "quit" | "q" => Self::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
  Type a message to chat. Commands:
    /cot TEXT         Chain-of-thought conversation
    /web TEXT         Web search conversation
    /vision URL       Describe an image at URL
    /url URL          Add a URL as context for chat
    /urls             List context URLs
    /improve          Run a self-improvement analysis
    /apply [TEXT]     Record TEXT, or the last suggestions, as an improvement
    /verify           List recorded improvements
    /export [FILE]    Export memory as JSON
    /import FILE      Replace memory with an exported JSON file
    /clear [CHANNEL]  Clear main, cot or web history
    /history [CHANNEL]
    /key KEY          Set the API key
    /help, /exit";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn plain_text_is_main_chat() {
        assert_eq!(parse("  hello there "), Command::Chat("hello there".into()));
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn channel_commands_carry_text() {
        assert_eq!(parse("/cot why is the sky blue"), Command::ChainOfThought("why is the sky blue".into()));
        assert_eq!(parse("/web rust 2024 edition"), Command::WebSearch("rust 2024 edition".into()));
        assert_eq!(parse("/vision https://img/x.png"), Command::Vision("https://img/x.png".into()));
        assert_eq!(parse("/url https://docs.rs"), Command::AddUrl("https://docs.rs".into()));
        assert_eq!(parse("/key gsk-123"), Command::Key("gsk-123".into()));
    }

    #[test]
    fn argumentless_commands() {
        assert_eq!(parse("/urls"), Command::ListUrls);
        assert_eq!(parse("/improve"), Command::Improve);
        assert_eq!(parse("/verify"), Command::Verify);
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/exit"), Command::Exit);
        assert_eq!(parse("/quit"), Command::Exit);
    }

    #[test]
    fn optional_arguments() {
        assert_eq!(parse("/apply"), Command::Apply(None));
        assert_eq!(parse("/apply be brief"), Command::Apply(Some("be brief".into())));
        assert_eq!(parse("/export"), Command::Export(None));
        assert_eq!(parse("/export out.json"), Command::Export(Some(PathBuf::from("out.json"))));
        assert_eq!(parse("/import in.json"), Command::Import(PathBuf::from("in.json")));
    }

    #[test]
    fn channel_arguments_default_to_main() {
        assert_eq!(parse("/clear"), Command::Clear(Channel::Main));
        assert_eq!(parse("/clear cot"), Command::Clear(Channel::ChainOfThought));
        assert_eq!(parse("/history web"), Command::History(Channel::WebSearch));
    }

    #[test]
    fn errors() {
        assert_eq!(Command::parse("/cot"), Err(CommandError::MissingArgument("cot")));
        assert_eq!(Command::parse("/import   "), Err(CommandError::MissingArgument("import")));
        assert_eq!(Command::parse("/dance"), Err(CommandError::Unknown("dance".into())));
        assert!(matches!(
            Command::parse("/clear everything"),
            Err(CommandError::UnknownChannel(_))
        ));
    }
}
