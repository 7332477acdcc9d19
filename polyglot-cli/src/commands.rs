use polyglot_core::types::TargetLanguage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Summarize,
    Translate,
    Target(TargetLanguage),
    SaveTarget,
    State,
    Help,
    Quit,
}

pub const HELP: &str = "\
Type text and press Enter to send it for language detection.
  /translate        translate the last sent text
  /summarize        summarize it (long English text only)
  /target <code>    choose the target language: en es pt fr ru tr
  /save             keep the current target language as the default
  /state            show the session again
  /help             show this help
  /quit             exit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Ok(Command::Send(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name.to_ascii_lowercase().as_str(), arg) {
        ("translate", None) => Ok(Command::Translate),
        ("summarize", None) => Ok(Command::Summarize),
        ("target", Some(code)) => code
            .parse::<TargetLanguage>()
            .map(Command::Target)
            .map_err(|e| e.to_string()),
        ("target", None) => Err("usage: /target <en|es|pt|fr|ru|tr>".into()),
        ("save", None) => Ok(Command::SaveTarget),
        ("state", None) => Ok(Command::State),
        ("help", None) => Ok(Command::Help),
        ("quit" | "exit", None) => Ok(Command::Quit),
        _ => Err(format!("unknown command: /{rest}")),
    }
}
