//! Terminal command parsing.
//!
//! Each input line maps to one page gesture. Lines starting with `/` are
//! commands; anything else is a question for the assistant.

pub const HELP: &str = "\
Commands:
  /signin                     open the sign-in prompt
  /login <username> <password> sign in
  /close                      dismiss the sign-in prompt
  /clear                      clear the conversation context
  /context                    refresh the context meter
  /reset                      clear the current answer
  /help                       show this help
  /quit                       exit
Anything else is sent to the AI assistant.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenLogin,
    Login { username: String, password: String },
    CloseLogin,
    ClearContext,
    RefreshContext,
    ResetAnswer,
    Help,
    Quit,
    Ask(String),
    Unknown(String),
}

/// Parse one input line. Missing `/login` arguments come back empty so the
/// controller's own validation reports them.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_owned());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let args = parts.next().unwrap_or_default().trim();

    match name.to_ascii_lowercase().as_str() {
        "signin" => Command::OpenLogin,
        "login" => {
            let (username, password) = match args.split_once(char::is_whitespace) {
                Some((user, pass)) => (user, pass.trim()),
                None => (args, ""),
            };
            Command::Login { username: username.to_owned(), password: password.to_owned() }
        }
        "close" => Command::CloseLogin,
        "clear" => Command::ClearContext,
        "context" => Command::RefreshContext,
        "reset" => Command::ResetAnswer,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(name.to_owned()),
    }
}

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;
