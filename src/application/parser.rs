/// A tokenized input line: upper-cased command name plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: String,
    pub args: Vec<String>,
}

/// Tokenizes a raw terminal line.
///
/// The whole line is upper-cased before splitting, so arguments (employee
/// IDs, tax codes, wallet addresses) come back upper-cased too. Callers
/// reject blank lines before getting here; a blank line yields an empty
/// command name.
pub fn parse(raw: &str) -> ParsedCommand {
    let normalized = raw.trim().to_uppercase();
    let mut tokens = normalized.split_whitespace().map(str::to_string);
    let command = tokens.next().unwrap_or_default();
    ParsedCommand {
        command,
        args: tokens.collect(),
    }
}
