use super::parser::ParsedCommand;

/// The finite set of terminal commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Vec<String>),
    Settle(Vec<String>),
    Batch,
    Status,
    Clear,
    Unknown(String),
}

impl Command {
    /// Commands that suspend on the collaborator and so hold the gate across an await.
    pub fn is_async(&self) -> bool {
        matches!(self, Command::Run(_) | Command::Settle(_) | Command::Batch)
    }
}

impl From<ParsedCommand> for Command {
    fn from(parsed: ParsedCommand) -> Self {
        match parsed.command.as_str() {
            "HELP" => Command::Help,
            "RUN" => Command::Run(parsed.args),
            "SETTLE" => Command::Settle(parsed.args),
            "BATCH" => Command::Batch,
            "STATUS" => Command::Status,
            "CLEAR" => Command::Clear,
            _ => Command::Unknown(parsed.command),
        }
    }
}
