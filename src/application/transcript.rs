use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Input,
    Output,
    Success,
    Error,
    System,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Input => "input",
            EntryKind::Output => "output",
            EntryKind::Success => "success",
            EntryKind::Error => "error",
            EntryKind::System => "system",
        }
    }
}

/// One displayed line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn input(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Input, text)
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Output, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Error, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(EntryKind::System, text)
    }

    pub fn blank() -> Self {
        Self::output("")
    }
}

/// Ordered, append-only log of displayed lines.
///
/// Insertion order is display order. The only way to remove entries is
/// [`Transcript::clear`], which drops all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TranscriptEntry>) {
        self.entries.extend(entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}

/// Lines shown when an interactive session starts.
pub fn banner() -> Vec<TranscriptEntry> {
    vec![
        TranscriptEntry::system("╔═══════════════════════════════════════════════════════════╗"),
        TranscriptEntry::system("║  LEDGER-DE-MAIN v1.0 - COBOL PAYROLL SETTLEMENT SYSTEM  ║"),
        TranscriptEntry::system("╚═══════════════════════════════════════════════════════════╝"),
        TranscriptEntry::system(""),
        TranscriptEntry::system("🧟‍♂️ THE FRANKENSTEIN: COBOL Brain + Blockchain Settlement"),
        TranscriptEntry::system(""),
        TranscriptEntry::system("Type HELP for available commands."),
        TranscriptEntry::system(""),
    ]
}
