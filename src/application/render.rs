use super::transcript::{EntryKind, TranscriptEntry};
use console::Style;

/// Display style class for a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Input,
    Output,
    Success,
    Error,
    System,
    Default,
}

impl LineStyle {
    pub fn for_kind(kind: EntryKind) -> Self {
        Self::for_kind_name(kind.as_str())
    }

    /// Looks up a style by kind name; unknown names get [`LineStyle::Default`].
    pub fn for_kind_name(name: &str) -> Self {
        match name {
            "input" => LineStyle::Input,
            "output" => LineStyle::Output,
            "success" => LineStyle::Success,
            "error" => LineStyle::Error,
            "system" => LineStyle::System,
            _ => LineStyle::Default,
        }
    }

    pub fn console_style(&self) -> Style {
        match self {
            LineStyle::Input | LineStyle::Output | LineStyle::Default => Style::new().green(),
            LineStyle::Success => Style::new().green().bold(),
            LineStyle::Error => Style::new().red(),
            LineStyle::System => Style::new().green().dim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub style: LineStyle,
    pub text: String,
}

impl RenderedLine {
    /// Terminal text for this line, styled unless `plain`.
    pub fn paint(&self, plain: bool) -> String {
        if plain {
            self.text.clone()
        } else {
            self.style.console_style().apply_to(&self.text).to_string()
        }
    }
}

pub fn render(entries: &[TranscriptEntry]) -> Vec<RenderedLine> {
    entries
        .iter()
        .map(|entry| RenderedLine {
            style: LineStyle::for_kind(entry.kind),
            text: entry.text.clone(),
        })
        .collect()
}
