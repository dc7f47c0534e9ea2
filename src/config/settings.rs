use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Line separator used when no settings are supplied.
pub const LINE_SEPARATOR: &str = "\n";

/// The line separator every region offset and emitted line break is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    /// `"\n"`
    #[default]
    Lf,
    /// `"\r\n"`
    CrLf,
}

impl LineSeparator {
    /// The literal separator text.
    pub fn as_str(self) -> &'static str {
        match self {
            LineSeparator::Lf => LINE_SEPARATOR,
            LineSeparator::CrLf => "\r\n",
        }
    }

    /// Rewrite every line break in `text` (`\n` or `\r\n`) to this separator.
    pub fn normalize(self, text: &str) -> Cow<'_, str> {
        if !text.contains('\n') {
            return Cow::Borrowed(text);
        }
        match self {
            LineSeparator::Lf if !text.contains("\r\n") => Cow::Borrowed(text),
            LineSeparator::Lf => Cow::Owned(text.replace("\r\n", "\n")),
            LineSeparator::CrLf => Cow::Owned(text.replace("\r\n", "\n").replace('\n', "\r\n")),
        }
    }
}

impl fmt::Display for LineSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSeparator::Lf => write!(f, "lf"),
            LineSeparator::CrLf => write!(f, "crlf"),
        }
    }
}

/// Settings shared by the region engine and the structural editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub line_separator: LineSeparator,
    /// Treat a declaration name that resolves to nothing as an error instead
    /// of returning the source unchanged.
    #[serde(default)]
    pub require_target: bool,
}

impl EditorSettings {
    pub fn with_line_separator(mut self, line_separator: LineSeparator) -> Self {
        self.line_separator = line_separator;
        self
    }

    pub fn strict(mut self) -> Self {
        self.require_target = true;
        self
    }
}
