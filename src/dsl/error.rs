//! Error types for the IntentLang front end.

use thiserror::Error;

/// An error raised while lexing or parsing IntentLang source.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{line}:{col}] {kind}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub kind: ErrorKind,
    /// The offending source line with a caret under the column.
    /// Empty until [`ParseError::with_source`] is called.
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed literal or unexpected character.
    Lex,
    /// Token sequence that matches no statement rule.
    Syntax,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lex => f.write_str("lex error"),
            ErrorKind::Syntax => f.write_str("syntax error"),
        }
    }
}

impl ParseError {
    pub fn lex(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
            kind: ErrorKind::Lex,
            context: String::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
            kind: ErrorKind::Syntax,
            context: String::new(),
        }
    }

    /// Attach a human-readable snippet of the offending line.
    pub fn with_source(mut self, source: &str) -> Self {
        let Some(text) = source.lines().nth(self.line.saturating_sub(1)) else {
            return self;
        };
        let pad: String = text
            .chars()
            .take(self.col.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        self.context = format!("{text}\n{pad}^");
        self
    }
}
