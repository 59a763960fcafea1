use serde::Serialize;

use crate::error::TranslateError;

/// One source line after lexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Line {
    Empty,
    Label(String),
    Operation {
        mnemonic: String,
        operands: Vec<String>,
    },
    Directive {
        name: String,
        params: Vec<String>,
    },
}

/// Drop everything from the first `#` and trim.
pub fn strip_comments(line: &str) -> &str {
    line.split('#').next().unwrap_or_default().trim()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length in bytes of the leading run of word characters.
fn word_len(s: &str) -> usize {
    s.find(|c: char| !is_word_char(c)).unwrap_or(s.len())
}

fn split_list(s: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(|p| p.trim().to_string()).collect()
}

/// Lex one raw source line. Comments are stripped first.
///
/// Patterns are tried in order: label (`foo:`, `.LBB0_1:`), operation
/// (`mov eax, 5`), directive (`.globl main`).
pub fn lex_line(raw: &str) -> Result<Line, TranslateError> {
    let line = strip_comments(raw);
    if line.is_empty() {
        return Ok(Line::Empty);
    }

    let dot = usize::from(line.starts_with('.'));
    let word = word_len(&line[dot..]);
    let rest = &line[dot + word..];

    if word > 0 && rest.starts_with(':') {
        return Ok(Line::Label(line[..dot + word].to_string()));
    }

    if word > 0 && dot == 0 && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return Ok(Line::Operation {
            mnemonic: line[..word].to_ascii_lowercase(),
            operands: split_list(rest),
        });
    }

    if word > 0 && dot == 1 && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return Ok(Line::Directive {
            name: line[..1 + word].to_ascii_lowercase(),
            params: split_list(rest),
        });
    }

    Err(TranslateError::MalformedLine {
        line: line.to_string(),
    })
}
