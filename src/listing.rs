use std::fmt::Write as _;

use serde::Serialize;

use crate::error::TranslateError;
use crate::translate::Translator;

/// Outcome of one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub number: usize, // 1-based
    pub source: String,
    pub output: String,
    pub error: Option<TranslateError>,
}

/// A whole translated file, line by line, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub module: String,
    pub lines: Vec<LineReport>,
    #[serde(skip)]
    annotate: bool,
    #[serde(skip)]
    module_header: bool,
    #[serde(skip)]
    indent: String,
}

impl Listing {
    /// Translate every line of `source`. Failing lines are recorded, not fatal.
    pub fn translate(translator: &Translator, module: &str, source: &str) -> Self {
        let lines = source
            .lines()
            .enumerate()
            .map(|(i, src)| {
                let number = i + 1;
                match translator.translate_source_line(src) {
                    Ok(output) => LineReport {
                        number,
                        source: src.to_string(),
                        output,
                        error: None,
                    },
                    Err(err) => {
                        tracing::warn!(line = number, %err, "translation failed");
                        LineReport {
                            number,
                            source: src.to_string(),
                            output: String::new(),
                            error: Some(err),
                        }
                    }
                }
            })
            .collect();

        let cfg = translator.config();
        Self {
            module: module.to_string(),
            lines,
            annotate: cfg.annotate,
            module_header: cfg.module_header,
            indent: cfg.indent.clone(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.lines.iter().filter(|l| l.error.is_some()).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = &LineReport> {
        self.lines.iter().filter(|l| l.error.is_some())
    }

    /// Target assembly text. Errors become `;; ERROR:` comments in place.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.module_header {
            let _ = writeln!(out, "{}.module {}", self.indent, self.module);
        }
        for l in &self.lines {
            if self.annotate {
                let _ = writeln!(out, ";; {}: {}", l.number, l.source);
            }
            match &l.error {
                Some(err) => {
                    let _ = writeln!(out, ";; ERROR: {err}");
                }
                None => out.push_str(&l.output),
            }
        }
        out
    }
}
