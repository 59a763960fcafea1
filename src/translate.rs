use crate::config::{ConfigError, TranslatorConfig};
use crate::directive::translate_directive;
use crate::error::TranslateError;
use crate::expand::expand;
use crate::instructions::lookup;
use crate::lexer::{lex_line, Line};
use crate::registers::RegisterMap;

/// Per-line translator. Holds only immutable state, so one instance can be
/// shared by any number of threads.
#[derive(Debug, Clone)]
pub struct Translator {
    cfg: TranslatorConfig,
    regs: RegisterMap,
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            cfg: TranslatorConfig::default(),
            regs: RegisterMap::default(),
        }
    }
}

impl Translator {
    pub fn new(cfg: TranslatorConfig) -> Result<Self, ConfigError> {
        let regs = RegisterMap::from_config(&cfg)?;
        Ok(Self { cfg, regs })
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.cfg
    }

    /// Lex and translate one raw source line.
    pub fn translate_source_line(&self, raw: &str) -> Result<String, TranslateError> {
        let line = lex_line(raw)?;
        self.translate_line(&line)
    }

    /// Translate one decoded line to target text, one instruction per
    /// output line.
    pub fn translate_line(&self, line: &Line) -> Result<String, TranslateError> {
        match line {
            Line::Empty => Ok(String::new()),
            Line::Label(name) => Ok(format!("{name}:\n")),
            Line::Operation { mnemonic, operands } => self.translate_op(mnemonic, operands),
            Line::Directive { name, params } => {
                translate_directive(&name.to_ascii_lowercase(), params, &self.cfg.indent)
            }
        }
    }

    /// Translate one instruction. The mnemonic is matched case-insensitively.
    pub fn translate_op<S: AsRef<str>>(
        &self,
        mnemonic: &str,
        operands: &[S],
    ) -> Result<String, TranslateError> {
        let mnemonic = mnemonic.to_ascii_lowercase();
        let desc = lookup(&mnemonic).ok_or_else(|| TranslateError::UnsupportedMnemonic {
            mnemonic: mnemonic.clone(),
            operands: operands.len(),
        })?;
        let arity = desc.op.arity();
        if operands.len() != arity {
            return Err(TranslateError::Arity {
                mnemonic,
                expected: arity,
                found: operands.len(),
            });
        }
        let expansion = expand(desc.op, operands, &self.regs)?;
        tracing::debug!(%mnemonic, lines = expansion.len(), "expanded");

        let indent = &self.cfg.indent;
        Ok(expansion
            .lines()
            .iter()
            .map(|l| format!("{indent}{l}\n"))
            .collect())
    }
}
