use serde::Serialize;

/// Failure scoped to a single source line. Never aborts a whole translation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TranslateError {
    #[error("operator not found in mapping: {mnemonic:?} ({operands} operands)")]
    UnsupportedMnemonic { mnemonic: String, operands: usize },
    #[error("{mnemonic} expects {expected} operands, got {found}")]
    Arity {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("directive not found: {name:?}")]
    UnsupportedDirective { name: String },
    #[error("{name} expects {expected} params, got {found}")]
    DirectiveParams {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("line does not match any pattern: {line:?}")]
    MalformedLine { line: String },
    #[error("no target mapping for register {name:?}")]
    UnknownRegister { name: String },
}
