pub mod config;
pub mod directive;
pub mod error;
pub mod expand;
pub mod instructions;
pub mod lexer;
pub mod listing;
pub mod operand;
pub mod registers;
pub mod translate;

pub use config::{ConfigError, TranslatorConfig, UnknownRegisterPolicy};
pub use error::TranslateError;
pub use expand::{expand, Expansion};
pub use instructions::{lookup, InstrDesc, Mnemonic};
pub use lexer::{lex_line, Line};
pub use listing::{LineReport, Listing};
pub use operand::{classify, Operand};
pub use registers::RegisterMap;
pub use translate::Translator;
