use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Target registers holding memory addresses; a data register mapped onto
/// one would be clobbered by the addressing load.
pub const RESERVED_TARGETS: &[&str] = &["d", "e", "h", "l", "de", "hl"];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("register {register:?} cannot map to {target:?}: reserved for memory addressing")]
    ReservedTarget { register: String, target: String },
}

/// What to do with a register name that has no entry in the register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRegisterPolicy {
    /// Fail the line with `UnknownRegister`.
    #[default]
    Reject,
    /// Emit the source name unchanged and log a warning.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub indent: String,             // prefix for instruction and directive lines
    pub annotate: bool,             // ";; N: <source>" before each line
    pub module_header: bool,        // "\t.module <name>" at the top
    pub unknown_registers: UnknownRegisterPolicy,
    pub registers: BTreeMap<String, String>, // merged over the built-in table
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            annotate: true,
            module_header: true,
            unknown_registers: UnknownRegisterPolicy::Reject,
            registers: BTreeMap::new(),
        }
    }
}

impl TranslatorConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject register entries that target an addressing register.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (register, target) in &self.registers {
            if RESERVED_TARGETS.contains(&target.to_ascii_lowercase().as_str()) {
                return Err(ConfigError::ReservedTarget {
                    register: register.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = TranslatorConfig::from_json_str(r#"{ "annotate": false }"#).unwrap();
        assert!(!cfg.annotate);
        assert_eq!(cfg.indent, "\t");
        assert_eq!(cfg.unknown_registers, UnknownRegisterPolicy::Reject);
        assert!(cfg.registers.is_empty());
    }

    #[test]
    fn policy_and_registers_parse() {
        let cfg = TranslatorConfig::from_json_str(
            r#"{ "unknown_registers": "passthrough", "registers": { "ebx": "ixl" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.unknown_registers, UnknownRegisterPolicy::Passthrough);
        assert_eq!(cfg.registers.get("ebx").map(String::as_str), Some("ixl"));
    }

    #[test]
    fn addressing_registers_cannot_be_targets() {
        for target in ["l", "H", "de"] {
            let json = format!(r#"{{ "registers": {{ "ebx": "{target}" }} }}"#);
            assert!(TranslatorConfig::from_json_str(&json).is_err(), "{target}");
        }
        let mut cfg = TranslatorConfig::default();
        cfg.registers.insert("ebx".into(), "l".into());
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ReservedTarget {
                register: "ebx".into(),
                target: "l".into()
            })
        );
    }

    #[test]
    fn bad_policy_is_rejected() {
        assert!(TranslatorConfig::from_json_str(r#"{ "unknown_registers": "maybe" }"#).is_err());
    }
}
