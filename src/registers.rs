use std::collections::HashMap;

use crate::config::{ConfigError, TranslatorConfig, UnknownRegisterPolicy};
use crate::error::TranslateError;

/// Built-in x86 -> Z80 register table. `d`, `e`, `h` and `l` stay free for
/// the `de`/`hl` addressing registers.
pub const DEFAULT_REGISTERS: &[(&str, &str)] = &[
    ("rax", "a"),
    ("eax", "a"),
    ("ax", "a"),
    ("al", "a"),
    ("rcx", "b"),
    ("ecx", "b"),
    ("cx", "b"),
    ("cl", "b"),
    ("rdx", "c"),
    ("edx", "c"),
    ("dx", "c"),
    ("dl", "c"),
];

/// Source register name -> target register name. Immutable once built.
#[derive(Debug, Clone)]
pub struct RegisterMap {
    table: HashMap<String, String>,
    policy: UnknownRegisterPolicy,
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::builtin(UnknownRegisterPolicy::default())
    }
}

impl RegisterMap {
    fn builtin(policy: UnknownRegisterPolicy) -> Self {
        let table = DEFAULT_REGISTERS
            .iter()
            .map(|&(src, dst)| (src.to_string(), dst.to_string()))
            .collect();
        Self { table, policy }
    }

    /// Built-in table with the config's entries merged over it. Fails if an
    /// entry targets an addressing register.
    pub fn from_config(cfg: &TranslatorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut map = Self::builtin(cfg.unknown_registers);
        for (src, dst) in &cfg.registers {
            map.table.insert(src.to_ascii_lowercase(), dst.clone());
        }
        Ok(map)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.table.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Resolve a source register to its target name, applying the
    /// unknown-register policy when there is no entry.
    pub fn translate(&self, name: &str) -> Result<String, TranslateError> {
        if let Some(target) = self.get(name) {
            return Ok(target.to_string());
        }
        match self.policy {
            UnknownRegisterPolicy::Reject => Err(TranslateError::UnknownRegister {
                name: name.to_string(),
            }),
            UnknownRegisterPolicy::Passthrough => {
                tracing::warn!(register = name, "no target mapping, passing through");
                Ok(name.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_aliases_share_targets() {
        let regs = RegisterMap::default();
        for name in ["rax", "eax", "ax", "al", "EAX"] {
            assert_eq!(regs.get(name), Some("a"), "{name}");
        }
        assert_eq!(regs.get("cl"), Some("b"));
        assert_eq!(regs.get("edx"), Some("c"));
        assert_eq!(regs.get("ebx"), None);
    }

    #[test]
    fn config_entries_override_and_extend() {
        let mut cfg = TranslatorConfig::default();
        cfg.registers.insert("EBX".into(), "ixl".into());
        cfg.registers.insert("edx".into(), "iyl".into());
        let regs = RegisterMap::from_config(&cfg).unwrap();
        assert_eq!(regs.get("ebx"), Some("ixl"));
        assert_eq!(regs.get("edx"), Some("iyl"));
    }

    #[test]
    fn addressing_register_targets_are_refused() {
        let mut cfg = TranslatorConfig::default();
        cfg.registers.insert("ebx".into(), "l".into());
        assert!(matches!(
            RegisterMap::from_config(&cfg),
            Err(ConfigError::ReservedTarget { .. })
        ));
    }

    #[test]
    fn policy_decides_unknown_names() {
        let strict = RegisterMap::default();
        assert_eq!(
            strict.translate("esi"),
            Err(TranslateError::UnknownRegister { name: "esi".into() })
        );

        let cfg = TranslatorConfig {
            unknown_registers: UnknownRegisterPolicy::Passthrough,
            ..TranslatorConfig::default()
        };
        let lenient = RegisterMap::from_config(&cfg).unwrap();
        assert_eq!(lenient.translate("esi").unwrap(), "esi");
    }
}
