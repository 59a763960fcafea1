use std::fmt;

use serde::Serialize;

use crate::error::TranslateError;
use crate::registers::RegisterMap;

const MEMORY_KEYWORD: &str = "byte ptr";

/// One classified instruction argument.
///
/// Register-carrying variants hold the already translated target name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// Literal constant, `5` / `-2`.
    Immediate(i64),
    /// Register used directly, `eax`.
    Register(String),
    /// Contents of a fixed address, `byte ptr [1000]`.
    MemoryDirect(i64),
    /// Contents of the address held in a register, `byte ptr [eax]`.
    MemoryIndirect(String),
}

impl Operand {
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::MemoryDirect(_) | Operand::MemoryIndirect(_))
    }
}

/// Target text. For memory operands this is the address that has to be
/// loaded into an addressing register, not the pointer-indirect form.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Immediate(n) => write!(f, "#{n}"),
            Operand::Register(r) | Operand::MemoryIndirect(r) => f.write_str(r),
            Operand::MemoryDirect(addr) if *addr < 0 => write!(f, "#-{:#x}", addr.unsigned_abs()),
            Operand::MemoryDirect(addr) => write!(f, "#{addr:#x}"),
        }
    }
}

/// Classify one raw operand string. First match wins:
/// integer literal, `byte ptr [..]` reference, register name.
///
/// Inside a memory reference, text that is not an integer literal is taken
/// as a register name; only the register lookup itself can fail.
pub fn classify(raw: &str, regs: &RegisterMap) -> Result<Operand, TranslateError> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(Operand::Immediate(n));
    }
    if let Some(expr) = memory_expr(raw) {
        return match expr.parse::<i64>() {
            Ok(addr) => Ok(Operand::MemoryDirect(addr)),
            Err(_) => Ok(Operand::MemoryIndirect(regs.translate(expr)?)),
        };
    }
    Ok(Operand::Register(regs.translate(raw)?))
}

/// Inner address expression of `byte ptr [<expr>]`, if `raw` is one.
fn memory_expr(raw: &str) -> Option<&str> {
    // ASCII lowering keeps byte offsets aligned with `raw`.
    let at = raw.to_ascii_lowercase().find(MEMORY_KEYWORD)?;
    let rest = raw[at + MEMORY_KEYWORD.len()..].trim_start();
    let inner = rest.strip_prefix('[')?;
    let end = inner.rfind(']')?;
    let expr = inner[..end].trim();
    (!expr.is_empty()).then_some(expr)
}
