use serde::Serialize;

use crate::error::TranslateError;
use crate::instructions::Mnemonic;
use crate::operand::classify;
use crate::registers::RegisterMap;

/// Z80 registers that hold the address of a memory operand, in the order
/// memory operands claim them.
pub const ADDRESSING_REGISTERS: [&str; 2] = ["hl", "de"];

const ACCUMULATOR: &str = "a";

/// Operand order of a two-operand ALU op, which decides how to proceed
/// when the source already sits in the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    /// `dst op src == src op dst`: load the source, apply the destination.
    Commutative,
    /// `dst - src`: computed as `-src + dst`.
    Subtract,
}

/// Target instructions for one source instruction, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Expansion {
    lines: Vec<String>,
}

impl Expansion {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Resolves operands to target text, collecting the addressing loads that
/// have to run before the instruction body.
struct Operands<'a> {
    regs: &'a RegisterMap,
    loads: Vec<String>,
}

impl<'a> Operands<'a> {
    fn new(regs: &'a RegisterMap) -> Self {
        Self {
            regs,
            loads: Vec::new(),
        }
    }

    fn resolve(&mut self, raw: &str) -> Result<String, TranslateError> {
        let op = classify(raw, self.regs)?;
        if !op.is_memory() {
            return Ok(op.to_string());
        }
        // At most two operands per instruction, so at most two loads.
        let reg = ADDRESSING_REGISTERS[self.loads.len()];
        self.loads.push(format!("ld {reg}, {op}"));
        Ok(format!("({reg})"))
    }

    fn finish(self, body: Vec<String>) -> Expansion {
        let mut lines = self.loads;
        lines.extend(body);
        Expansion { lines }
    }
}

/// Expand one source instruction into target instructions. Fails with
/// `Arity` when `raw` does not hold exactly `op.arity()` operands.
pub fn expand<S: AsRef<str>>(
    op: Mnemonic,
    raw: &[S],
    regs: &RegisterMap,
) -> Result<Expansion, TranslateError> {
    if raw.len() != op.arity() {
        return Err(TranslateError::Arity {
            mnemonic: op.name().to_string(),
            expected: op.arity(),
            found: raw.len(),
        });
    }
    let raw: Vec<&str> = raw.iter().map(AsRef::as_ref).collect();
    let mut ops = Operands::new(regs);
    let body = match op {
        Mnemonic::Mov => {
            let dst = ops.resolve(raw[0])?;
            let src = ops.resolve(raw[1])?;
            vec![format!("ld {dst}, {src}")]
        }
        Mnemonic::And => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("and {s}"), Order::Commutative, true)?
        }
        Mnemonic::Or => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("or {s}"), Order::Commutative, true)?
        }
        Mnemonic::Xor => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("xor {s}"), Order::Commutative, true)?
        }
        Mnemonic::Add => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("add a, {s}"), Order::Commutative, true)?
        }
        Mnemonic::Sub => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("sub {s}"), Order::Subtract, true)?
        }
        Mnemonic::Cmp => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("cp {s}"), Order::Subtract, false)?
        }
        Mnemonic::Test => {
            accumulate(&mut ops, raw[0], raw[1], |s| format!("and {s}"), Order::Commutative, false)?
        }
        Mnemonic::Inc => {
            let dst = ops.resolve(raw[0])?;
            vec![format!("inc {dst}")]
        }
        Mnemonic::Dec => {
            let dst = ops.resolve(raw[0])?;
            vec![format!("dec {dst}")]
        }
        Mnemonic::Shl => shift(&mut ops, raw[0], "sla a")?,
        Mnemonic::Shr => shift(&mut ops, raw[0], "srl a")?,
        Mnemonic::Sar => shift(&mut ops, raw[0], "sra a")?,
        // Branch targets are labels, never classified.
        Mnemonic::Jmp => vec![format!("jp {}", raw[0])],
        Mnemonic::Je => vec![format!("jp z, {}", raw[0])],
        Mnemonic::Jne => vec![format!("jp nz, {}", raw[0])],
        Mnemonic::Call => vec![format!("call {}", raw[0])],
        Mnemonic::Ret => vec!["ret".to_string()],
        Mnemonic::Nop => vec!["nop".to_string()],
    };
    Ok(ops.finish(body))
}

/// Accumulator round-trip: the Z80 ALU only works on `a`.
///
/// Loading the destination into `a` would clobber a source that already
/// lives there, so that case loads in the other order (commutative ops) or
/// negates the source and adds (subtraction). Either way the zero flag
/// matches `dst op src`.
fn accumulate(
    ops: &mut Operands<'_>,
    dst: &str,
    src: &str,
    alu: impl Fn(&str) -> String,
    order: Order,
    store: bool,
) -> Result<Vec<String>, TranslateError> {
    let dst = ops.resolve(dst)?;
    let src = ops.resolve(src)?;
    let clobbered = src == ACCUMULATOR && dst != ACCUMULATOR;
    let mut body = match (clobbered, order) {
        (false, _) => vec![format!("ld a, {dst}"), alu(src.as_str())],
        (true, Order::Commutative) => vec![format!("ld a, {src}"), alu(dst.as_str())],
        (true, Order::Subtract) => vec!["neg".to_string(), format!("add a, {dst}")],
    };
    if store {
        body.push(format!("ld {dst}, a"));
    }
    Ok(body)
}

fn shift(ops: &mut Operands<'_>, dst: &str, insn: &str) -> Result<Vec<String>, TranslateError> {
    let dst = ops.resolve(dst)?;
    Ok(vec![
        format!("ld a, {dst}"),
        insn.to_string(),
        format!("ld {dst}, a"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(op: Mnemonic, raw: &[&str]) -> Vec<String> {
        expand(op, raw, &RegisterMap::default()).unwrap().into_lines()
    }

    #[test]
    fn second_memory_operand_uses_de() {
        assert_eq!(
            lines(Mnemonic::Mov, &["byte ptr [16]", "byte ptr [ecx]"]),
            ["ld hl, #0x10", "ld de, b", "ld (hl), (de)"]
        );
    }

    #[test]
    fn memory_source_alone_claims_hl() {
        assert_eq!(
            lines(Mnemonic::Mov, &["eax", "byte ptr [5]"]),
            ["ld hl, #0x5", "ld a, (hl)"]
        );
    }

    #[test]
    fn compare_does_not_store() {
        assert_eq!(lines(Mnemonic::Cmp, &["eax", "3"]), ["ld a, a", "cp #3"]);
        assert_eq!(lines(Mnemonic::Test, &["ecx", "ecx"]), ["ld a, b", "and b"]);
    }

    #[test]
    fn accumulator_source_is_not_overwritten() {
        assert_eq!(lines(Mnemonic::And, &["ecx", "eax"]), ["ld a, a", "and b", "ld b, a"]);
        assert_eq!(lines(Mnemonic::Sub, &["ecx", "eax"]), ["neg", "add a, b", "ld b, a"]);
        assert_eq!(lines(Mnemonic::Cmp, &["ecx", "eax"]), ["neg", "add a, b"]);
        // Both sides in `a`: the plain form is already right.
        assert_eq!(lines(Mnemonic::Sub, &["eax", "eax"]), ["ld a, a", "sub a", "ld a, a"]);
    }

    #[test]
    fn wrong_operand_count_is_an_error() {
        assert_eq!(
            expand(Mnemonic::Mov, &["eax"], &RegisterMap::default()),
            Err(TranslateError::Arity {
                mnemonic: "mov".into(),
                expected: 2,
                found: 1
            })
        );
        assert!(expand::<&str>(Mnemonic::Inc, &[], &RegisterMap::default()).is_err());
    }

    #[test]
    fn failed_operand_yields_nothing() {
        let err = expand(Mnemonic::And, &["byte ptr [7]", "esi"], &RegisterMap::default());
        assert_eq!(err, Err(TranslateError::UnknownRegister { name: "esi".into() }));
    }
}
