use serde::Serialize;

/// Every source instruction the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mnemonic {
    Mov,
    And,
    Or,
    Xor,
    Add,
    Sub,
    Cmp,
    Test,
    Inc,
    Dec,
    Shl,
    Shr,
    Sar,
    Jmp,
    Je,
    Jne,
    Call,
    Ret,
    Nop,
}

impl Mnemonic {
    /// Canonical lower-case source name.
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Cmp => "cmp",
            Mnemonic::Test => "test",
            Mnemonic::Inc => "inc",
            Mnemonic::Dec => "dec",
            Mnemonic::Shl => "shl",
            Mnemonic::Shr => "shr",
            Mnemonic::Sar => "sar",
            Mnemonic::Jmp => "jmp",
            Mnemonic::Je => "je",
            Mnemonic::Jne => "jne",
            Mnemonic::Call => "call",
            Mnemonic::Ret => "ret",
            Mnemonic::Nop => "nop",
        }
    }

    /// Number of operands the source instruction takes.
    pub fn arity(self) -> usize {
        match self {
            Mnemonic::Mov
            | Mnemonic::And
            | Mnemonic::Or
            | Mnemonic::Xor
            | Mnemonic::Add
            | Mnemonic::Sub
            | Mnemonic::Cmp
            | Mnemonic::Test => 2,
            Mnemonic::Inc
            | Mnemonic::Dec
            | Mnemonic::Shl
            | Mnemonic::Shr
            | Mnemonic::Sar
            | Mnemonic::Jmp
            | Mnemonic::Je
            | Mnemonic::Jne
            | Mnemonic::Call => 1,
            Mnemonic::Ret | Mnemonic::Nop => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Mnemonic,
    pub mnemonic: &'static str,
}

/// Source mnemonic -> instruction. Lookup is by exact lower-case name;
/// aliases are separate rows sharing an `op`.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Mnemonic::Mov,
        mnemonic: "mov",
    },
    InstrDesc {
        op: Mnemonic::And,
        mnemonic: "and",
    },
    InstrDesc {
        op: Mnemonic::Or,
        mnemonic: "or",
    },
    InstrDesc {
        op: Mnemonic::Xor,
        mnemonic: "xor",
    },
    InstrDesc {
        op: Mnemonic::Add,
        mnemonic: "add",
    },
    InstrDesc {
        op: Mnemonic::Sub,
        mnemonic: "sub",
    },
    InstrDesc {
        op: Mnemonic::Cmp,
        mnemonic: "cmp",
    },
    InstrDesc {
        op: Mnemonic::Test,
        mnemonic: "test",
    },
    InstrDesc {
        op: Mnemonic::Inc,
        mnemonic: "inc",
    },
    InstrDesc {
        op: Mnemonic::Dec,
        mnemonic: "dec",
    },
    InstrDesc {
        op: Mnemonic::Shl,
        mnemonic: "shl",
    },
    InstrDesc {
        op: Mnemonic::Shl,
        mnemonic: "sal",
    },
    InstrDesc {
        op: Mnemonic::Shr,
        mnemonic: "shr",
    },
    InstrDesc {
        op: Mnemonic::Sar,
        mnemonic: "sar",
    },
    InstrDesc {
        op: Mnemonic::Jmp,
        mnemonic: "jmp",
    },
    InstrDesc {
        op: Mnemonic::Je,
        mnemonic: "je",
    },
    InstrDesc {
        op: Mnemonic::Je,
        mnemonic: "jz",
    },
    InstrDesc {
        op: Mnemonic::Jne,
        mnemonic: "jne",
    },
    InstrDesc {
        op: Mnemonic::Jne,
        mnemonic: "jnz",
    },
    InstrDesc {
        op: Mnemonic::Call,
        mnemonic: "call",
    },
    InstrDesc {
        op: Mnemonic::Ret,
        mnemonic: "ret",
    },
    InstrDesc {
        op: Mnemonic::Nop,
        mnemonic: "nop",
    },
];

pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}
