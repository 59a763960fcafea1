use crate::error::TranslateError;

/// Assembler bookkeeping with no Z80 counterpart.
const SUPPRESSED: &[&str] = &[
    ".intel_syntax",
    ".file",
    ".p2align",
    ".cfi_startproc",
    ".cfi_endproc",
    ".type",
    ".size",
    ".ident",
    ".section",
    ".addrsig",
];

/// Data directives the target assembler accepts unchanged.
const PASSTHROUGH: &[&str] = &[".byte", ".ascii", ".asciz"];

/// Translate one directive to target text (possibly empty). `name` is
/// lower-case with its leading dot.
pub fn translate_directive(
    name: &str,
    params: &[String],
    indent: &str,
) -> Result<String, TranslateError> {
    if SUPPRESSED.contains(&name) {
        return Ok(String::new());
    }
    let area = match name {
        ".text" => Some("_CODE"),
        ".data" => Some("_DATA"),
        ".bss" => Some("_BSS"),
        _ => None,
    };
    if let Some(area) = area {
        return Ok(format!("{indent}.area\t{area}\n"));
    }
    if name == ".globl" {
        if params.len() != 1 {
            return Err(TranslateError::DirectiveParams {
                name: name.to_string(),
                expected: 1,
                found: params.len(),
            });
        }
        return Ok(format!("{indent}{name}\t{}\n", params[0]));
    }
    if PASSTHROUGH.contains(&name) {
        return Ok(format!("{indent}{name}\t{}\n", params.join(", ")));
    }
    Err(TranslateError::UnsupportedDirective {
        name: name.to_string(),
    })
}
