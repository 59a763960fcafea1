use pretty_assertions::assert_eq;
use x86z80_rs::{Listing, TranslateError, Translator, TranslatorConfig, UnknownRegisterPolicy};

const GAME: &str = include_str!("data/game.asm");

fn bare() -> TranslatorConfig {
    TranslatorConfig {
        annotate: false,
        module_header: false,
        ..TranslatorConfig::default()
    }
}

#[test]
fn clang_output_translates_cleanly() {
    let listing = Listing::translate(&Translator::new(bare()).unwrap(), "game", GAME);
    assert_eq!(listing.error_count(), 0);
    assert_eq!(
        listing.render(),
        "\t.area\t_CODE\n\
         \t.globl\tmain\n\
         main:\n\
         \tld hl, #0x0\n\
         \tld a, (hl)\n\
         \tld b, #1\n\
         \tld a, a\n\
         \tand b\n\
         \tld b, a\n\
         \tld hl, #0x5800\n\
         \tld (hl), #56\n\
         .LBB0_1:\n\
         \tld hl, #0x5801\n\
         \tinc (hl)\n\
         \tld a, a\n\
         \tsla a\n\
         \tld a, a\n\
         \tld a, a\n\
         \tcp #0\n\
         \tjp nz, .LBB0_1\n\
         \tjp .LBB0_1\n\
         .Lfunc_end0:\n"
    );
}

#[test]
fn annotated_output_marks_errors_and_continues() {
    let src = "foo:\n\tmov\tebx, 1\n\tinc\teax\n";
    let listing = Listing::translate(&Translator::default(), "demo", src);
    assert_eq!(listing.error_count(), 1);
    assert_eq!(
        listing.render(),
        "\t.module demo\n\
         ;; 1: foo:\n\
         foo:\n\
         ;; 2: \tmov\tebx, 1\n\
         ;; ERROR: no target mapping for register \"ebx\"\n\
         ;; 3: \tinc\teax\n\
         \tinc a\n"
    );
    let failed: Vec<usize> = listing.errors().map(|l| l.number).collect();
    assert_eq!(failed, vec![2]);
}

#[test]
fn passthrough_policy_keeps_unmapped_names() {
    let cfg = TranslatorConfig {
        unknown_registers: UnknownRegisterPolicy::Passthrough,
        ..bare()
    };
    let listing = Listing::translate(&Translator::new(cfg).unwrap(), "demo", "mov ebx, 1\n");
    assert_eq!(listing.error_count(), 0);
    assert_eq!(listing.render(), "\tld ebx, #1\n");
}

#[test]
fn config_registers_extend_the_table() {
    let cfg = TranslatorConfig::from_json_str(
        r#"{ "annotate": false, "module_header": false, "registers": { "ebx": "ixl" } }"#,
    )
    .unwrap();
    let listing = Listing::translate(&Translator::new(cfg).unwrap(), "demo", "mov ebx, 1\n");
    assert_eq!(listing.render(), "\tld ixl, #1\n");
}

#[test]
fn addressing_register_mapping_is_refused() {
    assert!(TranslatorConfig::from_json_str(r#"{ "registers": { "ebx": "l" } }"#).is_err());

    let mut cfg = bare();
    cfg.registers.insert("ebx".into(), "h".into());
    assert!(Translator::new(cfg).is_err());
}

#[test]
fn json_report_carries_errors() {
    let listing = Listing::translate(&Translator::default(), "demo", "bogus eax\n");
    let json: serde_json::Value = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["module"], "demo");
    assert_eq!(json["lines"][0]["number"], 1);
    assert!(json["lines"][0]["error"]["UnsupportedMnemonic"].is_object());
    assert_eq!(
        listing.lines[0].error,
        Some(TranslateError::UnsupportedMnemonic {
            mnemonic: "bogus".into(),
            operands: 1
        })
    );
}
