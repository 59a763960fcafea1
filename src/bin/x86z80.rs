use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use x86z80_rs::{Listing, Translator, TranslatorConfig, UnknownRegisterPolicy};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Translate Intel-syntax x86 assembly to Z80 assembly, line by line"
)]
struct Opts {
    /// Input assembly file
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Output file (default: INPUT with a .z80 extension, .json for --format json)
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// JSON translator config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Module name for the header (default: input file stem)
    #[arg(long)]
    module: Option<String>,
    /// Do not echo source lines as comments
    #[arg(long)]
    no_annotate: bool,
    /// Pass unmapped register names through instead of failing the line
    #[arg(long)]
    lenient_registers: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Exit with an error if any line failed to translate
    #[arg(long)]
    deny_errors: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn default_out(input: &Path, format: OutputFormat) -> PathBuf {
    match format {
        OutputFormat::Text => input.with_extension("z80"),
        OutputFormat::Json => input.with_extension("json"),
    }
}

fn module_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "main".to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let mut cfg = match &opts.config {
        Some(path) => TranslatorConfig::from_json_file(path)?,
        None => TranslatorConfig::default(),
    };
    if opts.no_annotate {
        cfg.annotate = false;
    }
    if opts.lenient_registers {
        cfg.unknown_registers = UnknownRegisterPolicy::Passthrough;
    }

    tracing::info!(path = %opts.input.display(), "opening for reading");
    let source = std::fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;

    let module = opts.module.clone().unwrap_or_else(|| module_name(&opts.input));
    let translator = Translator::new(cfg)?;
    let listing = Listing::translate(&translator, &module, &source);

    let text = match opts.format {
        OutputFormat::Text => listing.render(),
        OutputFormat::Json => serde_json::to_string_pretty(&listing)?,
    };

    let out = opts.out.clone().unwrap_or_else(|| default_out(&opts.input, opts.format));
    tracing::info!(path = %out.display(), "opening for writing");
    std::fs::write(&out, text).with_context(|| format!("writing {}", out.display()))?;

    let errors = listing.error_count();
    if errors > 0 {
        for l in listing.errors() {
            if let Some(err) = &l.error {
                eprintln!("line {}: {err}", l.number);
            }
        }
        anyhow::ensure!(!opts.deny_errors, "{errors} line(s) failed to translate");
    }
    Ok(())
}
