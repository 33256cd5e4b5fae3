use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use wnd_core::parser::parse_file_with_config;
use wnd_core::{serialize, Diagnostic, ParserConfig, WndError};

#[derive(Parser)]
#[clap(author, version, about = "Validate WND window definition files")]
struct Args {
    /// Files to check
    #[clap(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// YAML parser settings
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Rewrite each valid file in canonical form
    #[clap(short, long)]
    format: bool,

    /// Log parser progress
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => match ParserConfig::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ {}", e);
                process::exit(2);
            }
        },
        None => ParserConfig::default(),
    };

    let mut exit_code = 0;
    for path in &args.files {
        match check_file(path, &config, args.format) {
            Ok(warnings) => {
                println!("✓ {} is valid", path.display());
                for warning in &warnings {
                    print_diagnostic(warning);
                }
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", path.display());
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn check_file(path: &Path, config: &ParserConfig, rewrite: bool) -> Result<Vec<Diagnostic>, WndError> {
    let parsed = parse_file_with_config(path, config)?;
    if rewrite {
        fs::write(path, serialize(&parsed.value)).map_err(|e| WndError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("rewrote {}", path.display());
    }
    Ok(parsed.diagnostics)
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.line {
        Some(line) => eprintln!("  [{}] line {}: {}", diagnostic.severity, line, diagnostic.message),
        None => eprintln!("  [{}] {}", diagnostic.severity, diagnostic.message),
    }
}

fn print_error(error: &WndError) {
    match error {
        WndError::Format {
            line,
            raw_text,
            message,
            ..
        } => {
            eprintln!("  Format error at line {}:", line);
            eprintln!("    {}", message);
            eprintln!("    > {}", raw_text);
        }
        WndError::Value {
            line,
            raw_text,
            message,
            ..
        } => {
            eprintln!("  Invalid value at line {} ({}):", line, error.severity());
            eprintln!("    {}", message);
            eprintln!("    > {}", raw_text);
        }
        WndError::Io { reason, .. } => {
            eprintln!("  Could not read file:");
            eprintln!("    {}", reason);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
