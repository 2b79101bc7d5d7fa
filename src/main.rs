//! LSP Message Format CLI
//!
//! Usage:
//!   lsp-message-format [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <PATTERN>  Pattern to render each message with
//!   -c, --config <FILE>     Config file (TOML format)
//!   -k, --keep-going        Skip messages that fail instead of stopping
//!   -v, --verbose           Raise log verbosity (repeatable)
//!   -h, --help              Print help

use std::fs;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use lsp_message_format::{Config, Message, Renderer, TemplateCompiler};

#[derive(Parser)]
#[command(name = "lsp-message-format")]
#[command(about = "Render Language Server Protocol messages through format patterns")]
struct Cli {
    /// Input file with one JSON message per line (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Pattern to render each message with, e.g. "{.method}: {.params|json-compact}"
    #[arg(short, long)]
    format: Option<String>,

    /// Config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log and skip messages that fail to parse or render
    #[arg(short, long)]
    keep_going: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let Some(pattern) = cli.format.clone().or_else(|| config.pattern.clone()) else {
        eprintln!("Error: no pattern given; pass --format or set `pattern` in a config file");
        return ExitCode::FAILURE;
    };

    // Compile once, render many
    let registry = config.registry();
    let template = match TemplateCompiler::new(&registry).compile(&pattern) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e.report(&pattern, "pattern"));
            return ExitCode::FAILURE;
        }
    };

    // Read input
    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => match fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let source = cli.input.as_deref().unwrap_or(Path::new("<stdin>"));
    let renderer = Renderer::new();
    let mut stdout = io::stdout().lock();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading '{}': {}", source.display(), e);
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let rendered = serde_json::from_str::<Message>(&line)
            .map_err(|e| format!("invalid JSON: {}", e))
            .and_then(|message| renderer.render(&template, &message).map_err(|e| e.to_string()));

        match rendered {
            Ok(text) => {
                if writeln!(stdout, "{}", text).is_err() {
                    // Downstream closed the pipe
                    return ExitCode::SUCCESS;
                }
            }
            Err(e) if cli.keep_going => {
                warn!(line = line_no, error = %e, "skipping message");
            }
            Err(e) => {
                eprintln!("Error at {}:{}: {}", source.display(), line_no, e);
                return ExitCode::FAILURE;
            }
        }
    }

    debug!(
        selectors = renderer.resolver().selectors().len(),
        "finished rendering"
    );
    ExitCode::SUCCESS
}
