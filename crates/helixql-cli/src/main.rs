//! HelixQL CLI - Command line interface for the HelixQL front-end

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use walkdir::WalkDir;

use helixql_ast::{Diagnostic, LineIndex, Severity};
use helixql_lexer::Lexer;
use helixql_parser::{parse_with_config, ParseResult, ParserConfig, DEFAULT_MAX_NESTING_DEPTH};

#[derive(Parser)]
#[command(name = "helixql")]
#[command(about = "HelixQL schema and query parser", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH, global = true)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and output the AST as JSON
    Parse {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check files for errors. Directories are searched for `.hx` files.
    Check {
        /// Input files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the token stream of a file
    Tokens {
        /// Input file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = ParserConfig::default().with_max_nesting_depth(cli.max_depth);

    match cli.command {
        Commands::Parse { file, pretty } => cmd_parse(&file, pretty, &config),
        Commands::Check { paths } => cmd_check(&paths, &config),
        Commands::Tokens { file } => cmd_tokens(&file),
    }
}

fn read_source(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            None
        }
    }
}

fn cmd_parse(file: &Path, pretty: bool, config: &ParserConfig) -> ExitCode {
    let Some(source) = read_source(file) else {
        return ExitCode::FAILURE;
    };

    let result = parse_with_config(&source, config);
    report_diagnostics(&source, file, &result.diagnostics);

    let json = if pretty {
        serde_json::to_string_pretty(&result.ast)
    } else {
        serde_json::to_string(&result.ast)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing AST: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_check(paths: &[PathBuf], config: &ParserConfig) -> ExitCode {
    let mut all_ok = true;

    for file in collect_files(paths) {
        let Some(source) = read_source(&file) else {
            all_ok = false;
            continue;
        };

        let result = parse_with_config(&source, config);
        report_diagnostics(&source, &file, &result.diagnostics);
        print_summary(&file, &result);
        all_ok &= !result.has_errors();
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_summary(file: &Path, result: &ParseResult) {
    let errors = result.errors().count();
    if errors == 0 {
        println!(
            "✓ {} - {} schemas, {} queries",
            file.display(),
            result.ast.schemas().count(),
            result.ast.queries().count()
        );
    } else {
        println!("✗ {} - {} errors", file.display(), errors);
    }
}

/// Expand directories into the `.hx` files below them, in path order
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let found = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("hx"))
            .map(|e| e.into_path());
        let before = files.len();
        files.extend(found);
        debug!(dir = %path.display(), files = files.len() - before, "collected sources");
    }
    info!(files = files.len(), "checking");
    files
}

fn cmd_tokens(file: &Path) -> ExitCode {
    let Some(source) = read_source(file) else {
        return ExitCode::FAILURE;
    };

    let lines = LineIndex::new(&source);
    let mut lexer = Lexer::new(&source);
    for token in lexer.by_ref() {
        let (line, col) = lines.line_col(token.span.start);
        println!("{:>4}:{:<3} {:?} {:?}", line, col, token.kind, token.text);
    }

    let diagnostics = lexer.into_diagnostics();
    report_diagnostics(&source, file, &diagnostics);
    if diagnostics.iter().any(Diagnostic::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn report_diagnostics(source: &str, file: &Path, diagnostics: &[Diagnostic]) {
    let name = file.to_string_lossy().to_string();
    for diagnostic in diagnostics {
        if let Err(e) = report_diagnostic(source, &name, diagnostic) {
            eprintln!("{}: {}", name, diagnostic);
            debug!(error = %e, "failed to render report");
        }
    }
}

fn report_diagnostic(source: &str, name: &str, diagnostic: &Diagnostic) -> std::io::Result<()> {
    let (kind, color) = match diagnostic.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
    };
    // ariadne counts characters, spans count bytes
    let start = char_offset(source, diagnostic.span.start);
    let end = char_offset(source, diagnostic.span.end).max(start);

    Report::build(kind, name.to_string(), start)
        .with_code(diagnostic.kind.code())
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((name.to_string(), start..end))
                .with_message(&diagnostic.message)
                .with_color(color),
        )
        .finish()
        .eprint((name.to_string(), Source::from(source)))
}

fn char_offset(source: &str, byte: usize) -> usize {
    let byte = byte.min(source.len());
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte)
        .count()
}
