//!
//! litpool CLI - Inspect the literal pool of script files
//!
//! Commands:
//! - litpool dump <file>: scan a file and print its deduplicated literals
//! - litpool check [path]: scan files or directories and report problems
//! - litpool catalog: list the well-known string catalog
//! - litpool eq <a> <b>: compare two literals by value
//!

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use litpool::catalog::MagicStringId;
use litpool::config::ReportFormat;
use litpool::pool::PoolStats;
use litpool::scanner::TokenKind;
use litpool::{scan, Config, DiagnosticReporter, Literal, LiteralPool, PoolEntry, SourceFile};

#[derive(Parser)]
#[command(name = "litpool")]
#[command(author, version, about = "Literal pool inspector", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the deduplicated literal pool of a file
    Dump {
        /// The file to scan
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Scan files and report literal errors
    Check {
        /// File or directory to check
        path: Option<PathBuf>,
    },

    /// List the well-known string catalog
    Catalog,

    /// Compare two literals; quoted arguments are strings
    Eq {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,

        /// Require the same representation kind as well
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Serialize)]
struct DumpReport<'a> {
    file: &'a str,
    stats: PoolStats,
    entries: Vec<PoolEntry>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Dump { file, json } => {
            dump_file(&file, json);
        }
        Commands::Check { path } => {
            check_path(path.as_deref());
        }
        Commands::Catalog => {
            print_catalog();
        }
        Commands::Eq { a, b, strict } => {
            compare(&a, &b, strict);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn load_config(path: &Path) -> Config {
    match Config::discover(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> SourceFile {
    match std::fs::read_to_string(path) {
        Ok(text) => SourceFile::new(path.display().to_string(), text),
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    }
}

fn dump_file(file: &Path, json: bool) {
    let config = load_config(file);
    let source_file = read_source(file);

    let result = scan(&source_file.source);
    if !result.errors.is_empty() {
        let reporter = DiagnosticReporter::new(&source_file);
        reporter.report_scan_errors(&result.errors);
    }

    let mut pool = LiteralPool::with_capacity(result.tokens.len());
    result.intern_into(&mut pool, config.scan.identifiers);

    let format = if json { ReportFormat::Json } else { config.report.format };
    let entries = pool.entries();

    match format {
        ReportFormat::Text => {
            for entry in &entries {
                println!("{:>4}  {:<6}  {}", entry.index, entry.kind, entry.text);
            }
            let stats = pool.stats();
            println!(
                "{} entries from {} literals ({} duplicates)",
                entries.len(),
                stats.interned,
                stats.hits
            );
        }
        ReportFormat::Json => {
            let report = DumpReport {
                file: &source_file.name,
                stats: pool.stats(),
                entries,
            };
            match serde_json::to_string_pretty(&report) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error writing report: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    if !result.errors.is_empty() {
        std::process::exit(1);
    }
}

fn check_path(path: Option<&Path>) {
    let path = path.unwrap_or(Path::new("."));

    if path.is_file() {
        if !check_file(path, &load_config(path)) {
            std::process::exit(1);
        }
    } else if path.is_dir() {
        check_directory(path);
    } else {
        eprintln!("Error: {} does not exist", path.display());
        std::process::exit(1);
    }
}

/// Returns false if the file had scan errors.
fn check_file(path: &Path, config: &Config) -> bool {
    let source_file = read_source(path);
    let result = scan(&source_file.source);

    if !result.errors.is_empty() {
        let reporter = DiagnosticReporter::new(&source_file);
        reporter.report_scan_errors(&result.errors);
        return false;
    }

    let mut pool = LiteralPool::with_capacity(result.tokens.len());
    result.intern_into(&mut pool, config.scan.identifiers);
    info!(file = %source_file.name, entries = pool.len(), "checked");
    println!("{}: {} literals", source_file.name, pool.len());
    true
}

fn check_directory(path: &Path) {
    let config = load_config(path);
    let mut checked = 0;
    let mut errors = 0;

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !config.matches_extension(file_path) {
            debug!(path = %file_path.display(), "skipping");
            continue;
        }

        if !check_file(file_path, &config) {
            errors += 1;
        }
        checked += 1;
    }

    println!("Checked {} files, {} with errors", checked, errors);

    if errors > 0 {
        std::process::exit(1);
    }
}

fn print_catalog() {
    for id in MagicStringId::iter() {
        println!("{:>4}  {:?}", id.index(), id.as_str());
    }
}

/// Quoted arguments are strings. Anything else that scans as a single
/// numeric literal, optionally negated, is a number; the rest are strings.
fn parse_arg(arg: &str) -> Literal<'_> {
    let quoted = arg.len() >= 2
        && ((arg.starts_with('"') && arg.ends_with('"'))
            || (arg.starts_with('\'') && arg.ends_with('\'')));
    if quoted {
        return Literal::from_text(&arg[1..arg.len() - 1]);
    }
    match scan_number(arg) {
        Some(num) => Literal::from_number(num),
        None => Literal::from_text(arg),
    }
}

fn scan_number(arg: &str) -> Option<f64> {
    let (negative, digits) = match arg.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, arg),
    };
    let result = scan(digits);
    if !result.errors.is_empty() {
        return None;
    }
    match result.tokens.as_slice() {
        [token] if token.text.len() == digits.len() => match token.kind {
            TokenKind::Number(num) if negative => Some(-num),
            TokenKind::Number(num) => Some(num),
            _ => None,
        },
        _ => None,
    }
}

fn compare(a: &str, b: &str, strict: bool) {
    let left = parse_arg(a);
    let right = parse_arg(b);
    let equal = if strict { left.equals_type(&right) } else { left.equals(&right) };

    println!(
        "{} ({}) {} {} ({})",
        left,
        left.kind(),
        if equal { "==" } else { "!=" },
        right,
        right.kind()
    );
}
