//! Cardcat CLI - recognize and regenerate catalog paths
//!
//! # Commands
//!
//! ```bash
//! cardcat parse "S/Said, Edward/Orientalism.pdf"          # Path -> JSON entry
//! cardcat format -a "Edward Said" -t Orientalism -f o.pdf --to flat
//! cardcat scan ~/Library                                   # Recognize a whole library
//! cardcat migrate ~/Library --to calibre                   # Plan a layout change (dry run)
//! cardcat formats                                          # List formats
//! ```

use cardcat::{
    error::CardcatResult, plan_migration, scan_dir, CardcatError, EngineConfig, FormatTag,
    PathEngine,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardcat")]
#[command(about = "Parse and regenerate digital-library catalog paths", long_about = None)]
struct Cli {
    /// Engine config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log recognizer decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize one or more paths and print the entries as JSON
    Parse {
        /// Paths to recognize
        #[arg(required = true)]
        paths: Vec<String>,

        /// Only try this format (auto-detect if not specified)
        #[arg(long)]
        format: Option<FormatTag>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a path (or OPF export object) from metadata
    Format {
        /// Author name, repeat for several ("Said, Edward", "BAVO (eds.)")
        #[arg(short, long = "author", required = true)]
        authors: Vec<String>,

        /// Title
        #[arg(short, long)]
        title: String,

        /// Original filename (its extension is kept)
        #[arg(short, long)]
        file: String,

        /// Target format
        #[arg(long)]
        to: FormatTag,
    },

    /// Recognize every file under a library root
    Scan {
        /// Library root directory
        root: PathBuf,

        /// Only try this format (auto-detect if not specified)
        #[arg(long)]
        format: Option<FormatTag>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Plan moving a library into another layout (nothing is moved)
    Migrate {
        /// Library root directory
        root: PathBuf,

        /// Target format
        #[arg(long)]
        to: FormatTag,

        /// Only read entries in this format (auto-detect if not specified)
        #[arg(long)]
        from: Option<FormatTag>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List formats in auto-detect order
    Formats,
}

fn main() {
    // Load .env file (if present) so RUST_LOG can live there
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_engine(cli.config.as_deref()).and_then(|engine| match cli.command {
        Commands::Parse {
            paths,
            format,
            output,
        } => cmd_parse(&engine, &paths, format, output.as_deref()),

        Commands::Format {
            authors,
            title,
            file,
            to,
        } => cmd_format(&engine, &authors, &title, &file, to),

        Commands::Scan {
            root,
            format,
            output,
        } => cmd_scan(&engine, &root, format, output.as_deref()),

        Commands::Migrate {
            root,
            to,
            from,
            output,
        } => cmd_migrate(&engine, &root, to, from, output.as_deref()),

        Commands::Formats => cmd_formats(&engine),
    });

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_engine(config: Option<&Path>) -> CardcatResult<PathEngine> {
    let config = match config {
        Some(path) => {
            eprintln!("⚙️  Config: {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(PathEngine::with_config(&config))
}

fn cmd_parse(
    engine: &PathEngine,
    paths: &[String],
    format: Option<FormatTag>,
    output: Option<&Path>,
) -> CardcatResult<()> {
    let mut entries = Vec::new();
    let mut missed = 0;

    for path in paths {
        let found = match format {
            Some(tag) => engine.recognize_as(path, tag),
            None => engine.detect(path),
        };
        match found {
            Some(entry) => entries.push(entry),
            None => {
                missed += 1;
                eprintln!("   ✗ Not recognized: {}", path);
            }
        }
    }

    eprintln!("✅ Recognized {} of {} paths", entries.len(), paths.len());
    write_json(&entries, output)?;

    if entries.is_empty() && missed > 0 {
        return Err(CardcatError::NoMatch(format!("{} path(s) not recognized", missed)));
    }
    Ok(())
}

fn cmd_format(
    engine: &PathEngine,
    authors: &[String],
    title: &str,
    file: &str,
    to: FormatTag,
) -> CardcatResult<()> {
    let names = engine.names().parse_names(authors);
    let formatted = engine
        .format_names(&names, title, file, to)
        .ok_or_else(|| CardcatError::NoMatch(format!("cannot express these authors in {}", to)))?;

    match formatted.as_path() {
        Some(path) => println!("{}", path),
        None => println!("{}", serde_json::to_string_pretty(&formatted)?),
    }
    Ok(())
}

fn cmd_scan(
    engine: &PathEngine,
    root: &Path,
    format: Option<FormatTag>,
    output: Option<&Path>,
) -> CardcatResult<()> {
    eprintln!("📚 Scanning: {}", root.display());

    let report = scan_dir(engine, root, format)?;

    eprintln!("   Files: {}", report.files_seen);
    eprintln!("   Ignored: {}", report.ignored);
    for (tag, count) in report.counts() {
        eprintln!("   {}: {}", tag, count);
    }
    if !report.unrecognized.is_empty() {
        eprintln!("\n⚠️  Unrecognized: {}", report.unrecognized.len());
        for path in report.unrecognized.iter().take(5) {
            eprintln!("   - {}", path);
        }
    }

    write_json(&report, output)
}

fn cmd_migrate(
    engine: &PathEngine,
    root: &Path,
    to: FormatTag,
    from: Option<FormatTag>,
    output: Option<&Path>,
) -> CardcatResult<()> {
    eprintln!("📚 Scanning: {}", root.display());
    let report = scan_dir(engine, root, from)?;
    eprintln!("   Recognized: {} entries", report.entries.len());

    let plan = plan_migration(engine, &report, to);
    let changes = plan.changes().count();
    eprintln!(
        "\n📦 Plan to {}: {} change(s), {} already in place",
        to,
        changes,
        plan.steps.len() - changes
    );
    if !plan.skipped.is_empty() {
        eprintln!("   ⚠️  Skipped: {}", plan.skipped.len());
    }

    write_json(&plan, output)
}

fn cmd_formats(engine: &PathEngine) -> CardcatResult<()> {
    println!("Formats in auto-detect order:");
    for format in engine.registry().in_priority_order() {
        let note = match format.tag() {
            FormatTag::Calibre => "Authors/Title/file",
            FormatTag::Flat => "Last, First; Last, First - Title.ext",
            FormatTag::Oml => "L/Last, First; Last, First/Title (Publisher Year).ext",
            FormatTag::Opf => "export object only, never matches a path",
        };
        println!("  {:<8} {}", format.tag(), note);
    }
    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> CardcatResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(p) => {
            fs::write(p, json)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flags_parse_tags() {
        let cli =
            Cli::try_parse_from(["cardcat", "parse", "a/b/c.pdf", "--format", "OML"]).unwrap();
        match cli.command {
            Commands::Parse { format, .. } => assert_eq!(format, Some(FormatTag::Oml)),
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["cardcat", "migrate", "lib", "--to", "dewey"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown catalog format: 'dewey'"));
    }
}
