//! Spec Catalog CLI
//!
//! Command-line interface for importing interface descriptions into a
//! unified operation catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use spec_catalog_common::{ImportConfig, ParsedSpecification, SpecificationKind};
use spec_catalog_parser::{detect_format, SpecFile, SpecificationParsingService, KNOWN_EXTENSIONS};
use spec_catalog_report::CatalogRenderer;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "spec-catalog")]
#[command(version, about = "Import API descriptions into one operation catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Import configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the kind each file would be parsed as
    Detect {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Parse a single file and display its operations
    #[command(after_help = "EXAMPLES:\n  \
        # Auto-detect the format from the extension\n  \
        spec-catalog parse petstore.yaml\n\n  \
        # Parse an AsyncAPI document (YAML/JSON is treated as OpenAPI otherwise)\n  \
        spec-catalog parse events.yaml --format asyncapi\n\n  \
        # Print the full catalog entry as JSON\n  \
        spec-catalog parse greeter.proto --json")]
    Parse {
        /// Path to the spec file
        spec: PathBuf,

        /// Spec kind (auto-detected if not specified): http, asyncapi, graphql, grpc, soap
        #[arg(short, long)]
        format: Option<SpecificationKind>,

        /// Print the parsed specification as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse many files, isolating failures per file
    #[command(after_help = "EXAMPLES:\n  \
        # Import a list of files\n  \
        spec-catalog import --files petstore.yaml,greeter.proto\n\n  \
        # Scan a directory and write a Markdown catalog\n  \
        spec-catalog import --spec-dir ./apis --report catalog.md")]
    Import {
        /// Comma-separated list of spec file paths
        #[arg(long, value_delimiter = ',', conflicts_with = "spec_dir")]
        files: Option<Vec<PathBuf>>,

        /// Directory containing spec files (alternative to --files)
        #[arg(long, conflicts_with = "files")]
        spec_dir: Option<PathBuf>,

        /// Print all parsed specifications as a JSON array
        #[arg(long)]
        json: bool,

        /// Write a Markdown catalog to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ImportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ImportConfig::default(),
    };
    debug!(?config, "loaded import configuration");

    match cli.command {
        Commands::Detect { files } => detect_command(&files),
        Commands::Parse { spec, format, json } => {
            parse_command(&spec, format, json, config, cli.verbose)
        }
        Commands::Import {
            files,
            spec_dir,
            json,
            report,
        } => import_command(ImportOptions {
            files: files.as_deref(),
            spec_dir: spec_dir.as_deref(),
            json,
            report: report.as_deref(),
            config,
            verbose: cli.verbose,
        }),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn detect_command(files: &[PathBuf]) -> Result<()> {
    for path in files {
        let name = file_name(path);
        println!("{} {}", format!("{:<8}", detect_format(&name)).yellow(), path.display());
    }
    Ok(())
}

fn parse_command(
    spec_path: &Path,
    format: Option<SpecificationKind>,
    json: bool,
    config: ImportConfig,
    verbose: bool,
) -> Result<()> {
    let file = SpecFile::from_path(spec_path)
        .with_context(|| format!("Failed to read {}", spec_path.display()))?;

    let kind = format.unwrap_or_else(|| {
        let detected = detect_format(file.name());
        if !json {
            println!(
                "{} Auto-detected format: {}",
                "→".cyan(),
                detected.to_string().yellow()
            );
        }
        detected
    });

    let service = SpecificationParsingService::new(config);
    let spec = service.parse_one_as(&file, kind);

    if json {
        let rendered =
            serde_json::to_string_pretty(&spec).context("Failed to serialize specification")?;
        println!("{}", rendered);
        return Ok(());
    }

    print_specification(&spec, verbose);
    Ok(())
}

struct ImportOptions<'a> {
    files: Option<&'a [PathBuf]>,
    spec_dir: Option<&'a Path>,
    json: bool,
    report: Option<&'a Path>,
    config: ImportConfig,
    verbose: bool,
}

fn import_command(options: ImportOptions) -> Result<()> {
    let paths: Vec<PathBuf> = if let Some(dir) = options.spec_dir {
        if !options.json {
            println!(
                "{} Scanning directory for specs: {}",
                "→".cyan(),
                dir.display()
            );
        }
        discover_specs(dir)?
    } else if let Some(paths) = options.files {
        paths.to_vec()
    } else {
        anyhow::bail!("Either --files or --spec-dir must be provided");
    };

    if paths.is_empty() {
        anyhow::bail!("No spec files found");
    }

    // Unreadable files become error entries so they keep their slot in the batch
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        match SpecFile::from_path(path) {
            Ok(file) => files.push(file),
            Err(err) => {
                let spec = ParsedSpecification::failed(file_stem(path), err.to_string());
                unreadable.push((index, spec));
            }
        }
    }

    let service = SpecificationParsingService::new(options.config);
    let mut specs = service.parse_many(&files);
    for (index, spec) in unreadable {
        specs.insert(index, spec);
    }

    if options.json {
        let rendered =
            serde_json::to_string_pretty(&specs).context("Failed to serialize specifications")?;
        println!("{}", rendered);
    } else {
        for (path, spec) in paths.iter().zip(&specs) {
            print_import_status(path, spec, options.verbose);
        }

        let failed = specs.iter().filter(|s| s.is_failed()).count();
        let operations: usize = specs.iter().map(|s| s.operations.len()).sum();
        println!(
            "\n{} Imported {} specs ({} operations), {} failed",
            if failed == 0 { "✓".green() } else { "!".yellow() },
            specs.len() - failed,
            operations,
            failed
        );
    }

    if let Some(report) = options.report {
        CatalogRenderer::new()
            .context("Failed to load report templates")?
            .write_markdown(&specs, report)
            .with_context(|| format!("Failed to write report {}", report.display()))?;
        if !options.json {
            println!("{} Wrote catalog to {}", "✓".green(), report.display());
        }
    }

    Ok(())
}

fn print_specification(spec: &ParsedSpecification, verbose: bool) {
    if spec.is_failed() {
        println!("\n{}", "✗ Parse failed".red().bold());
        for error in &spec.errors {
            println!("  {}", error.red());
        }
        return;
    }

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Specification:".bold());
    println!("  Name: {}", spec.name.yellow());
    println!("  Kind: {}", spec.kind);
    if let Some(version) = &spec.version {
        println!("  Version: {}", version.yellow());
    }
    println!("  Operations: {}", spec.operations.len());

    println!("\n{}", "Operations:".bold());
    for op in &spec.operations {
        let mut line = format!(
            "  • {} {}",
            format!("{:<12}", op.method).cyan(),
            op.path.as_deref().unwrap_or(&op.name)
        );
        if let Some(shape) = op.call_shape {
            line.push_str(&format!(" [{}]", shape.as_str()));
        }
        println!("{}", line);

        if verbose {
            println!("      id: {}", op.id);
            if !op.parameters.is_empty() {
                let params: Vec<String> = op
                    .parameters
                    .iter()
                    .map(|p| format!("{}:{}", p.name, p.location.as_str()))
                    .collect();
                println!("      params: {}", params.join(", "));
            }
            if let Some(schemas) = &op.response_schemas {
                let keys: Vec<&str> = schemas.keys().map(String::as_str).collect();
                println!("      schemas: {}", keys.join(", "));
            }
        }
    }
}

fn print_import_status(path: &Path, spec: &ParsedSpecification, verbose: bool) {
    if spec.is_failed() {
        println!("{} {}", "✗".red(), path.display());
        for error in &spec.errors {
            println!("    {}", error.red());
        }
        return;
    }

    println!(
        "{} {} ({}, {} operations)",
        "✓".green(),
        path.display(),
        spec.kind.to_string().yellow(),
        spec.operations.len()
    );
    if verbose {
        for op in &spec.operations {
            println!("    {} {}", op.method.cyan(), op.id);
        }
    }
}

/// Discover spec files in a directory, recursively, in a stable order
fn discover_specs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let mut specs = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_spec = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| KNOWN_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_spec {
            specs.push(entry.into_path());
        }
    }

    Ok(specs)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .map(String::from)
        .unwrap_or_else(|| path.display().to_string())
}
