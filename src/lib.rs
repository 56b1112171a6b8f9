//! Annoschema: a stable wire schema for perception dataset annotations.
//!
//! Annotation records (2D/3D boxes, key points, key lines, polygons) are
//! produced once by an annotation pipeline and read many times by
//! downstream consumers, possibly in other languages. This crate pins
//! down their binary layout, round-trips it losslessly, and checks the
//! semantic invariants the layout cannot express.
//!
//! # Modules
//!
//! - [`schema`]: Message types (annotations, collections, geometry, enum)
//! - [`codec`]: Binary and JSON encode/decode
//! - [`validation`]: Semantic validation and violation reports
//! - [`registry`]: Annotation type code to directory name mapping
//! - [`error`]: Error types for annoschema operations

pub mod codec;
pub mod error;
pub mod registry;
pub mod schema;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::debug;

pub use error::SchemaError;

use codec::AnyCollection;
use schema::AnnotationType;

/// The annoschema CLI application.
#[derive(Parser)]
#[command(name = "annoschema")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate an annotation collection file.
    Validate(ValidateArgs),
    /// Convert a collection file between binary and JSON encodings.
    Convert(ConvertArgs),
    /// List the registered annotation types.
    Types,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Collection file to validate (`.json` for JSON, anything else binary).
    input: PathBuf,

    /// Annotation type directory name (e.g. 'bounding_box_3d'). Defaults to
    /// the name of the input's parent directory.
    #[arg(long)]
    kind: Option<String>,

    /// Size of the class vocabulary; class ids must be below it.
    #[arg(long, env = "ANNOSCHEMA_NUM_CLASSES")]
    num_classes: Option<u32>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Collection file to read.
    input: PathBuf,

    /// File to write; its extension picks the encoding.
    output: PathBuf,

    /// Annotation type directory name. Defaults to the name of the input's
    /// parent directory.
    #[arg(long)]
    kind: Option<String>,
}

/// Run the annoschema CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), SchemaError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Types) => {
            run_types();
            Ok(())
        }
        None => {
            println!("annoschema {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Wire schema, codec and validator for perception dataset annotations.");
            println!();
            println!("Run 'annoschema --help' for usage information.");
            Ok(())
        }
    }
}

/// Resolves the annotation kind from `--kind` or the input's directory.
fn resolve_kind(kind: Option<&str>, input: &Path) -> Result<AnnotationType, SchemaError> {
    let name = match kind {
        Some(name) => name,
        None => input
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or(""),
    };
    let kind = registry::code_for(name)?;
    debug!("resolved annotation type '{}' (code {})", kind, kind.code());
    if !kind.has_collection() {
        return Err(SchemaError::UnsupportedKind(name.to_string()));
    }
    Ok(kind)
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), SchemaError> {
    if !matches!(args.output.as_str(), "text" | "json") {
        return Err(SchemaError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            args.output
        )));
    }

    let kind = resolve_kind(args.kind.as_deref(), &args.input)?;
    let collection = AnyCollection::read(kind, &args.input)?;

    let opts = validation::ValidateOptions {
        num_classes: args.num_classes,
        strict: args.strict,
    };
    let report = collection.validate(&opts);

    match args.output.as_str() {
        "json" => {
            let summary = serde_json::json!({
                "kind": kind.directory_name(),
                "annotation_count": collection.len(),
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            print!("{}", report);
        }
    }

    if report.passes(opts.strict) {
        Ok(())
    } else {
        Err(SchemaError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), SchemaError> {
    let kind = resolve_kind(args.kind.as_deref(), &args.input)?;
    let collection = AnyCollection::read(kind, &args.input)?;
    collection.write(&args.output)?;

    println!(
        "Converted {} {} annotation(s): {} -> {}",
        collection.len(),
        kind,
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Execute the types subcommand.
fn run_types() {
    for (kind, name) in registry::entries() {
        let marker = if kind.has_collection() { "*" } else { " " };
        println!("{:>2} {} {}", kind.code(), marker, name);
    }
}
