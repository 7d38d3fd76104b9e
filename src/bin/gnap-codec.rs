//! GNAP Codec CLI
//!
//! Command-line interface for canonicalizing, validating, and generating
//! GNAP records.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gnap_codec::generator::write_files;
use gnap_codec::gnap::RecordType;
use gnap_codec::{generate, load_table, GenerateOptions, ValidateError};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gnap-codec")]
#[command(about = "Encode, decode, and validate GNAP protocol messages")]
#[command(version)]
struct Cli {
    /// Log library diagnostics to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a document and print its canonical encoding
    Canonical {
        /// Document file, or - for stdin
        document: String,

        /// Record type (e.g., GrantRequest, grant_request)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        record_type: RecordType,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Decode a document and check its required fields and rules
    Validate {
        /// Document file, or - for stdin
        document: String,

        /// Record type (e.g., GrantRequest, grant_request)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        record_type: RecordType,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,

        /// Also check the raw document against the type's JSON Schema
        #[arg(long)]
        structural: bool,
    },

    /// Print the JSON Schema of a record type
    Schema {
        /// Record type (e.g., GrantRequest, grant_request)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        record_type: RecordType,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate record sources from a schema table
    Generate {
        /// Schema table file
        table: PathBuf,

        /// Directory to write one file per record into (stdout if not specified)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Skip required-field constructors
        #[arg(long)]
        no_constructors: bool,
    },

    /// Send a grant request and print the grant response
    Grant {
        /// Grant request document, or - for stdin
        document: String,

        /// Grant endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Canonical {
            document,
            record_type,
            pretty,
            output,
        } => run_canonical(&document, record_type, pretty, output.as_deref()),

        Commands::Validate {
            document,
            record_type,
            json,
            structural,
        } => run_validate(&document, record_type, json, structural),

        Commands::Schema {
            record_type,
            pretty,
            output,
        } => write_json(&record_type.json_schema(), pretty, output.as_deref()),

        Commands::Generate {
            table,
            out_dir,
            no_constructors,
        } => run_generate(&table, out_dir.as_deref(), no_constructors),

        Commands::Grant {
            document,
            endpoint,
            pretty,
        } => run_grant(&document, endpoint, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gnap_codec=debug" } else { "gnap_codec=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a document from a file, or from stdin when `source` is `-`.
fn read_document(source: &str) -> Result<Vec<u8>, String> {
    if source == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|e| format!("reading stdin: {}", e))?;
        return Ok(bytes);
    }
    std::fs::read(source).map_err(|e| format!("reading {}: {}", source, e))
}

fn run_canonical(
    source: &str,
    record_type: RecordType,
    pretty: bool,
    output: Option<&Path>,
) -> Result<(), u8> {
    let bytes = read_document(source).map_err(|e| {
        eprintln!("Error: {}", e);
        3u8
    })?;

    let canonical = record_type.canonicalize(&bytes).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    write_json(&canonical, pretty, output)
}

fn write_json(value: &Value, pretty: bool, output: Option<&Path>) -> Result<(), u8> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", text);
        }
    }

    Ok(())
}

fn run_validate(
    source: &str,
    record_type: RecordType,
    json_output: bool,
    structural: bool,
) -> Result<(), u8> {
    let bytes = read_document(source).map_err(|e| {
        report_error(json_output, &e);
        3u8
    })?;

    let mut errors = Vec::new();

    if structural {
        let document: Value = serde_json::from_slice(&bytes).map_err(|e| {
            report_error(json_output, &e.to_string());
            2u8
        })?;
        match record_type.check(&document) {
            Ok(()) => {}
            Err(gnap_codec::CheckError::Invalid { violations }) => {
                errors.extend(violations.iter().map(ToString::to_string));
            }
            Err(e) => {
                report_error(json_output, &e.to_string());
                return Err(e.exit_code() as u8);
            }
        }
    }

    match record_type.validate(&bytes) {
        Ok(()) => {}
        Err(ValidateError::Invalid(e)) => errors.push(e.to_string()),
        Err(ValidateError::Parse(e)) if errors.is_empty() => {
            report_error(json_output, &e.to_string());
            return Err(e.exit_code() as u8);
        }
        // Structural violations already explain the failed decode.
        Err(ValidateError::Parse(e)) => errors.push(e.to_string()),
    }

    if errors.is_empty() {
        if json_output {
            println!(r#"{{"valid":true}}"#);
        } else {
            println!("Valid");
        }
        return Ok(());
    }

    if json_output {
        let output = json!({
            "valid": false,
            "errors": errors
        });
        println!("{}", output);
    } else {
        eprintln!("Validation failed:");
        for error in errors {
            eprintln!("  {}", error);
        }
    }
    Err(1)
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", json!({ "valid": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}

fn run_generate(table: &Path, out_dir: Option<&Path>, no_constructors: bool) -> Result<(), u8> {
    let table = load_table(table).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = GenerateOptions::new().constructors(!no_constructors);
    let files = generate(&table, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    match out_dir {
        Some(dir) => {
            write_files(dir, &files).map_err(|e| {
                eprintln!("Error: {}", e);
                e.exit_code() as u8
            })?;
            for file in &files {
                println!("{}", dir.join(&file.file_name).display());
            }
        }
        None => {
            for (i, file) in files.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("// {}", file.file_name);
                print!("{}", file.source);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "remote")]
fn run_grant(source: &str, endpoint: String, pretty: bool) -> Result<(), u8> {
    use gnap_codec::gnap::{GrantRequest, GrantResponse};
    use gnap_codec::{ClientOptions, GrantClient, OpenRecord};

    let bytes = read_document(source).map_err(|e| {
        eprintln!("Error: {}", e);
        3u8
    })?;

    let request = GrantRequest::decode(&bytes).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let response = GrantClient::new(endpoint, ClientOptions::new())
        .and_then(|client| client.send::<GrantRequest, GrantResponse>(&request))
        .map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;

    write_json(&response.to_value(), pretty, None)
}

#[cfg(not(feature = "remote"))]
fn run_grant(_source: &str, _endpoint: String, _pretty: bool) -> Result<(), u8> {
    eprintln!("Error: built without the `remote` feature");
    Err(3)
}
