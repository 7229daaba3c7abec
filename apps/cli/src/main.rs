use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use oaspec_models::Swagger;
use oaspec_params::{collect_shared_parameters, share_parameters};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "oaspec",
    about = "Share repeated parameter definitions across a Swagger document",
    version,
    arg_required_else_help = true
)]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace inline parameters with references to shared definitions.
    Share {
        /// Path to the Swagger JSON document (or "-" for stdin).
        #[arg(short, long)]
        input: PathBuf,
        /// Output file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output.
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the shared parameter table without rewriting the document.
    Collect {
        /// Path to the Swagger JSON document (or "-" for stdin).
        #[arg(short, long)]
        input: PathBuf,
        /// Pretty-print JSON output.
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print CLI version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Share {
            input,
            output,
            pretty,
        } => {
            run_share(&input, output.as_deref(), pretty)?;
        }
        Commands::Collect { input, pretty } => {
            run_collect(&input, pretty)?;
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_share(input: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
    let swagger = Arc::new(load_swagger(input)?);

    let shared = share_parameters(&swagger)
        .with_context(|| format!("Failed to share parameters of {}", input.display()))?;

    let value = shared.to_value()?;
    write_json_output(&value, output, pretty)
}

fn run_collect(input: &Path, pretty: bool) -> Result<()> {
    let swagger = load_swagger(input)?;

    let shared = collect_shared_parameters(&swagger)
        .with_context(|| format!("Failed to collect parameters of {}", input.display()))?;

    let value = serde_json::to_value(&shared.parameters)?;
    write_json_output(&value, None, pretty)
}

fn load_swagger(path: &Path) -> Result<Swagger> {
    let content = if path.to_string_lossy() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read Swagger document from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path.display()))?
    };

    parse_swagger(&content).with_context(|| format!("Invalid Swagger document in {:?}", path.display()))
}

fn parse_swagger(content: &str) -> Result<Swagger> {
    let value: Value = serde_json::from_str(content).context("Document is not valid JSON")?;

    match value.get("swagger").and_then(Value::as_str) {
        Some(version) if version.starts_with("2.") => {}
        Some(version) => anyhow::bail!("Unsupported Swagger version '{}' (expected 2.0)", version),
        None => anyhow::bail!("Document is missing the 'swagger' version field"),
    }

    Ok(Swagger::from_value(value)?)
}

fn write_json_output(value: &Value, output: Option<&Path>, pretty: bool) -> Result<()> {
    let content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    if let Some(output_path) = output {
        fs::write(output_path, content)
            .with_context(|| format!("Failed to write to {:?}", output_path))?;
        tracing::info!("Wrote output to {:?}", output_path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_swagger_two() {
        let sp = parse_swagger(r#"{"swagger": "2.0", "paths": {}}"#).unwrap();
        assert!(sp.paths.unwrap().is_empty());
    }

    #[test]
    fn rejects_other_versions() {
        let err = parse_swagger(r#"{"openapi": "3.0.0"}"#).unwrap_err();
        assert!(err.to_string().contains("swagger"));

        let err = parse_swagger(r#"{"swagger": "1.2"}"#).unwrap_err();
        assert!(err.to_string().contains("1.2"));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_swagger("{not json").is_err());
    }

    #[test]
    fn cli_parses_share_arguments() {
        let cli = Cli::try_parse_from(["oaspec", "share", "-i", "api.json", "-o", "out.json", "--pretty"])
            .unwrap();
        match cli.command {
            Commands::Share {
                input,
                output,
                pretty,
            } => {
                assert_eq!(input, PathBuf::from("api.json"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(pretty);
            }
            _ => panic!("expected share command"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["oaspec", "collect", "-i", "-", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
