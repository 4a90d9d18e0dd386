//! specfold CLI.
//!
//! Merges Swagger 2.0 / OpenAPI 3.0 documents (files or URLs) into a
//! single OpenAPI 3.0.1 document with a configured server list.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use specfold_merger::{MergeConfig, Pipeline};
use specfold_spec_parser::Server;
use specfold_telemetry::{init_logging, LogFormat, TelemetryConfig};

#[derive(Parser, Debug)]
#[command(name = "specfold", about = "Merge Swagger/OpenAPI documents into one", version)]
struct Cli {
    /// Log level.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log format (json or pretty).
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge input documents into a single OpenAPI 3.0.1 file.
    Merge {
        /// Input document(s): file paths or http(s) URLs, in precedence
        /// order (later inputs win on collision).
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Output file path.
        #[arg(short, long, default_value = "merged_swagger.yaml")]
        output: PathBuf,

        /// Server override(s) in `url:description` form.
        #[arg(short, long, num_args = 0..)]
        servers: Vec<String>,
    },

    /// Print statistics for the merged result without writing it.
    Stats {
        /// Input document(s): file paths or http(s) URLs.
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Server override(s) in `url:description` form.
        #[arg(short, long, num_args = 0..)]
        servers: Vec<String>,

        /// Output format (text or json).
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Parse `--servers` values into server entries. Each value may itself
/// be a comma-separated list.
fn parse_servers(entries: &[String]) -> Vec<Server> {
    entries
        .iter()
        .flat_map(|entry| entry.split(','))
        .filter_map(parse_server_entry)
        .collect()
}

/// Split a `url:description` entry on the last colon. A colon that is
/// part of the URL itself (scheme separator, or followed by a path) does
/// not count; a bare URL gets the default description.
fn parse_server_entry(entry: &str) -> Option<Server> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }

    if let Some(idx) = entry.rfind(':') {
        let rest = &entry[idx + 1..];
        if idx > 0 && !rest.is_empty() && !rest.starts_with("//") && !rest.contains('/') {
            return Some(Server {
                url: entry[..idx].trim().to_string(),
                description: rest.trim().to_string(),
            });
        }
    }

    Some(Server {
        url: entry.to_string(),
        description: "API Server".to_string(),
    })
}

fn run_merge(input: Vec<String>, output: PathBuf, servers: Vec<String>) -> ExitCode {
    let pipeline = Pipeline::new(MergeConfig {
        inputs: input,
        output,
        servers: parse_servers(&servers),
    });

    match pipeline.merge() {
        Ok(stats) => {
            eprintln!(
                "merged {} document(s) to {} ({} paths, {} schemas, {} tags)",
                stats.total_files,
                pipeline.config().output.display(),
                stats.total_paths,
                stats.total_schemas,
                stats.total_tags
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_stats(input: Vec<String>, servers: Vec<String>, format: &str) -> ExitCode {
    let pipeline = Pipeline::new(MergeConfig {
        inputs: input,
        output: PathBuf::new(),
        servers: parse_servers(&servers),
    });

    match pipeline.stats() {
        Ok(stats) => {
            if format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).expect("stats serialize")
                );
            } else {
                println!("total_files: {}", stats.total_files);
                println!("total_paths: {}", stats.total_paths);
                println!("total_schemas: {}", stats.total_schemas);
                println!("total_tags: {}", stats.total_tags);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = TelemetryConfig {
        log_level: cli.log_level.clone(),
        log_format: LogFormat::parse(&cli.log_format).unwrap_or_default(),
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }

    match cli.command {
        Commands::Merge {
            input,
            output,
            servers,
        } => run_merge(input, output, servers),
        Commands::Stats {
            input,
            servers,
            format,
        } => run_stats(input, servers, &format),
    }
}
