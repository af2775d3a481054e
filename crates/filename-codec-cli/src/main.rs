//! `fncodec` CLI -- encode parameters into filenames and decode them back.
//!
//! ## Usage
//!
//! ```sh
//! # Schema file
//! cat > schema.json <<'JSON'
//! {"prefix": "pkls/", "postfix": ".pickle", "fields": {"n_data": "6int", "conf": "fp1.2"}}
//! JSON
//!
//! # Encode a JSON object of values (stdin → stdout)
//! echo '{"n_data": 100, "conf": -0.5}' | fncodec encode --schema schema.json
//! # pkls/n_data_000100_conf_-0.50.pickle
//!
//! # Decode one filename to pretty JSON, or several to JSON lines
//! fncodec decode --schema schema.json pkls/n_data_000100_conf_-0.50.pickle
//!
//! # Decode filenames listed on stdin
//! ls pkls/* | fncodec decode --schema schema.json
//!
//! # Print the composite pattern
//! fncodec pattern --schema-json '{"fields": {"g": "4int"}}'
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use filename_codec::{Record, RecordCodec, SchemaConfig};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fncodec",
    version,
    about = "Encode typed parameters into structured filenames and decode them back"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct SchemaArgs {
    /// Schema file (JSON: {"prefix", "postfix", "fields": {name: format}})
    #[arg(short, long, required_unless_present = "schema_json", conflicts_with = "schema_json")]
    schema: Option<String>,

    /// Inline schema JSON
    #[arg(long)]
    schema_json: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON object of values into a filename
    Encode {
        #[command(flatten)]
        schema: SchemaArgs,
        /// Values as inline JSON
        #[arg(long, conflicts_with = "input")]
        values: Option<String>,
        /// Values file (reads from stdin if neither this nor --values is given)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Decode filenames into JSON objects
    Decode {
        #[command(flatten)]
        schema: SchemaArgs,
        /// Filenames to decode (one per line on stdin if omitted)
        names: Vec<String>,
    },
    /// Print the composite pattern of a schema
    Pattern {
        #[command(flatten)]
        schema: SchemaArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode {
            schema,
            values,
            input,
        } => {
            let codec = load_codec(&schema)?;
            let json = match values {
                Some(values) => values,
                None => read_input(input.as_deref())?,
            };
            let record: Record =
                serde_json::from_str(&json).context("Values must be a JSON object of scalars")?;
            let name = codec
                .encode(&record)
                .context("Failed to encode values into a filename")?;
            println!("{name}");
        }
        Commands::Decode { schema, names } => {
            let codec = load_codec(&schema)?;
            let names = if names.is_empty() {
                read_input(None)?
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            } else {
                names
            };
            let single = names.len() == 1;
            for name in &names {
                let record = codec
                    .decode(name)
                    .with_context(|| format!("Failed to decode '{name}'"))?;
                let json = if single {
                    serde_json::to_string_pretty(&record)?
                } else {
                    serde_json::to_string(&record)?
                };
                println!("{json}");
            }
        }
        Commands::Pattern { schema } => {
            let codec = load_codec(&schema)?;
            println!("{}", codec.pattern());
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `-v` flags win over `RUST_LOG`;
/// without either, only warnings are shown.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_codec(args: &SchemaArgs) -> Result<RecordCodec> {
    let json = match (&args.schema, &args.schema_json) {
        (Some(path), _) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {path}"))?,
        (None, Some(json)) => json.clone(),
        (None, None) => anyhow::bail!("A schema is required: pass --schema or --schema-json"),
    };
    let config = SchemaConfig::from_json_str(&json).context("Failed to parse schema")?;
    let codec = config.build().context("Invalid schema")?;
    debug!(fields = codec.fields().len(), "loaded schema");
    Ok(codec)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
