//! Unfurl command-line tool: denormalize graphs stored as JSON or YAML.

mod config;
mod error;
mod export;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use unfurl_core::{collect_links, Denormalizer, DenormalizeError};

use config::{load_config, resolve_config};
use error::UnfurlError;
use export::{export, render_links, ExportOptions};
use input::{load_graph, Format};

#[derive(Parser)]
#[command(name = "unfurl")]
#[command(about = "Expand normalized data graphs into nested trees")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (default: <config dir>/unfurl/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Denormalize a graph and print the resulting tree
    Expand {
        /// Normalized graph file (.json, .yaml, .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format, when the extension does not tell
        #[arg(long, value_enum)]
        input_format: Option<Format>,

        /// Collection to use as the traversal root
        #[arg(long)]
        root: Option<String>,

        /// Resolve a type by prefixing its entities with a directory (TYPE=DIR)
        #[arg(long = "prefix", value_name = "TYPE=DIR")]
        prefixes: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the links found under the root, without resolving them
    Links {
        /// Normalized graph file (.json, .yaml, .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format, when the extension does not tell
        #[arg(long, value_enum)]
        input_format: Option<Format>,

        /// Collection to scan
        #[arg(long)]
        root: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Expand {
            input,
            input_format,
            root,
            prefixes,
            format,
            compact,
            output,
        } => {
            let config = resolve_config(file_config, root, &prefixes)?;
            let denormalizer = Denormalizer::from_config(&config).map_err(UnfurlError::from)?;
            let graph = load_graph(&input, input_format)?;

            let tree = denormalizer.to_tree(&graph).map_err(UnfurlError::from)?;
            let content = export(&tree, format, &ExportOptions { pretty: !compact })?;

            match output {
                Some(path) => std::fs::write(path, content)?,
                None => print!("{}", content),
            }
        }
        Command::Links {
            input,
            input_format,
            root,
        } => {
            let config = resolve_config(file_config, root, &[])?;
            let graph = load_graph(&input, input_format)?;

            let seed = graph
                .collection(&config.root)
                .ok_or_else(|| UnfurlError::from(DenormalizeError::MissingRoot(config.root.clone())))?;
            print!("{}", render_links(&collect_links(seed)));
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
