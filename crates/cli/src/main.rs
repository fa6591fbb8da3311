// topocheck CLI - reconcile CSV columns against TopoJSON properties

mod exit_codes;
mod recon;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};
use recon::OutputOptions;

#[derive(Parser)]
#[command(name = "topocheck")]
#[command(about = "Report which CSV identifiers and names have a counterpart in a TopoJSON file")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Debug logging to stderr (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run reconciliation from a TOML config file
    #[command(after_help = "\
Input file paths in the config are resolved relative to the config file.

Examples:
  topocheck run flows.recon.toml
  topocheck run flows.recon.toml --json
  topocheck run flows.recon.toml --output result.json
  topocheck run flows.recon.toml --strict")]
    Run {
        /// Path to the .recon.toml config file
        config: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reconcile without a config file, naming the fields on the command line
    #[command(after_help = "\
Examples:
  topocheck compare flows.csv world.topo.json \\
      --id-columns coo_iso,coa_iso --name-columns coo_name,coa_name
  topocheck compare data.csv map.json --id-columns a,b --name-columns c,d \\
      --id-key ISO_A3 --name-key NAME --collection countries --json")]
    Compare {
        /// CSV file with a header row
        csv: PathBuf,

        /// TopoJSON file
        topology: PathBuf,

        /// The two CSV columns compared against the identifier key
        #[arg(long, value_delimiter = ',', required = true, value_name = "COL,COL")]
        id_columns: Vec<String>,

        /// The two CSV columns compared against the name key
        #[arg(long, value_delimiter = ',', required = true, value_name = "COL,COL")]
        name_columns: Vec<String>,

        /// Identifier key inside each geometry's properties
        #[arg(long, default_value = "id")]
        id_key: String,

        /// Name key inside each geometry's properties
        #[arg(long, default_value = "name")]
        name_key: String,

        /// Collection under `objects` holding the geometries
        #[arg(long, default_value = topocheck_recon::config::DEFAULT_COLLECTION)]
        collection: String,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a recon config without running
    #[command(after_help = "\
Examples:
  topocheck validate flows.recon.toml")]
    Validate {
        /// Path to the .recon.toml config file
        config: PathBuf,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output JSON to stdout instead of the text report
    #[arg(long)]
    json: bool,

    /// Write JSON output to file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Exit 1 if any value on either side has no counterpart
    #[arg(long)]
    strict: bool,
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self { json: args.json, output: args.output, strict: args.strict }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: topocheck <command> [options]");
            eprintln!("       topocheck --help for more information");
            Ok(())
        }
        Some(Commands::Run { config, output }) => recon::cmd_recon_run(config, output.into()),
        Some(Commands::Compare {
            csv,
            topology,
            id_columns,
            name_columns,
            id_key,
            name_key,
            collection,
            delimiter,
            output,
        }) => recon::cmd_recon_compare(
            csv, topology, id_columns, name_columns, id_key, name_key, collection, delimiter,
            output.into(),
        ),
        Some(Commands::Validate { config }) => recon::cmd_recon_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
