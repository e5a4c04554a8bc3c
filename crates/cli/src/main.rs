mod cmd;
mod locate;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stackup_lib::consts::{APP_NAME, MANIFEST_ENV_VAR};

use cmd::{cmd_order, cmd_set, cmd_targets};
use output::{OutputFormat, print_error};

/// stackup - resolve which applications of a deployment manifest a command acts on
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Manifest file (default: nearest manifest.yml at or above the current directory)
  #[arg(short, long, global = true, env = MANIFEST_ENV_VAR)]
  manifest: Option<PathBuf>,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the applications a command run from PATH would act on
  Targets {
    /// Directory to resolve (default: current directory)
    path: Option<PathBuf>,

    /// Select nothing instead of failing when there are no applications
    #[arg(long)]
    allow_empty: bool,
  },

  /// Show every application in dependency order
  Order,

  /// Set a field of one application and save the manifest
  Set {
    /// Application key, e.g. ./web
    app: String,

    /// Dotted field path, e.g. framework.info.mem
    key: String,

    /// Value, parsed as YAML
    value: String,
  },
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("debug")
    } else {
      EnvFilter::new("warn")
    }
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let manifest = cli.manifest.as_deref();
  let result = match &cli.command {
    Commands::Targets { path, allow_empty } => cmd_targets(manifest, path.as_deref(), *allow_empty, cli.format),
    Commands::Order => cmd_order(manifest, cli.format),
    Commands::Set { app, key, value } => cmd_set(manifest, app, key, value, cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
