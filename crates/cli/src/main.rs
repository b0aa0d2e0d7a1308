mod cmd;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::SetNewVersionArgs;
use crate::output::{OutputFormat, print_error};

/// vstamp - derive release versions from SNAPSHOT versions and CI build numbers
#[derive(Parser)]
#[command(name = "vstamp")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Set newVersion/releaseVersion from the SNAPSHOT version and BUILD_NUMBER
  SetNewVersion {
    /// Current project version, e.g. 1.0-SNAPSHOT
    #[arg(long)]
    project_version: String,

    /// Base directory of the module being built (default: current directory)
    #[arg(long)]
    basedir: Option<PathBuf>,

    /// Directory the build was started from (default: current directory)
    #[arg(long)]
    execution_root: Option<PathBuf>,

    /// Use this build number instead of reading BUILD_NUMBER
    #[arg(long)]
    build_number: Option<String>,

    /// Existing properties file to start from
    #[arg(long)]
    properties: Option<PathBuf>,

    /// Write the resulting properties to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Show the build number variable and its current state
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .without_time()
    .with_target(false)
    .init();

  let result = match cli.command {
    Commands::SetNewVersion {
      project_version,
      basedir,
      execution_root,
      build_number,
      properties,
      output,
      format,
    } => cmd::cmd_set_new_version(SetNewVersionArgs {
      project_version,
      basedir,
      execution_root,
      build_number,
      properties,
      output,
      format,
    }),
    Commands::Info => {
      cmd::cmd_info();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
