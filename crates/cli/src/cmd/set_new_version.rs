//! Implementation of the `vstamp set-new-version` command.
//!
//! Builds a `BuildContext` from the command line, runs the stamper, and
//! publishes the resulting property store on stdout and optionally to a file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use vstamp_lib::{BuildContext, FixedBuildNumber, Properties, StampOutcome, VersionStamper};

use crate::output::{OutputFormat, print_info, print_json, print_properties};

pub struct SetNewVersionArgs {
  pub project_version: String,
  pub basedir: Option<PathBuf>,
  pub execution_root: Option<PathBuf>,
  pub build_number: Option<String>,
  pub properties: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub format: OutputFormat,
}

/// Execute the set-new-version command.
///
/// Without `--build-number` the build number is read from `BUILD_NUMBER`.
/// When the module is not the execution root nothing is written and the
/// command still succeeds.
pub fn cmd_set_new_version(args: SetNewVersionArgs) -> Result<()> {
  let cwd = std::env::current_dir().context("Failed to determine current directory")?;
  let base_dir = resolve_dir(&cwd, args.basedir.as_deref());
  let execution_root = resolve_dir(&cwd, args.execution_root.as_deref());

  let mut properties = match &args.properties {
    Some(path) => {
      Properties::load(path).with_context(|| format!("Failed to load properties file: {}", path.display()))?
    }
    None => Properties::new(),
  };

  let ctx = BuildContext {
    execution_root,
    base_dir,
    version: args.project_version,
    properties: &mut properties,
  };

  let outcome = match args.build_number {
    Some(number) => VersionStamper::new(FixedBuildNumber::some(number)).execute(ctx)?,
    None => VersionStamper::from_env().execute(ctx)?,
  };

  match outcome {
    StampOutcome::Skipped { base_dir } => {
      if args.format.is_json() {
        print_json(&serde_json::json!({}))?;
      } else {
        print_info(&format!("{} is not the execution root, no properties set", base_dir.display()));
      }
    }
    StampOutcome::Stamped { new_version } => {
      if let Some(output) = &args.output {
        properties
          .store(output)
          .with_context(|| format!("Failed to write properties file: {}", output.display()))?;
        info!(path = %output.display(), version = %new_version, "properties written");
      }
      print_properties(&properties, args.format)?;
    }
  }

  Ok(())
}

/// Makes `dir` absolute against `cwd` and resolves it on disk when possible.
fn resolve_dir(cwd: &Path, dir: Option<&Path>) -> PathBuf {
  let path = match dir {
    Some(dir) if dir.is_absolute() => dir.to_path_buf(),
    Some(dir) => cwd.join(dir),
    None => cwd.to_path_buf(),
  };
  dunce::canonicalize(&path).unwrap_or(path)
}
