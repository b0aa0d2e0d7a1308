//! The `set-new-version` step.
//!
//! On the root module of a build, replaces the `-SNAPSHOT` suffix of the
//! project version with the CI build number and publishes the result as the
//! `newVersion` and `releaseVersion` properties. Sub-modules are skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::build_number::{BuildNumberSource, EnvBuildNumber};
use crate::consts::{GENERATE_BACKUP_POMS_KEY, NEW_VERSION_KEY, RELEASE_VERSION_KEY};
use crate::properties::Properties;
use crate::version::{derive_release_version, strip_snapshot};

#[derive(Debug, Error)]
pub enum StampError {
  #[error("Not a SNAPSHOT version!!")]
  NotSnapshot { version: String },

  #[error("Environment variable '{var}' not set!")]
  MissingBuildNumber { var: String },
}

/// Inputs supplied by the host build for a single invocation.
#[derive(Debug)]
pub struct BuildContext<'a> {
  /// Directory the build was started from
  pub execution_root: PathBuf,
  /// Base directory of the module being executed
  pub base_dir: PathBuf,
  /// Current project version, e.g. `1.0-SNAPSHOT`
  pub version: String,
  /// Host-owned property store the results are written into
  pub properties: &'a mut Properties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
  /// The module is not the root of the build; nothing was written.
  Skipped { base_dir: PathBuf },
  /// Properties were written.
  Stamped { new_version: String },
}

/// Returns true if `base_dir` is the directory the build was started from.
///
/// Paths are compared as text, one character at a time, ignoring case the way
/// JVM `equalsIgnoreCase` does: only single-character case mappings apply, so
/// `İ` does not match `i̇`. No filesystem access happens here; callers that
/// want symlinks resolved canonicalize first.
pub fn is_execution_root(execution_root: &Path, base_dir: &Path) -> bool {
  let root = execution_root.to_string_lossy();
  let base = base_dir.to_string_lossy();
  root.chars().count() == base.chars().count()
    && root.chars().zip(base.chars()).all(|(a, b)| chars_eq_ignore_case(a, b))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
  if a == b {
    return true;
  }
  let (upper_a, upper_b) = (simple_upper(a), simple_upper(b));
  upper_a == upper_b || simple_lower(upper_a) == simple_lower(upper_b)
}

/// Uppercase mapping, or `c` itself when the mapping expands to several chars.
fn simple_upper(c: char) -> char {
  let mut mapped = c.to_uppercase();
  match (mapped.next(), mapped.next()) {
    (Some(upper), None) => upper,
    _ => c,
  }
}

fn simple_lower(c: char) -> char {
  let mut mapped = c.to_lowercase();
  match (mapped.next(), mapped.next()) {
    (Some(lower), None) => lower,
    _ => c,
  }
}

pub struct VersionStamper<S = EnvBuildNumber> {
  build_number: S,
}

impl VersionStamper<EnvBuildNumber> {
  /// Stamper reading `BUILD_NUMBER` from the process environment.
  pub fn from_env() -> Self {
    Self::new(EnvBuildNumber::default())
  }
}

impl<S: BuildNumberSource> VersionStamper<S> {
  pub fn new(build_number: S) -> Self {
    Self { build_number }
  }

  /// Runs the step against `ctx`.
  ///
  /// Both the version and the build number are validated before the property
  /// store is touched, so a failed run leaves it unchanged.
  ///
  /// # Errors
  ///
  /// - [`StampError::NotSnapshot`] if the version lacks the `-SNAPSHOT` suffix
  /// - [`StampError::MissingBuildNumber`] if the build number source is empty
  pub fn execute(&self, ctx: BuildContext<'_>) -> Result<StampOutcome, StampError> {
    if !is_execution_root(&ctx.execution_root, &ctx.base_dir) {
      info!("Skipping because the project in {} is not the root project", ctx.base_dir.display());
      return Ok(StampOutcome::Skipped { base_dir: ctx.base_dir });
    }

    debug!(version = %ctx.version, base_dir = %ctx.base_dir.display(), "stamping root project");

    if strip_snapshot(&ctx.version).is_none() {
      return Err(StampError::NotSnapshot { version: ctx.version });
    }

    let build_number = self.build_number.build_number().ok_or_else(|| StampError::MissingBuildNumber {
      var: self.build_number.var_name().to_string(),
    })?;

    let new_version = derive_release_version(&ctx.version, &build_number)?;

    info!("Setting property newVersion and releaseVersion to: {}", new_version);
    ctx.properties.set(NEW_VERSION_KEY, new_version.as_str());
    ctx.properties.set(RELEASE_VERSION_KEY, new_version.as_str());

    info!("Setting property generateBackupPoms to false.");
    ctx.properties.set(GENERATE_BACKUP_POMS_KEY, "false");

    Ok(StampOutcome::Stamped { new_version })
  }
}
