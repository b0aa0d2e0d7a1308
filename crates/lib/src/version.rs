//! SNAPSHOT version handling.
//!
//! Only the fixed `<base>-SNAPSHOT` convention is understood. The base is kept
//! verbatim, so `1.0-rc1-SNAPSHOT` becomes `1.0-rc1.<build>`.

use crate::consts::SNAPSHOT_SUFFIX;
use crate::stamp::StampError;

/// Returns the version with its trailing `-SNAPSHOT` removed, or `None` if the
/// suffix is missing.
pub fn strip_snapshot(version: &str) -> Option<&str> {
  version.strip_suffix(SNAPSHOT_SUFFIX)
}

/// Computes `<base>.<build_number>` from a SNAPSHOT version.
///
/// # Errors
///
/// Returns [`StampError::NotSnapshot`] if `version` does not end in `-SNAPSHOT`.
pub fn derive_release_version(version: &str, build_number: &str) -> Result<String, StampError> {
  let base = strip_snapshot(version).ok_or_else(|| StampError::NotSnapshot {
    version: version.to_string(),
  })?;
  Ok(format!("{}.{}", base, build_number))
}
