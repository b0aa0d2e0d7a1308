//! vstamp-lib: release version stamping for SNAPSHOT builds
//!
//! This crate provides the pieces the `vstamp` binary wires together:
//! - `VersionStamper`: turns `1.0-SNAPSHOT` plus build number `123` into `1.0.123`
//! - `BuildContext`: the host-owned inputs (directories, version, property store)
//! - `BuildNumberSource`: injectable lookup of the CI build number
//! - `Properties`: the key/value store the derived version is written into

pub mod build_number;
pub mod consts;
pub mod properties;
pub mod stamp;
pub mod version;

pub use build_number::{BuildNumberSource, EnvBuildNumber, FixedBuildNumber};
pub use properties::{Properties, PropertiesError};
pub use stamp::{BuildContext, StampError, StampOutcome, VersionStamper, is_execution_root};
pub use version::{derive_release_version, strip_snapshot};
