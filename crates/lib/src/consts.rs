pub const APP_NAME: &str = "vstamp";

/// Name of the extension point the stamper is registered under.
pub const GOAL_NAME: &str = "set-new-version";

/// Environment variable carrying the CI build number.
pub const BUILD_NUMBER_VAR: &str = "BUILD_NUMBER";

pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

pub const NEW_VERSION_KEY: &str = "newVersion";
pub const RELEASE_VERSION_KEY: &str = "releaseVersion";
pub const GENERATE_BACKUP_POMS_KEY: &str = "generateBackupPoms";
