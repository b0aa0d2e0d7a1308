//! Sources for the CI build number.
//!
//! The stamper never reads the environment directly. It asks a
//! [`BuildNumberSource`], which lets tests and the CLI substitute a fixed or
//! absent value.

use std::env::{self, VarError};

use tracing::warn;

use crate::consts::BUILD_NUMBER_VAR;

/// Lookup of the build number for the current run.
pub trait BuildNumberSource {
  /// Returns the build number, or `None` if it is not available.
  fn build_number(&self) -> Option<String>;

  /// Name reported in errors when the build number is missing.
  fn var_name(&self) -> &str {
    BUILD_NUMBER_VAR
  }
}

/// Reads the build number from a process environment variable.
#[derive(Debug, Clone)]
pub struct EnvBuildNumber {
  var: String,
}

impl EnvBuildNumber {
  pub fn new(var: impl Into<String>) -> Self {
    Self { var: var.into() }
  }
}

impl Default for EnvBuildNumber {
  fn default() -> Self {
    Self::new(BUILD_NUMBER_VAR)
  }
}

impl BuildNumberSource for EnvBuildNumber {
  fn build_number(&self) -> Option<String> {
    match env::var(&self.var) {
      Ok(value) => Some(value),
      Err(VarError::NotPresent) => None,
      Err(VarError::NotUnicode(_)) => {
        warn!(var = %self.var, "ignoring build number that is not valid unicode");
        None
      }
    }
  }

  fn var_name(&self) -> &str {
    &self.var
  }
}

/// A build number decided up front.
#[derive(Debug, Clone, Default)]
pub struct FixedBuildNumber(pub Option<String>);

impl FixedBuildNumber {
  pub fn some(value: impl Into<String>) -> Self {
    Self(Some(value.into()))
  }

  pub fn none() -> Self {
    Self(None)
  }
}

impl BuildNumberSource for FixedBuildNumber {
  fn build_number(&self) -> Option<String> {
    self.0.clone()
  }
}

impl<F> BuildNumberSource for F
where
  F: Fn() -> Option<String>,
{
  fn build_number(&self) -> Option<String> {
    self()
  }
}
