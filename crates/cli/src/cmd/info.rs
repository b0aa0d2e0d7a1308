use vstamp_lib::build_number::{BuildNumberSource, EnvBuildNumber};
use vstamp_lib::consts::{APP_NAME, GOAL_NAME, SNAPSHOT_SUFFIX};

use crate::output::print_stat;

pub fn cmd_info() {
  let source = EnvBuildNumber::default();

  println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
  print_stat("Goal", GOAL_NAME);
  print_stat("Snapshot suffix", SNAPSHOT_SUFFIX);
  match source.build_number() {
    Some(value) => print_stat(source.var_name(), &value),
    None => print_stat(source.var_name(), "(not set)"),
  }
}
