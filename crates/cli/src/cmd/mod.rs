mod info;
mod set_new_version;

pub use info::cmd_info;
pub use set_new_version::{SetNewVersionArgs, cmd_set_new_version};
