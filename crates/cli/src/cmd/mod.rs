mod boards;
mod build;
mod check;
mod clean;
mod config;
mod init;
mod upload;
mod version;

pub use boards::{cmd_boards_detect, cmd_boards_list};
pub use build::cmd_build;
pub use check::cmd_check;
pub use clean::cmd_clean;
pub use config::{cmd_config_get, cmd_config_list, cmd_config_path, cmd_config_set};
pub use init::cmd_init;
pub use upload::cmd_upload;
pub use version::cmd_version;
