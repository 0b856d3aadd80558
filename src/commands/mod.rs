pub mod check;
pub mod config;
mod context;
pub mod init;
pub mod rules;

pub use check::run_check;
pub use config::run_config;
pub use init::{generate_config_template, run_init, run_init_impl};
pub use rules::run_rules;
