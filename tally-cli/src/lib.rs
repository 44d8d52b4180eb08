pub mod app_config;
pub mod compare;
pub mod error;
pub mod prompt;
pub mod report;
pub mod session;

pub use app_config::{Config, OutputConfig, OutputFormat};
pub use error::{CliError, CliResult};
pub use prompt::Prompter;
pub use session::run;
