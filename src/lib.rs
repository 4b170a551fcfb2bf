pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{convert::ConvertEngine, pipeline::ConvertPipeline};
pub use utils::error::{ConvertError, Result};
