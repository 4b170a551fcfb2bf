pub mod cli;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "xml2json")]
#[command(about = "Convert an XML file to a data.json file in the working directory")]
pub struct CliConfig {
    /// Path to the source XML file
    pub source: String,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_path(&self) -> &str {
        &self.source
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source)?;
        Ok(())
    }
}
