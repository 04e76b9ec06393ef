pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{SourceFormat, CITIES_FILENAME, CONTINENT_FILENAME, DATABASE_FILENAME};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_allowed_value, validate_file_extension, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cities-etl")]
#[command(about = "Normalizes public city population exports for a mock JSON API")]
pub struct CliConfig {
    /// Source schema of the raw export: "geonames" or "simplemaps"
    #[arg(long, default_value = "geonames")]
    pub source_format: String,

    /// Raw dataset to normalize, relative to the data directory
    #[arg(long, default_value = "data.json")]
    pub input_path: String,

    /// Static continent lookup merged into the combined output
    #[arg(long, default_value = CONTINENT_FILENAME)]
    pub continent_path: String,

    /// Skip the continent merge and only write the cities file
    #[arg(long)]
    pub skip_continent: bool,

    /// Directory the dataset files are read from and written to
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_format(&self) -> &str {
        &self.source_format
    }

    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn continent_path(&self) -> Option<&str> {
        if self.skip_continent {
            None
        } else {
            Some(&self.continent_path)
        }
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn cities_filename(&self) -> &str {
        CITIES_FILENAME
    }

    fn database_filename(&self) -> &str {
        DATABASE_FILENAME
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_allowed_value("source_format", &self.source_format, &SourceFormat::SUPPORTED)?;
        validate_path("input_path", &self.input_path)?;
        validate_path("data_dir", &self.data_dir)?;

        if let Some(format) = SourceFormat::parse(&self.source_format) {
            validate_file_extension("input_path", &self.input_path, format.expected_extension())?;
        }

        if !self.skip_continent {
            validate_path("continent_path", &self.continent_path)?;
            validate_file_extension("continent_path", &self.continent_path, "json")?;
        }

        Ok(())
    }
}
