pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::cli::LocalStorage;

pub use core::{etl::EtlEngine, pipeline::CityPipeline};
pub use utils::error::{EtlError, Result};
