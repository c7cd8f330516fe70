pub mod adapters;
pub mod config;
pub mod core;
pub mod display;
pub mod domain;
pub mod parse;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{HttpFetcher, LocalStorage};
pub use config::AppConfig;
pub use crate::core::{engine::MenuEngine, pipeline::MenuPipeline};
pub use utils::error::{MenuError, Result};
