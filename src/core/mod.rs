pub mod aggregator;
pub mod engine;
pub mod fallback;
pub mod pipeline;
pub mod snapshot;

pub use crate::domain::model::{MenuResult, WriteOutcome};
pub use crate::domain::ports::{ConfigProvider, PageFetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
