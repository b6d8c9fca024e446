//! Wind map service library.
//!
//! Exposes the configuration, data sources and map pipeline so the binary
//! and the integration tests share one implementation.

pub mod config;
pub mod export;
pub mod pipeline;
pub mod sources;

pub use config::{MapConfig, MapOverrides, RenderStyle, SourcesConfig};
pub use pipeline::{generate_map, MapSummary, Progress};
pub use sources::{TurbineRecord, TurbineSource, WeatherGridSource};
