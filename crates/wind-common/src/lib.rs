//! Common types and algorithms shared by the turbine wind map crates.

pub mod band;
pub mod bbox;
pub mod error;
pub mod grid;
pub mod point;
pub mod wind;

pub use band::{classify, ColorBand};
pub use bbox::BoundingBox;
pub use error::{WindMapError, WindMapResult};
pub use grid::{bucket, GridBuckets, GridKey};
pub use point::GeoPoint;
pub use wind::{WindReading, WindSample};
