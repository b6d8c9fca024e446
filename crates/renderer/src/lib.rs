//! Map rendering for turbine wind data.
//!
//! - Wind arrow geometry (shaft and arrowhead barbs)
//! - The `MapSink` abstraction and an in-memory sink
//! - Leaflet HTML output

pub mod arrows;
pub mod html;
pub mod sink;

pub use arrows::{compute_arrow, VectorSegment, WindArrow, WindSampleExt, DEFAULT_ARROW_SCALE};
pub use html::HtmlMapSink;
pub use sink::{Landmark, Legend, LegendEntry, MapSink, MapView, Marker, MemorySink};
