//! Rendering sink abstraction.
//!
//! The map pipeline hands classified geometry to a `MapSink` and never looks
//! at how it is drawn. `HtmlMapSink` writes a Leaflet page; `MemorySink`
//! keeps everything in memory for inspection.

use serde::{Deserialize, Serialize};
use wind_common::{classify, ColorBand, GeoPoint, WindMapResult, WindSample};

use crate::arrows::VectorSegment;

/// A filled circle marker with a popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub point: GeoPoint,
    pub band: ColorBand,
    pub popup: String,
}

impl Marker {
    /// Marker colored by the sample's speed band.
    pub fn for_sample(sample: &WindSample) -> WindMapResult<Self> {
        Ok(Self {
            point: sample.point,
            band: classify(sample.speed_mph)?,
            popup: format!("Wind Speed: {:.1} mph", sample.speed_mph),
        })
    }
}

/// A named reference location drawn as a plain label, e.g. a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Landmark {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
}

impl MapView {
    /// Whole contiguous United States.
    pub const CONUS: MapView = MapView {
        center_lat: 39.8,
        center_lon: -98.6,
        zoom: 4,
    };

    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center_lat: center.lat,
            center_lon: center.lon,
            zoom,
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: &'static str,
}

/// Legend box content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// One entry per speed band, lowest first.
    pub fn wind_speed() -> Self {
        Self {
            title: "Wind Speed Legend".to_string(),
            entries: ColorBand::ALL
                .iter()
                .map(|band| LegendEntry {
                    color: band.css_color(),
                    label: band.label(),
                })
                .collect(),
        }
    }
}

/// Consumer of classified map features.
pub trait MapSink {
    /// What `finish` produces, e.g. the path of the written document.
    type Output;

    fn set_view(&mut self, view: MapView);

    fn add_segment(&mut self, segment: &VectorSegment);

    fn add_marker(&mut self, marker: Marker);

    fn add_landmark(&mut self, landmark: &Landmark);

    fn set_legend(&mut self, legend: Legend);

    /// Persist the artifact.
    fn finish(self) -> WindMapResult<Self::Output>;
}

/// Sink that only records what it was given.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub view: Option<MapView>,
    pub segments: Vec<VectorSegment>,
    pub markers: Vec<Marker>,
    pub landmarks: Vec<Landmark>,
    pub legend: Option<Legend>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MapSink for MemorySink {
    type Output = MemorySink;

    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn add_segment(&mut self, segment: &VectorSegment) {
        self.segments.push(*segment);
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn add_landmark(&mut self, landmark: &Landmark) {
        self.landmarks.push(landmark.clone());
    }

    fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    fn finish(self) -> WindMapResult<Self::Output> {
        Ok(self)
    }
}
