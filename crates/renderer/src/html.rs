//! Standalone Leaflet HTML map output.
//!
//! Features are embedded as JSON literals and drawn by a short inline script,
//! so the written file only needs network access for Leaflet itself and the
//! OpenStreetMap tiles.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use wind_common::{WindMapError, WindMapResult};

use crate::arrows::VectorSegment;
use crate::sink::{Landmark, Legend, MapSink, MapView, Marker};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Stroke weight for arrow polylines in pixels.
const LINE_WEIGHT: u32 = 2;
/// Circle marker radius in pixels.
const MARKER_RADIUS: u32 = 5;
const MARKER_FILL_OPACITY: f64 = 0.7;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>@TITLE@</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="@LEAFLET_CSS@">
<script src="@LEAFLET_JS@"></script>
<style>
html, body { height: 100%; margin: 0; font-family: sans-serif; }
#header { padding: 6px 12px; }
#header h1 { font-size: 20px; margin: 0; }
#header p { font-size: 13px; margin: 2px 0 0 0; color: #555; }
#map { position: absolute; top: 56px; bottom: 0; width: 100%; }
</style>
</head>
<body>
<div id="header">
<h1>@TITLE@</h1>
<p>@SUBTITLE@</p>
</div>
<div id="map"></div>
@LEGEND@
<script>
const VIEW = @VIEW@;
const POLYLINES = @POLYLINES@;
const MARKERS = @MARKERS@;
const LANDMARKS = @LANDMARKS@;

const map = L.map('map').setView(VIEW.center, VIEW.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

for (const line of POLYLINES) {
  L.polyline(line.latlngs, { color: line.color, weight: line.weight }).addTo(map);
}
for (const m of MARKERS) {
  L.circleMarker(m.latlng, {
    radius: m.radius,
    color: m.color,
    fill: true,
    fillOpacity: m.fill_opacity
  }).bindPopup(m.popup).addTo(map);
}
for (const l of LANDMARKS) {
  L.marker(l.latlng, { title: l.name }).bindTooltip(l.label).addTo(map);
}
</script>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct ViewFeature {
    center: [f64; 2],
    zoom: u8,
}

#[derive(Debug, Serialize)]
struct PolylineFeature {
    latlngs: [[f64; 2]; 2],
    color: &'static str,
    weight: u32,
}

#[derive(Debug, Serialize)]
struct MarkerFeature {
    latlng: [f64; 2],
    color: &'static str,
    popup: String,
    radius: u32,
    fill_opacity: f64,
}

#[derive(Debug, Serialize)]
struct LandmarkFeature {
    latlng: [f64; 2],
    name: String,
    /// HTML-escaped name for the tooltip, which Leaflet renders as markup
    label: String,
}

/// Sink writing a single self-contained HTML document.
#[derive(Debug)]
pub struct HtmlMapSink {
    path: PathBuf,
    title: String,
    subtitle: String,
    view: MapView,
    generated_at: DateTime<Utc>,
    polylines: Vec<PolylineFeature>,
    markers: Vec<MarkerFeature>,
    landmarks: Vec<LandmarkFeature>,
    legend: Option<Legend>,
}

impl HtmlMapSink {
    /// New sink centred on the contiguous US until a view is set.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            subtitle: String::new(),
            view: MapView::CONUS,
            generated_at: Utc::now(),
            polylines: Vec::new(),
            markers: Vec::new(),
            landmarks: Vec::new(),
            legend: None,
        }
    }

    pub fn with_view(mut self, view: MapView) -> Self {
        self.view = view;
        self
    }

    /// Line of text shown under the title.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Override the page timestamp, mainly for reproducible output.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn feature_count(&self) -> usize {
        self.polylines.len() + self.markers.len()
    }

    /// Render the full document.
    pub fn render(&self) -> WindMapResult<String> {
        let view = ViewFeature {
            center: self.view.center().to_lat_lon(),
            zoom: self.view.zoom,
        };

        let subtitle = if self.subtitle.is_empty() {
            format!("Generated {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"))
        } else {
            format!(
                "{} &middot; generated {}",
                escape_html(&self.subtitle),
                self.generated_at.format("%Y-%m-%d %H:%M UTC")
            )
        };

        let legend = self
            .legend
            .as_ref()
            .map(render_legend)
            .unwrap_or_default();

        let page = fill_template(
            PAGE_TEMPLATE,
            &[
                ("LEAFLET_CSS", LEAFLET_CSS),
                ("LEAFLET_JS", LEAFLET_JS),
                ("TITLE", escape_html(&self.title).as_str()),
                ("SUBTITLE", subtitle.as_str()),
                ("LEGEND", legend.as_str()),
                ("VIEW", script_json(&view)?.as_str()),
                ("POLYLINES", script_json(&self.polylines)?.as_str()),
                ("MARKERS", script_json(&self.markers)?.as_str()),
                ("LANDMARKS", script_json(&self.landmarks)?.as_str()),
            ],
        )?;
        Ok(page)
    }
}

impl MapSink for HtmlMapSink {
    type Output = PathBuf;

    fn set_view(&mut self, view: MapView) {
        self.view = view;
    }

    fn add_segment(&mut self, segment: &VectorSegment) {
        self.polylines.push(PolylineFeature {
            latlngs: [segment.start.to_lat_lon(), segment.end.to_lat_lon()],
            color: segment.band.css_color(),
            weight: LINE_WEIGHT,
        });
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(MarkerFeature {
            latlng: marker.point.to_lat_lon(),
            color: marker.band.css_color(),
            popup: marker.popup,
            radius: MARKER_RADIUS,
            fill_opacity: MARKER_FILL_OPACITY,
        });
    }

    fn add_landmark(&mut self, landmark: &Landmark) {
        self.landmarks.push(LandmarkFeature {
            latlng: landmark.point().to_lat_lon(),
            name: landmark.name.clone(),
            label: escape_html(&landmark.name),
        });
    }

    fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    fn finish(self) -> WindMapResult<PathBuf> {
        let html = self.render()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, html.as_bytes())?;

        debug!(bytes = html.len(), "Rendered HTML map");
        info!(
            path = %self.path.display(),
            polylines = self.polylines.len(),
            markers = self.markers.len(),
            "Wrote wind map"
        );
        Ok(self.path)
    }
}

fn render_legend(legend: &Legend) -> String {
    let mut html = String::from(
        "<div id=\"legend\" style=\"position: fixed; bottom: 50px; left: 50px; width: 200px; \
         background-color: white; z-index:9999; font-size:14px; \
         border:2px solid grey; padding: 10px;\">\n",
    );
    html.push_str(&format!("<b>{}</b><br>\n", escape_html(&legend.title)));
    for entry in &legend.entries {
        html.push_str(&format!(
            "<i style=\"background:{}; width:20px; height:10px; display:inline-block;\"></i> {}<br>\n",
            entry.color,
            escape_html(entry.label)
        ));
    }
    html.push_str("</div>");
    html
}

/// Substitute `@NAME@` placeholders in a single pass over `template`.
///
/// Substituted values are never rescanned, so user text containing `@` is
/// copied through unchanged.
fn fill_template(template: &str, values: &[(&str, &str)]) -> WindMapResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('@') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('@').ok_or_else(|| {
            WindMapError::RenderError("unterminated template placeholder".to_string())
        })?;
        let name = &after[..end];
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                WindMapError::RenderError(format!("unknown template placeholder @{}@", name))
            })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// JSON that is safe to inline inside a `<script>` element.
fn script_json<T: Serialize + ?Sized>(value: &T) -> WindMapResult<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| WindMapError::RenderError(format!("feature serialization: {}", e)))?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
