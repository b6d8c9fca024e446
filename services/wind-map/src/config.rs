//! Map generation configuration.
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) reproduces the classic Texas map. Command line flags are
//! applied on top through `MapOverrides`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use renderer::{Landmark, MapView};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wind_common::grid::validate_grid_size;
use wind_common::{BoundingBox, GeoPoint, WindMapError, WindMapResult};

/// Default USWTDB API root.
pub const DEFAULT_TURBINE_API_URL: &str = "https://eersc.usgs.gov/api/uswtdb/v1";

/// Default National Weather Service API root.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.weather.gov";

/// Viewport used for Texas, the default state.
pub const TEXAS_VIEW: MapView = MapView {
    center_lat: 31.5,
    center_lon: -99.5,
    zoom: 6,
};

/// How each wind sample is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Shaft plus arrowhead pointing along the wind direction
    #[default]
    Arrows,
    /// A colored circle with a speed popup
    Markers,
}

/// Root configuration for one map-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Two-letter state code used to query turbines
    pub state: String,
    /// Grid cell size in degrees for turbine de-duplication
    pub grid_size: f64,
    /// Arrow length in degrees per mph
    pub arrow_scale: f64,
    pub style: RenderStyle,
    /// Page title; derived from the state when unset
    pub title: Option<String>,
    /// Output HTML document
    pub output: PathBuf,
    /// Initial viewport; derived from the state and turbine extent when unset
    pub view: Option<MapView>,
    /// Extra labelled reference points
    pub landmarks: Vec<Landmark>,
    pub sources: SourcesConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            state: "TX".to_string(),
            grid_size: 0.5,
            arrow_scale: renderer::DEFAULT_ARROW_SCALE,
            style: RenderStyle::default(),
            title: None,
            output: PathBuf::from("wind_speed_map.html"),
            view: None,
            landmarks: Vec::new(),
            sources: SourcesConfig::default(),
        }
    }
}

/// Upstream endpoints and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub turbine_api_url: String,
    pub weather_api_url: String,
    /// api.weather.gov rejects requests without an identifying User-Agent
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Read turbine locations from this CSV instead of the USWTDB API
    pub turbines_csv: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            turbine_api_url: DEFAULT_TURBINE_API_URL.to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            user_agent: format!("wind-map/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            turbines_csv: None,
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct MapOverrides {
    pub state: Option<String>,
    pub grid_size: Option<f64>,
    pub arrow_scale: Option<f64>,
    pub style: Option<RenderStyle>,
    pub output: Option<PathBuf>,
    pub turbines_csv: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl MapConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), state = %config.state, "Loaded map config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: MapOverrides) {
        if let Some(state) = overrides.state {
            self.state = state;
        }
        if let Some(grid_size) = overrides.grid_size {
            self.grid_size = grid_size;
        }
        if let Some(scale) = overrides.arrow_scale {
            self.arrow_scale = scale;
        }
        if let Some(style) = overrides.style {
            self.style = style;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(csv) = overrides.turbines_csv {
            self.sources.turbines_csv = Some(csv);
        }
        if let Some(user_agent) = overrides.user_agent {
            self.sources.user_agent = user_agent;
        }
    }

    /// Reject settings that would make the whole request meaningless.
    pub fn validate(&self) -> WindMapResult<()> {
        validate_grid_size(self.grid_size)?;

        if !self.arrow_scale.is_finite() || self.arrow_scale <= 0.0 {
            return Err(WindMapError::InvalidConfiguration(format!(
                "arrow scale must be positive, got {}",
                self.arrow_scale
            )));
        }

        if self.state.len() != 2 || !self.state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(WindMapError::InvalidConfiguration(format!(
                "state must be a two-letter code, got '{}'",
                self.state
            )));
        }

        if let Some(view) = &self.view {
            GeoPoint::try_new(view.center_lat, view.center_lon).map_err(|e| {
                WindMapError::InvalidConfiguration(format!("view center: {}", e))
            })?;
            if view.zoom > 19 {
                return Err(WindMapError::InvalidConfiguration(format!(
                    "view zoom must be at most 19, got {}",
                    view.zoom
                )));
            }
        }

        for landmark in &self.landmarks {
            GeoPoint::try_new(landmark.lat, landmark.lon).map_err(|e| {
                WindMapError::InvalidConfiguration(format!("landmark '{}': {}", landmark.name, e))
            })?;
        }

        if self.sources.timeout_secs == 0 {
            return Err(WindMapError::InvalidConfiguration(
                "source timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Upper-cased state code, as the turbine API expects it.
    pub fn state_code(&self) -> String {
        self.state.to_ascii_uppercase()
    }

    pub fn title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} Wind Speed and Direction Map", self.state_code()))
    }

    /// Viewport for the map: explicit config, the Texas default, or a fit to
    /// the representative points.
    pub fn resolve_view(&self, points: &[GeoPoint]) -> MapView {
        if let Some(view) = self.view {
            return view;
        }
        if self.state_code() == "TX" {
            return TEXAS_VIEW;
        }
        match BoundingBox::from_points(points) {
            Some(bbox) => MapView::new(bbox.center(), bbox.fit_zoom()),
            None => MapView::CONUS,
        }
    }
}
