//! Upstream data sources: turbine locations and forecast wind.
//!
//! Both sources sit behind traits so the pipeline can run against canned
//! data in tests. Network sources only do transport; the payload parsing is
//! in plain functions that work on the response body.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use wind_common::{GeoPoint, WindMapError, WindMapResult, WindReading};

use crate::config::SourcesConfig;

const MPH_PER_METRE_PER_SECOND: f64 = 2.236_936_292_054_402;

/// One row of the U.S. Wind Turbine Database.
///
/// Only the fields the map uses are kept; everything else in the payload is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurbineRecord {
    pub case_id: Option<i64>,
    pub p_name: Option<String>,
    pub t_state: Option<String>,
    pub t_county: Option<String>,
    /// Latitude
    pub ylat: Option<f64>,
    /// Longitude
    pub xlong: Option<f64>,
}

impl TurbineRecord {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            ylat: Some(point.lat),
            xlong: Some(point.lon),
            ..Default::default()
        }
    }

    /// Validated location, if the record has one.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.ylat, self.xlong) {
            (Some(lat), Some(lon)) => GeoPoint::try_new(lat, lon).ok(),
            _ => None,
        }
    }
}

/// Provider of turbine records for a state.
#[async_trait]
pub trait TurbineSource: Send + Sync {
    async fn fetch_turbines(&self, state: &str) -> WindMapResult<Vec<TurbineRecord>>;
}

/// Provider of the current forecast wind at a point.
///
/// `Ok(None)` means the point is valid but has no forecast coverage.
#[async_trait]
pub trait WeatherGridSource: Send + Sync {
    async fn fetch_wind(&self, point: GeoPoint) -> WindMapResult<Option<WindReading>>;
}

/// Shared HTTP client for both network sources.
pub fn build_client(config: &SourcesConfig) -> WindMapResult<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/geo+json, application/json"),
    );

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout())
        .build()
        .map_err(|e| {
            WindMapError::InvalidConfiguration(format!("failed to create HTTP client: {}", e))
        })
}

/// Turbine source selected by configuration: the CSV file when one is set,
/// otherwise the USWTDB API over `client`.
pub fn turbine_source(config: &SourcesConfig, client: &Client) -> Box<dyn TurbineSource> {
    if let Some(path) = &config.turbines_csv {
        info!(path = %path.display(), "Using turbine CSV");
        return Box::new(CsvTurbineSource::new(path.clone()));
    }
    Box::new(UswtdbSource::new(
        client.clone(),
        config.turbine_api_url.clone(),
    ))
}

fn unavailable(url: &str, err: reqwest::Error) -> WindMapError {
    WindMapError::DataSourceUnavailable(format!("{}: {}", url, err))
}

/// The USWTDB REST API.
pub struct UswtdbSource {
    client: Client,
    base_url: String,
}

impl UswtdbSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn turbines_url(&self, state: &str) -> String {
        format!(
            "{}/turbines?t_state=eq.{}",
            self.base_url.trim_end_matches('/'),
            state.to_ascii_uppercase()
        )
    }
}

#[async_trait]
impl TurbineSource for UswtdbSource {
    #[instrument(skip(self))]
    async fn fetch_turbines(&self, state: &str) -> WindMapResult<Vec<TurbineRecord>> {
        let url = self.turbines_url(state);

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| unavailable(&url, e))?
            .text()
            .await
            .map_err(|e| unavailable(&url, e))?;

        let turbines = parse_turbines(&body)?;
        info!(count = turbines.len(), "Fetched turbine records");
        Ok(turbines)
    }
}

/// Turbine locations from a `Latitude,Longitude` CSV, as written by the
/// `export-turbines` command. The state argument is ignored.
pub struct CsvTurbineSource {
    path: PathBuf,
}

impl CsvTurbineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Latitude")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    longitude: Option<f64>,
}

#[async_trait]
impl TurbineSource for CsvTurbineSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_turbines(&self, _state: &str) -> WindMapResult<Vec<TurbineRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            WindMapError::DataSourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let turbines = parse_turbine_csv(&content)?;
        info!(count = turbines.len(), "Read turbine records from CSV");
        Ok(turbines)
    }
}

/// Parse a turbine CSV body.
pub fn parse_turbine_csv(content: &str) -> WindMapResult<Vec<TurbineRecord>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|row| {
            let row = row.map_err(|e| WindMapError::ParseError(format!("CSV error: {}", e)))?;
            Ok(TurbineRecord {
                ylat: row.latitude,
                xlong: row.longitude,
                ..Default::default()
            })
        })
        .collect()
}

/// Parse a USWTDB `/turbines` response.
pub fn parse_turbines(body: &str) -> WindMapResult<Vec<TurbineRecord>> {
    Ok(serde_json::from_str(body)?)
}

/// api.weather.gov point metadata and gridpoint forecasts.
pub struct NwsGridSource {
    client: Client,
    base_url: String,
}

impl NwsGridSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The API redirects anything more precise than four decimals.
    pub fn points_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/points/{:.4},{:.4}",
            self.base_url.trim_end_matches('/'),
            point.lat,
            point.lon
        )
    }

    /// GET a JSON body; `Ok(None)` on 404.
    async fn get_body(&self, url: &str) -> WindMapResult<Option<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .map_err(|e| unavailable(url, e))?
            .text()
            .await
            .map_err(|e| unavailable(url, e))?;
        Ok(Some(body))
    }
}

#[async_trait]
impl WeatherGridSource for NwsGridSource {
    #[instrument(skip(self), fields(point = %point))]
    async fn fetch_wind(&self, point: GeoPoint) -> WindMapResult<Option<WindReading>> {
        let points_url = self.points_url(point);
        let Some(body) = self.get_body(&points_url).await? else {
            debug!("Point is outside forecast coverage");
            return Ok(None);
        };

        let Some(grid_url) = parse_forecast_grid_url(&body)? else {
            debug!("No forecast grid for point");
            return Ok(None);
        };

        let Some(body) = self.get_body(&grid_url).await? else {
            warn!(url = %grid_url, "Forecast grid not found");
            return Ok(None);
        };

        parse_grid_wind(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(rename = "forecastGridData")]
    forecast_grid_data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GridpointResponse {
    properties: GridpointProperties,
}

#[derive(Debug, Deserialize)]
struct GridpointProperties {
    #[serde(rename = "windSpeed")]
    wind_speed: Option<GridSeries>,
    #[serde(rename = "windDirection")]
    wind_direction: Option<GridSeries>,
}

#[derive(Debug, Deserialize)]
struct GridSeries {
    uom: Option<String>,
    #[serde(default)]
    values: Vec<GridValue>,
}

impl GridSeries {
    fn first_value(&self) -> Option<f64> {
        self.values.first().and_then(|v| v.value)
    }
}

#[derive(Debug, Deserialize)]
struct GridValue {
    value: Option<f64>,
}

/// `properties.forecastGridData` of a `/points` response.
pub fn parse_forecast_grid_url(body: &str) -> WindMapResult<Option<String>> {
    let response: PointsResponse = serde_json::from_str(body)?;
    Ok(response
        .properties
        .forecast_grid_data
        .filter(|url| !url.is_empty()))
}

/// First wind speed and direction of a gridpoint forecast, in mph.
pub fn parse_grid_wind(body: &str) -> WindMapResult<Option<WindReading>> {
    let response: GridpointResponse = serde_json::from_str(body)?;
    let properties = response.properties;

    let (Some(speed), Some(direction)) = (properties.wind_speed, properties.wind_direction) else {
        return Ok(None);
    };
    let (Some(speed_value), Some(direction_deg)) = (speed.first_value(), direction.first_value())
    else {
        return Ok(None);
    };

    let speed_mph = speed_to_mph(speed_value, speed.uom.as_deref())?;
    Ok(Some(WindReading::new(speed_mph, direction_deg)))
}

fn speed_to_mph(value: f64, uom: Option<&str>) -> WindMapResult<f64> {
    match uom {
        None | Some("wmoUnit:mi_h-1") => Ok(value),
        Some("wmoUnit:km_h-1") => Ok(WindReading::from_kmh(value, 0.0).speed_mph),
        Some("wmoUnit:m_s-1") => Ok(value * MPH_PER_METRE_PER_SECOND),
        Some(other) => Err(WindMapError::ParseError(format!(
            "unsupported wind speed unit '{}'",
            other
        ))),
    }
}
