//! Canned upstream payloads.
//!
//! Trimmed copies of real responses: only the fields the wind map reads are
//! kept, plus a few neighbours so parsers are exercised against extra keys.

/// Well-known coordinates in Texas.
pub mod places {
    pub const HOUSTON: (f64, f64) = (29.7604, -95.3698);
    pub const DALLAS: (f64, f64) = (32.7767, -96.7970);
    pub const AUSTIN: (f64, f64) = (30.2672, -97.7431);
    pub const SAN_ANTONIO: (f64, f64) = (29.4241, -98.4936);
    pub const LUBBOCK: (f64, f64) = (33.7490, -101.8552);
    pub const EL_PASO: (f64, f64) = (31.7619, -106.4850);
}

/// USWTDB `/turbines?t_state=eq.TX` response with three turbines, two of which
/// share a half-degree grid cell.
pub const USWTDB_TURBINES_TX: &str = r#"[
  {
    "case_id": 3072661,
    "faa_ors": "48-028523",
    "t_state": "TX",
    "t_county": "Nolan County",
    "p_name": "Sweetwater I",
    "p_year": 2003,
    "t_cap": 1300,
    "ylat": 32.4487,
    "xlong": -100.4245
  },
  {
    "case_id": 3072662,
    "faa_ors": "48-028524",
    "t_state": "TX",
    "t_county": "Nolan County",
    "p_name": "Sweetwater I",
    "p_year": 2003,
    "t_cap": 1300,
    "ylat": 32.4501,
    "xlong": -100.4198
  },
  {
    "case_id": 3104480,
    "faa_ors": null,
    "t_state": "TX",
    "t_county": "Starr County",
    "p_name": "Los Vientos III",
    "p_year": 2015,
    "t_cap": null,
    "ylat": 26.3563,
    "xlong": -98.6559
  }
]"#;

/// USWTDB row missing its coordinates.
pub const USWTDB_TURBINE_NO_COORDS: &str = r#"[
  { "case_id": 1, "t_state": "TX", "ylat": null, "xlong": -100.0 }
]"#;

/// api.weather.gov `/points/{lat},{lon}` response for a covered location.
pub const NWS_POINTS_COVERED: &str = r#"{
  "@context": [],
  "id": "https://api.weather.gov/points/32.4487,-100.4245",
  "type": "Feature",
  "properties": {
    "@id": "https://api.weather.gov/points/32.4487,-100.4245",
    "cwa": "SJT",
    "gridId": "SJT",
    "gridX": 55,
    "gridY": 91,
    "forecast": "https://api.weather.gov/gridpoints/SJT/55,91/forecast",
    "forecastGridData": "https://api.weather.gov/gridpoints/SJT/55,91",
    "timeZone": "America/Chicago"
  }
}"#;

/// `/points` response offshore: the point resolves but has no forecast grid.
pub const NWS_POINTS_NO_GRID: &str = r#"{
  "type": "Feature",
  "properties": {
    "cwa": "HGX",
    "forecastGridData": null
  }
}"#;

/// Gridpoint forecast with speeds in km/h, as api.weather.gov serves them.
pub const NWS_GRIDPOINT_KMH: &str = r#"{
  "type": "Feature",
  "properties": {
    "updateTime": "2024-03-01T11:52:17+00:00",
    "windDirection": {
      "uom": "wmoUnit:degree_(angle)",
      "values": [
        { "validTime": "2024-03-01T12:00:00+00:00/PT3H", "value": 200 },
        { "validTime": "2024-03-01T15:00:00+00:00/PT1H", "value": 210 }
      ]
    },
    "windSpeed": {
      "uom": "wmoUnit:km_h-1",
      "values": [
        { "validTime": "2024-03-01T12:00:00+00:00/PT3H", "value": 32.18688 },
        { "validTime": "2024-03-01T15:00:00+00:00/PT1H", "value": 35.4 }
      ]
    }
  }
}"#;

/// Gridpoint forecast without a unit annotation; speeds are taken as mph.
pub const NWS_GRIDPOINT_NO_UOM: &str = r#"{
  "properties": {
    "windDirection": { "values": [ { "validTime": "x", "value": 90 } ] },
    "windSpeed": { "values": [ { "validTime": "x", "value": 14.0 } ] }
  }
}"#;

/// Gridpoint forecast whose first wind speed is null.
pub const NWS_GRIDPOINT_NULL_SPEED: &str = r#"{
  "properties": {
    "windDirection": { "uom": "wmoUnit:degree_(angle)", "values": [ { "validTime": "x", "value": 90 } ] },
    "windSpeed": { "uom": "wmoUnit:km_h-1", "values": [ { "validTime": "x", "value": null } ] }
  }
}"#;

/// Gridpoint forecast with empty wind series.
pub const NWS_GRIDPOINT_EMPTY: &str = r#"{
  "properties": {
    "windDirection": { "values": [] },
    "windSpeed": { "values": [] }
  }
}"#;

/// Turbine CSV as written by the export command.
pub const TURBINE_CSV: &str = "Latitude,Longitude\n32.4487,-100.4245\n32.4501,-100.4198\n26.3563,-98.6559\n";
