//! Configuration loading, overrides and validation.

use std::path::PathBuf;

use renderer::MapView;
use wind_common::{GeoPoint, WindMapError};
use wind_map::config::TEXAS_VIEW;
use wind_map::{MapConfig, MapOverrides, RenderStyle};

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wind-map.yaml");
    std::fs::write(
        &path,
        "state: OK\ngrid_size: 1.0\nsources:\n  turbines_csv: data/turbines.csv\n",
    )
    .unwrap();

    let config = MapConfig::load(&path).unwrap();

    assert_eq!(config.state, "OK");
    assert_eq!(config.grid_size, 1.0);
    assert_eq!(config.arrow_scale, 0.01);
    assert_eq!(
        config.sources.turbines_csv,
        Some(PathBuf::from("data/turbines.csv"))
    );
}

#[test]
fn test_load_missing_file_names_path() {
    let err = MapConfig::load(std::path::Path::new("/nonexistent/wind-map.yaml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/wind-map.yaml"));
}

#[test]
fn test_load_or_default_without_path() {
    let config = MapConfig::load_or_default(None).unwrap();
    assert_eq!(config.state, "TX");
}

#[test]
fn test_unknown_style_is_rejected() {
    assert!(MapConfig::from_yaml("style: heatmap\n").is_err());
}

#[test]
fn test_overrides_take_precedence() {
    let mut config = MapConfig::from_yaml("state: KS\ngrid_size: 2.0\n").unwrap();

    config.apply_overrides(MapOverrides {
        grid_size: Some(0.25),
        style: Some(RenderStyle::Markers),
        output: Some(PathBuf::from("maps/ks.html")),
        user_agent: Some("ops@example.com".to_string()),
        ..Default::default()
    });

    // Unset overrides keep the file value.
    assert_eq!(config.state, "KS");
    assert_eq!(config.grid_size, 0.25);
    assert_eq!(config.style, RenderStyle::Markers);
    assert_eq!(config.output, PathBuf::from("maps/ks.html"));
    assert_eq!(config.sources.user_agent, "ops@example.com");
}

fn invalid(config: MapConfig) -> bool {
    matches!(config.validate(), Err(WindMapError::InvalidConfiguration(_)))
}

#[test]
fn test_validate_rejects_bad_values() {
    assert!(invalid(MapConfig {
        grid_size: 0.0,
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        grid_size: -1.0,
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        grid_size: f64::NAN,
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        arrow_scale: 0.0,
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        state: "Texas".to_string(),
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        state: "T1".to_string(),
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        view: Some(MapView {
            center_lat: 95.0,
            center_lon: 0.0,
            zoom: 4,
        }),
        ..Default::default()
    }));
    assert!(invalid(MapConfig {
        view: Some(MapView {
            center_lat: 35.0,
            center_lon: -98.0,
            zoom: 22,
        }),
        ..Default::default()
    }));

    let mut config = MapConfig::default();
    config.sources.timeout_secs = 0;
    assert!(invalid(config));
}

#[test]
fn test_lowercase_state_is_accepted() {
    let config = MapConfig {
        state: "tx".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    assert_eq!(config.state_code(), "TX");
    assert_eq!(config.title(), "TX Wind Speed and Direction Map");
}

#[test]
fn test_resolve_view() {
    let points = [GeoPoint::new(41.0, -95.0), GeoPoint::new(43.0, -91.0)];

    assert_eq!(MapConfig::default().resolve_view(&points), TEXAS_VIEW);

    let explicit = MapView::new(GeoPoint::new(40.0, -100.0), 5);
    let config = MapConfig {
        view: Some(explicit),
        ..Default::default()
    };
    assert_eq!(config.resolve_view(&points), explicit);

    let iowa = MapConfig {
        state: "IA".to_string(),
        ..Default::default()
    };
    let view = iowa.resolve_view(&points);
    assert_eq!(view.center(), GeoPoint::new(42.0, -93.0));
    assert_eq!(iowa.resolve_view(&[]), MapView::CONUS);
}
