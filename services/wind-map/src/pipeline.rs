//! Map generation pipeline.
//!
//! Fetch turbines, keep one representative per grid cell, look up the
//! forecast wind at each representative in turn and hand the classified
//! geometry to a `MapSink`. A failure at one representative only costs that
//! point; only configuration and I/O errors abort the run.

use metrics::counter;
use renderer::{Legend, MapSink, Marker, WindSampleExt};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wind_common::{bucket, GeoPoint, WindMapResult};

use crate::config::{MapConfig, RenderStyle};
use crate::sources::{TurbineSource, WeatherGridSource};

/// Representatives handled so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in `[0, 1]`; an empty run counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// What happened during one map-generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    /// Turbine records returned by the source
    pub turbines: usize,
    /// Records with usable coordinates
    pub located: usize,
    /// Grid cell representatives
    pub representatives: usize,
    /// Representatives that produced a wind sample
    pub samples: usize,
    pub skipped_no_forecast: usize,
    pub skipped_unavailable: usize,
    pub skipped_invalid: usize,
    pub segments: usize,
    pub markers: usize,
    pub cancelled: bool,
}

impl MapSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_no_forecast + self.skipped_unavailable + self.skipped_invalid
    }
}

/// Run one map-generation pass into `sink`.
///
/// `cancel` is checked before each representative; a cancelled run still
/// finishes the sink with what was gathered. `on_progress` is called after
/// every representative.
pub async fn generate_map<S: MapSink>(
    config: &MapConfig,
    turbines: &dyn TurbineSource,
    weather: &dyn WeatherGridSource,
    mut sink: S,
    cancel: &CancellationToken,
    mut on_progress: impl FnMut(Progress),
) -> WindMapResult<(S::Output, MapSummary)> {
    config.validate()?;

    let state = config.state_code();
    let mut summary = MapSummary::default();

    let records = match turbines.fetch_turbines(&state).await {
        Ok(records) => records,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            error!(state = %state, error = %e, "Failed to fetch turbine data");
            counter!("wind_map_source_errors_total", "source" => "turbines").increment(1);
            Vec::new()
        }
    };
    summary.turbines = records.len();

    let locations: Vec<GeoPoint> = records.iter().filter_map(|r| r.location()).collect();
    summary.located = locations.len();
    if summary.located < summary.turbines {
        warn!(
            dropped = summary.turbines - summary.located,
            "Ignoring turbine records without valid coordinates"
        );
    }

    let representatives = bucket(&locations, config.grid_size)?;
    summary.representatives = representatives.len();
    info!(
        state = %state,
        turbines = summary.turbines,
        representatives = summary.representatives,
        grid_size = config.grid_size,
        "Selected representative turbines"
    );

    sink.set_view(config.resolve_view(&representatives));

    let total = representatives.len();
    for (idx, point) in representatives.iter().copied().enumerate() {
        if cancel.is_cancelled() {
            warn!(processed = idx, total, "Map generation cancelled");
            summary.cancelled = true;
            break;
        }

        match weather.fetch_wind(point).await {
            Ok(Some(reading)) => {
                let sample = reading.at(point);
                let rendered = match config.style {
                    RenderStyle::Arrows => sample.arrow(config.arrow_scale).map(|arrow| {
                        for segment in arrow.segments() {
                            sink.add_segment(&segment);
                            summary.segments += 1;
                        }
                    }),
                    RenderStyle::Markers => Marker::for_sample(&sample).map(|marker| {
                        sink.add_marker(marker);
                        summary.markers += 1;
                    }),
                };

                match rendered {
                    Ok(()) => {
                        summary.samples += 1;
                        counter!("wind_map_samples_rendered_total").increment(1);
                    }
                    Err(e) => {
                        warn!(point = %point, error = %e, "Skipping unusable wind sample");
                        summary.skipped_invalid += 1;
                        counter!("wind_map_points_skipped_total", "reason" => e.code())
                            .increment(1);
                    }
                }
            }
            Ok(None) => {
                debug!(point = %point, "No forecast grid, skipping");
                summary.skipped_no_forecast += 1;
                counter!("wind_map_points_skipped_total", "reason" => "no_forecast_available")
                    .increment(1);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(point = %point, error = %e, "Weather lookup failed, skipping");
                summary.skipped_unavailable += 1;
                counter!("wind_map_points_skipped_total", "reason" => e.code()).increment(1);
            }
        }

        counter!("wind_map_representatives_processed_total").increment(1);
        let progress = Progress {
            processed: idx + 1,
            total,
        };
        debug!(processed = progress.processed, total, "Progress");
        on_progress(progress);
    }

    for landmark in &config.landmarks {
        sink.add_landmark(landmark);
    }
    sink.set_legend(Legend::wind_speed());

    let output = sink.finish()?;

    info!(
        samples = summary.samples,
        skipped = summary.skipped(),
        cancelled = summary.cancelled,
        "Map generation complete"
    );
    Ok((output, summary))
}
