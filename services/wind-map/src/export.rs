//! Turbine location export.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};
use wind_common::{WindMapError, WindMapResult};

use crate::sources::TurbineRecord;

fn csv_error(err: csv::Error) -> WindMapError {
    if err.is_io_error() {
        WindMapError::IoError(err.to_string())
    } else {
        WindMapError::ParseError(format!("CSV error: {}", err))
    }
}

/// Write `Latitude,Longitude` rows for every record with a location.
///
/// Returns the number of rows written.
pub fn write_turbine_csv<W: Write>(records: &[TurbineRecord], writer: W) -> WindMapResult<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(["Latitude", "Longitude"])
        .map_err(csv_error)?;

    let mut written = 0;
    let mut skipped = 0;
    for record in records {
        let Some(point) = record.location() else {
            skipped += 1;
            continue;
        };
        writer
            .serialize((point.lat, point.lon))
            .map_err(csv_error)?;
        written += 1;
    }
    writer.flush()?;

    if skipped > 0 {
        warn!(skipped, "Skipped turbine records without coordinates");
    }
    Ok(written)
}

/// Export turbine locations to a CSV file, creating parent directories.
pub fn export_turbine_locations(records: &[TurbineRecord], path: &Path) -> WindMapResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let written = write_turbine_csv(records, file)?;

    info!(path = %path.display(), rows = written, "Turbine locations saved");
    Ok(written)
}
