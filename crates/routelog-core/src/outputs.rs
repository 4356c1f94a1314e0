use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serializer;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::routes::Route;

pub const ROUTE_COLUMNS: [&str; 5] = [
    "start_date",
    "end_date",
    "start_address",
    "end_address",
    "distance_in_miles",
];

/// Create (or truncate) `path` and write the header plus one row per route.
pub fn write_routes_csv(routes: &[Route], path: &Path) -> Result<()> {
    let csv_error = |source: csv::Error| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|err| csv_error(err.into()))?;
    write_routes(routes, file).map_err(csv_error)?;

    info!(path = %path.display(), rows = routes.len(), "wrote route CSV");
    Ok(())
}

/// The header is written explicitly so an empty batch still yields a header row.
pub fn write_routes<W: Write>(routes: &[Route], sink: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);

    writer.write_record(ROUTE_COLUMNS)?;
    for route in routes {
        writer.serialize(route)?;
    }
    writer.flush()?;
    Ok(())
}

/// Shortest round-trip digits. Plain notation with at least one fractional digit for
/// decimal exponents in `-4..16`, otherwise a signed two-digit exponent (`1.5e-06`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

pub(crate) fn serialize_float<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_float(*value))
}
