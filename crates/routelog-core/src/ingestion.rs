use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use routelog_parser::{parse_timeline_document, TimelineDocument};
use tracing::{debug, info};

use crate::classify::classify;
use crate::error::{PipelineError, Result};
use crate::outputs::write_routes_csv;
use crate::routes::{build_routes, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub activities: usize,
    pub places: usize,
    pub untagged: usize,
    pub routes: usize,
}

#[derive(Debug, Default)]
pub struct IngestionBatch {
    pub routes: Vec<Route>,
    pub reports: Vec<FileReport>,
}

pub fn load_document(path: &Path) -> Result<TimelineDocument> {
    let content = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_timeline_document(&content).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Top-level `*.json` files of `dir`, in glob order. Subdirectories and dotfiles
/// (e.g. AppleDouble `._*.json` files from macOS unzips) are not searched.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped_dir = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join("*.json");
    let pattern_str = pattern.to_string_lossy();

    debug!(pattern = %pattern_str, "searching for timeline exports");

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let mut inputs = Vec::new();
    for entry in glob_with(&pattern_str, options)? {
        let path = entry?;
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file match");
            continue;
        }
        inputs.push(path);
    }

    info!(dir = %dir.display(), files = inputs.len(), "discovered timeline exports");
    Ok(inputs)
}

pub fn ingest_file(path: &Path) -> Result<(Vec<Route>, FileReport)> {
    let document = load_document(path)?;
    let timeline = classify(&document.timeline_objects);

    if timeline.untagged > 0 {
        debug!(
            path = %path.display(),
            untagged = timeline.untagged,
            "ignoring timeline objects without activity or place"
        );
    }

    let routes = build_routes(&timeline.activities, &timeline.places);
    let report = FileReport {
        path: path.to_path_buf(),
        activities: timeline.activities.len(),
        places: timeline.places.len(),
        untagged: timeline.untagged,
        routes: routes.len(),
    };

    info!(
        path = %path.display(),
        activities = report.activities,
        places = report.places,
        routes = report.routes,
        "processed timeline export"
    );

    Ok((routes, report))
}

/// Processes `paths` in order and concatenates their routes. Stops at the first failure.
pub fn ingest_files<P: AsRef<Path>>(paths: &[P]) -> Result<IngestionBatch> {
    let mut batch = IngestionBatch::default();

    for path in paths {
        let (routes, report) = ingest_file(path.as_ref())?;
        batch.routes.extend(routes);
        batch.reports.push(report);
    }

    Ok(batch)
}

pub fn ingest_directory(dir: &Path) -> Result<IngestionBatch> {
    let inputs = discover_inputs(dir)?;
    ingest_files(&inputs)
}

/// Ingest every export in `input_dir` and write the combined routes to `output`.
pub fn export_routes(input_dir: &Path, output: &Path) -> Result<IngestionBatch> {
    let batch = ingest_directory(input_dir)?;
    write_routes_csv(&batch.routes, output)?;
    Ok(batch)
}
