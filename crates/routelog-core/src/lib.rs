pub mod classify;
pub mod error;
pub mod ingestion;
pub mod outputs;
pub mod routes;

pub use classify::{classify, ClassifiedTimeline};
pub use error::{PipelineError, Result};
pub use ingestion::{
    discover_inputs, export_routes, ingest_directory, ingest_file, ingest_files, load_document,
    FileReport, IngestionBatch,
};
pub use outputs::{format_float, write_routes, write_routes_csv, ROUTE_COLUMNS};
pub use routes::{
    build_route, build_routes, find_end_place, find_start_place, meters_to_miles, Route,
    METERS_PER_MILE,
};
