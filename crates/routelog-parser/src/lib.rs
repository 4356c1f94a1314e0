pub mod errors;
pub mod model;

pub use errors::ParserError;
pub use model::{
    ActivitySegment, Duration, Location, PlaceVisit, TimelineDocument, TimelineEntry,
    TimelineObject, Timestamp,
};

/// Parses the full contents of one location-history JSON export.
pub fn parse_timeline_document(content: &str) -> Result<TimelineDocument, ParserError> {
    Ok(serde_json::from_str(content)?)
}
