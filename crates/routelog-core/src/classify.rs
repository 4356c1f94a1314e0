use routelog_parser::{ActivitySegment, PlaceVisit, TimelineEntry, TimelineObject};

/// Activities and place visits of one document, each in document order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedTimeline<'a> {
    pub activities: Vec<&'a ActivitySegment>,
    pub places: Vec<&'a PlaceVisit>,
    /// Objects carrying neither key; counted, never returned.
    pub untagged: usize,
}

pub fn classify(objects: &[TimelineObject]) -> ClassifiedTimeline<'_> {
    let mut classified = ClassifiedTimeline::default();

    for object in objects {
        match object.entry() {
            TimelineEntry::Activity(segment) => classified.activities.push(segment),
            TimelineEntry::Place(visit) => classified.places.push(visit),
            TimelineEntry::Untagged => classified.untagged += 1,
        }
    }

    classified
}
