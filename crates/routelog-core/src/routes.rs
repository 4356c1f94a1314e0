use routelog_parser::{ActivitySegment, PlaceVisit, Timestamp};
use serde::Serialize;
use tracing::debug;

/// Meters per mile as used by existing route exports. Not the exact 1609.344.
pub const METERS_PER_MILE: f64 = 1609.34;

/// One travel leg, serialized in CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    #[serde(serialize_with = "crate::outputs::serialize_float")]
    pub distance_in_miles: f64,
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Address of the first place whose visit began when the activity ended.
pub fn find_end_place<'a>(
    travel_end_time: Option<&Timestamp>,
    places: &[&'a PlaceVisit],
) -> Option<&'a str> {
    let end_time = travel_end_time?;
    places
        .iter()
        .find(|place| place.visit_start_time() == Some(end_time))
        .and_then(|place| place.address())
}

/// Address of the first place whose visit ended when the activity started.
pub fn find_start_place<'a>(
    travel_start_time: Option<&Timestamp>,
    places: &[&'a PlaceVisit],
) -> Option<&'a str> {
    let start_time = travel_start_time?;
    places
        .iter()
        .find(|place| place.visit_end_time() == Some(start_time))
        .and_then(|place| place.address())
}

pub fn build_route(activity: &ActivitySegment, places: &[&PlaceVisit]) -> Route {
    let start_time = activity.start_time();
    let end_time = activity.end_time();

    let start_address = find_start_place(start_time, places);
    let end_address = find_end_place(end_time, places);

    if start_address.is_none() || end_address.is_none() {
        debug!(
            start = start_time.map(Timestamp::as_str),
            end = end_time.map(Timestamp::as_str),
            has_start_address = start_address.is_some(),
            has_end_address = end_address.is_some(),
            "activity missing an adjacent place address"
        );
    }

    Route {
        start_date: start_time.cloned(),
        end_date: end_time.cloned(),
        start_address: start_address.map(str::to_owned),
        end_address: end_address.map(str::to_owned),
        distance_in_miles: meters_to_miles(activity.distance_meters()),
    }
}

/// One route per activity, in activity order.
pub fn build_routes(activities: &[&ActivitySegment], places: &[&PlaceVisit]) -> Vec<Route> {
    activities
        .iter()
        .map(|activity| build_route(activity, places))
        .collect()
}
