use geo_types::Point;

/// One directed road route between two stops.
///
/// Geometry points are ordered along the direction of travel with x as
/// longitude and y as latitude; the first and last points sit at the leg
/// endpoints, and there are always at least two of them.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub geometry: Vec<Point>,
}
