use geo::Coord;
use std::f64::consts::PI;

use crate::error::GeoQueryError;

/// Mean Earth radius used by [`haversine_distance`], in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Convert an angle from degrees to radians.
#[inline]
pub fn to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Area of a ring using the shoelace formula.
///
/// The ring may be open or closed; a repeated closing point contributes nothing.
/// The result is in the squared unit of the input, so for `[lon, lat]` rings it is
/// a planar area in square degrees, not a geodesic area on the ellipsoid.
///
/// Rings with fewer than three points are rejected.
pub fn polygon_area(ring: &[Coord<f64>]) -> Result<f64, GeoQueryError> {
    if ring.len() < 3 {
        return Err(GeoQueryError::MalformedCoordinates(format!(
            "ring needs at least 3 points, got {}",
            ring.len()
        )));
    }

    let mut area = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        area += (ring[j].x + ring[i].x) * (ring[j].y - ring[i].y);
        j = i;
    }

    Ok((area / 2.0).abs())
}

/// Great-circle distance in kilometers between two points given in degrees.
///
/// Note the argument order: latitude first for each point. Uses a fixed
/// [`EARTH_RADIUS_KM`] rather than `geo`'s mean radius, so results differ from
/// `geo::Haversine` by a few parts per million.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = to_radians(lat2 - lat1);
    let d_lon = to_radians(lon2 - lon1);

    // Rounding can push `a` just past 1 for antipodal points.
    let a = ((d_lat / 2.0).sin().powi(2)
        + to_radians(lat1).cos() * to_radians(lat2).cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
