use geo::Point;
use log::{debug, warn};
use rayon::prelude::*;
use serde_json::Value as JsonValue;

use crate::error::GeoQueryError;
use crate::math::{haversine_distance, polygon_area};
use crate::model::{Feature, FeatureCollection, Geometry};

/// The feature closest to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    /// Position of the feature in its collection.
    pub index: usize,
    pub feature: &'a Feature,
    pub distance_km: f64,
}

fn feature_at(collection: &FeatureCollection, index: usize) -> Result<&Feature, GeoQueryError> {
    if collection.is_empty() {
        return Err(GeoQueryError::EmptyCollection);
    }
    collection
        .get(index)
        .ok_or(GeoQueryError::FeatureIndexOutOfRange {
            index,
            len: collection.len(),
        })
}

fn require_features(
    collection: &FeatureCollection,
    operand: &'static str,
) -> Result<(), GeoQueryError> {
    if collection.is_empty() {
        return Err(GeoQueryError::InvalidInput { operand });
    }
    Ok(())
}

fn point_of(feature: &Feature) -> Result<Point<f64>, GeoQueryError> {
    match &feature.geometry {
        Geometry::Point(p) => Ok(*p),
        other => Err(GeoQueryError::WrongGeometryType {
            expected: "Point",
            found: other.type_name().to_string(),
        }),
    }
}

/// Geometry type of the first feature.
pub fn geometry_type_of(collection: &FeatureCollection) -> Result<&'static str, GeoQueryError> {
    geometry_type_at(collection, 0)
}

pub fn geometry_type_at(
    collection: &FeatureCollection,
    index: usize,
) -> Result<&'static str, GeoQueryError> {
    Ok(feature_at(collection, index)?.geometry.type_name())
}

/// Raw coordinates of the first feature, as nested JSON arrays.
pub fn coordinates_of(collection: &FeatureCollection) -> Result<JsonValue, GeoQueryError> {
    coordinates_at(collection, 0)
}

pub fn coordinates_at(
    collection: &FeatureCollection,
    index: usize,
) -> Result<JsonValue, GeoQueryError> {
    Ok(feature_at(collection, index)?.geometry.coordinates())
}

/// Planar area of the first feature's exterior ring.
///
/// Coordinates are taken as plain `x`/`y` values, so for `[lon, lat]` data the
/// result is in square degrees and distorts with latitude.
pub fn polygon_area_of(collection: &FeatureCollection) -> Result<f64, GeoQueryError> {
    polygon_area_at(collection, 0)
}

pub fn polygon_area_at(collection: &FeatureCollection, index: usize) -> Result<f64, GeoQueryError> {
    require_features(collection, "input")?;
    let feature = feature_at(collection, index)?;

    let Geometry::Polygon(rings) = &feature.geometry else {
        return Err(GeoQueryError::WrongGeometryType {
            expected: "Polygon",
            found: feature.geometry.type_name().to_string(),
        });
    };

    let exterior = rings.first().ok_or_else(|| {
        GeoQueryError::MalformedCoordinates("polygon has no rings".to_string())
    })?;
    polygon_area(&exterior.0)
}

/// Great-circle distance in kilometers between the first point of each collection.
pub fn distance_between(a: &FeatureCollection, b: &FeatureCollection) -> Result<f64, GeoQueryError> {
    require_features(a, "first")?;
    require_features(b, "second")?;

    let p = point_of(&a.features[0])?;
    let q = point_of(&b.features[0])?;

    Ok(haversine_distance(p.y(), p.x(), q.y(), q.x()))
}

/// Distance from the query point to `feature`, or `None` when it is not a point.
fn distance_to(index: usize, feature: &Feature, latitude: f64, longitude: f64) -> Option<f64> {
    match &feature.geometry {
        Geometry::Point(p) => Some(haversine_distance(latitude, longitude, p.y(), p.x())),
        other => {
            warn!(
                "skipping feature {} in nearest search: {} geometry",
                index,
                other.type_name()
            );
            None
        }
    }
}

/// Find the point feature closest to `(latitude, longitude)` with a single linear scan.
///
/// Non-point features are skipped. Ties keep the earliest feature. Returns `None`
/// when the collection holds no point features at all.
pub fn nearest_feature(
    collection: &FeatureCollection,
    latitude: f64,
    longitude: f64,
) -> Result<Option<Nearest<'_>>, GeoQueryError> {
    require_features(collection, "input")?;

    let mut best: Option<Nearest> = None;
    for (index, feature) in collection.features.iter().enumerate() {
        let Some(distance_km) = distance_to(index, feature, latitude, longitude) else {
            continue;
        };
        if best.is_none_or(|b| distance_km < b.distance_km) {
            best = Some(Nearest {
                index,
                feature,
                distance_km,
            });
        }
    }

    debug!(
        "nearest to ({latitude}, {longitude}) among {} features: {:?}",
        collection.len(),
        best.map(|b| (b.index, b.distance_km))
    );
    Ok(best)
}

/// Parallel variant of [`nearest_feature`] with the same result, including tie-breaks.
pub fn nearest_feature_par(
    collection: &FeatureCollection,
    latitude: f64,
    longitude: f64,
) -> Result<Option<Nearest<'_>>, GeoQueryError> {
    require_features(collection, "input")?;

    let best = collection
        .features
        .par_iter()
        .enumerate()
        .filter_map(|(index, feature)| {
            distance_to(index, feature, latitude, longitude).map(|distance_km| Nearest {
                index,
                feature,
                distance_km,
            })
        })
        .reduce_with(|a, b| {
            if b.distance_km < a.distance_km || (b.distance_km == a.distance_km && b.index < a.index) {
                b
            } else {
                a
            }
        });

    debug!(
        "parallel nearest to ({latitude}, {longitude}) among {} features: {:?}",
        collection.len(),
        best.map(|b| (b.index, b.distance_km))
    );
    Ok(best)
}
