use geo::{Coord, LineString, Point};
use serde_json::{Value as JsonValue, json};

use crate::error::GeoQueryError;

/// Free-form feature properties. Values are carried through untouched.
pub type Properties = geojson::JsonObject;

/// Geometry of a single feature.
///
/// Only points and polygons are computed over; every other GeoJSON geometry is
/// kept as-is so it survives a load/save round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// `x` is longitude, `y` is latitude.
    Point(Point<f64>),
    /// Ring 0 is the exterior. Rings are stored exactly as given, open or closed.
    Polygon(Vec<LineString<f64>>),
    Other(geojson::Value),
}

impl Geometry {
    /// The GeoJSON `type` tag of this geometry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Other(value) => value_type_name(value),
        }
    }

    /// The raw GeoJSON `coordinates` member. `Null` for a geometry collection.
    pub fn coordinates(&self) -> JsonValue {
        match self {
            Geometry::Point(p) => json!([p.x(), p.y()]),
            Geometry::Polygon(rings) => json!(rings_to_positions(rings)),
            Geometry::Other(value) => match value {
                geojson::Value::Point(p) => json!(p),
                geojson::Value::MultiPoint(v) => json!(v),
                geojson::Value::LineString(v) => json!(v),
                geojson::Value::MultiLineString(v) => json!(v),
                geojson::Value::Polygon(v) => json!(v),
                geojson::Value::MultiPolygon(v) => json!(v),
                geojson::Value::GeometryCollection(_) => JsonValue::Null,
            },
        }
    }
}

fn value_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn rings_to_positions(rings: &[LineString<f64>]) -> Vec<Vec<Vec<f64>>> {
    rings
        .iter()
        .map(|ring| ring.0.iter().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

/// Positions used in computations must be exactly `[lon, lat]`.
fn coord_from_position(position: &[f64]) -> Result<Coord<f64>, GeoQueryError> {
    match position {
        &[x, y] => Ok(Coord { x, y }),
        _ => Err(GeoQueryError::MalformedCoordinates(format!(
            "expected [lon, lat], got {} values",
            position.len()
        ))),
    }
}

impl TryFrom<geojson::Value> for Geometry {
    type Error = GeoQueryError;

    fn try_from(value: geojson::Value) -> Result<Self, Self::Error> {
        match value {
            geojson::Value::Point(position) => Ok(Geometry::Point(Point::from(
                coord_from_position(&position)?,
            ))),
            geojson::Value::Polygon(rings) => {
                if rings.is_empty() {
                    return Err(GeoQueryError::MalformedCoordinates(
                        "polygon has no rings".to_string(),
                    ));
                }
                let rings = rings
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .map(|p| coord_from_position(p))
                            .collect::<Result<Vec<_>, _>>()
                            .map(LineString::new)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::Polygon(rings))
            }
            other => Ok(Geometry::Other(other)),
        }
    }
}

impl From<&Geometry> for geojson::Value {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(p) => geojson::Value::Point(vec![p.x(), p.y()]),
            Geometry::Polygon(rings) => geojson::Value::Polygon(rings_to_positions(rings)),
            Geometry::Other(value) => value.clone(),
        }
    }
}

/// One geometry with its properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// A point feature with no properties.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::new(Geometry::Point(Point::new(lon, lat)), Properties::new())
    }

    /// Convert a parsed GeoJSON feature; `index` is only used for error reporting.
    pub fn from_geojson(index: usize, feature: geojson::Feature) -> Result<Self, GeoQueryError> {
        let geometry = feature
            .geometry
            .ok_or(GeoQueryError::MissingGeometry { index })?;

        Ok(Self {
            geometry: Geometry::try_from(geometry.value)?,
            properties: feature.properties.unwrap_or_default(),
        })
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&feature.geometry))),
            id: None,
            properties: Some(feature.properties.clone()),
            foreign_members: None,
        }
    }
}

/// An ordered set of features. Queries only ever read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }
}

/// Every feature must carry a geometry. A `"geometry": null` feature, though
/// valid GeoJSON, fails the whole conversion with
/// [`GeoQueryError::MissingGeometry`] naming its index; it is not silently
/// dropped, since that would shift the index of every later feature.
impl TryFrom<geojson::FeatureCollection> for FeatureCollection {
    type Error = GeoQueryError;

    fn try_from(collection: geojson::FeatureCollection) -> Result<Self, Self::Error> {
        let features = collection
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| Feature::from_geojson(index, feature))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { features })
    }
}

impl From<&FeatureCollection> for geojson::FeatureCollection {
    fn from(collection: &FeatureCollection) -> Self {
        geojson::FeatureCollection {
            bbox: None,
            features: collection.features.iter().map(geojson::Feature::from).collect(),
            foreign_members: None,
        }
    }
}
