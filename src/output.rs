use anyhow::{Context, Result};
use geojson::{Feature, GeoJson};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use std::path::Path;

use crate::query::Nearest;

/// Convert a nearest-feature result to a GeoJSON Feature, tagging it with its
/// collection index and distance.
pub fn nearest_to_geojson(nearest: &Nearest) -> Feature {
    let mut feature = Feature::from(nearest.feature);
    let properties = feature.properties.get_or_insert_with(Default::default);
    properties.insert("index".to_string(), json!(nearest.index));
    properties.insert(
        "distance_km".to_string(),
        json!((nearest.distance_km * 1000.0).round() / 1000.0),
    );
    feature
}

/// Write the annotated nearest feature to `path`.
///
/// Returns `false`, leaving `path` untouched, when there is no result to write.
pub fn write_nearest(path: &Path, nearest: Option<&Nearest>) -> Result<bool> {
    let Some(nearest) = nearest else {
        return Ok(false);
    };
    let geojson = GeoJson::Feature(nearest_to_geojson(nearest));
    std::fs::write(path, serde_json::to_string_pretty(&geojson)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Machine-readable summary of a query, printed by the CLI with `--json`.
#[derive(Debug, Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Report {
    Info {
        index: usize,
        geometry_type: &'static str,
        coordinates: JsonValue,
    },
    Area {
        index: usize,
        /// Planar, in squared input units.
        area: f64,
    },
    Distance {
        distance_km: f64,
    },
    Nearest {
        index: Option<usize>,
        distance_km: Option<f64>,
        feature: Option<Feature>,
    },
}

impl Report {
    pub fn nearest(nearest: Option<&Nearest>) -> Self {
        Report::Nearest {
            index: nearest.map(|n| n.index),
            distance_km: nearest.map(|n| n.distance_km),
            feature: nearest.map(nearest_to_geojson),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Feature as ModelFeature, Geometry, Properties};
    use geo::Point;

    fn dinagat() -> ModelFeature {
        let mut properties = Properties::new();
        properties.insert("name".to_string(), json!("Dinagat Islands"));
        ModelFeature::new(Geometry::Point(Point::new(125.6, 10.1)), properties)
    }

    #[test]
    fn nearest_feature_is_annotated() {
        let feature = dinagat();
        let nearest = Nearest {
            index: 3,
            feature: &feature,
            distance_km: 12.34567,
        };

        let gj = nearest_to_geojson(&nearest);
        let properties = gj.properties.unwrap();
        assert_eq!(properties["name"], "Dinagat Islands");
        assert_eq!(properties["index"], 3);
        assert_eq!(properties["distance_km"], 12.346);
        assert_eq!(
            gj.geometry.unwrap().value,
            geojson::Value::Point(vec![125.6, 10.1])
        );
    }

    #[test]
    fn write_nearest_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nearest.geojson");
        let feature = dinagat();
        let nearest = Nearest {
            index: 0,
            feature: &feature,
            distance_km: 1.0,
        };

        assert!(write_nearest(&path, Some(&nearest)).unwrap());
        let written: GeoJson = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        let GeoJson::Feature(written) = written else {
            panic!("expected a feature");
        };
        assert_eq!(written.properties.unwrap()["name"], "Dinagat Islands");
    }

    #[test]
    fn write_nearest_without_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nearest.geojson");

        assert!(!write_nearest(&path, None).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn report_serializes_with_tag() {
        let value = serde_json::to_value(Report::Distance { distance_km: 1.5 }).unwrap();
        assert_eq!(value, json!({"query": "distance", "distance_km": 1.5}));

        let value = serde_json::to_value(Report::nearest(None)).unwrap();
        assert_eq!(
            value,
            json!({"query": "nearest", "index": null, "distance_km": null, "feature": null})
        );
    }
}
