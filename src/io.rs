use anyhow::{Context, Result, bail};
use geojson::GeoJson;
use log::debug;
use std::path::Path;

use crate::model::FeatureCollection;

/// Parse GeoJSON text. The document must be a `FeatureCollection`.
pub fn parse_geojson(text: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = text.parse().context("Failed to parse GeoJSON")?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        bail!("GeoJSON document is not a FeatureCollection");
    };

    Ok(FeatureCollection::try_from(collection)?)
}

/// Load a feature collection from a GeoJSON file.
pub fn load_geojson(path: &Path) -> Result<FeatureCollection> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let collection =
        parse_geojson(&text).with_context(|| format!("Failed to load {}", path.display()))?;

    debug!("loaded {} features from {}", collection.len(), path.display());
    Ok(collection)
}

/// Write a feature collection as pretty-printed GeoJSON.
pub fn save_geojson(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let geojson = GeoJson::FeatureCollection(collection.into());
    let json = serde_json::to_string_pretty(&geojson)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("wrote {} features to {}", collection.len(), path.display());
    Ok(())
}
