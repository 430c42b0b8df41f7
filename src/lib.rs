//! Geometric queries over GeoJSON feature collections: planar polygon area,
//! great-circle distance between points, and nearest-feature search.

pub mod error;
pub mod io;
pub mod math;
pub mod model;
pub mod output;
pub mod query;

pub use error::GeoQueryError;
pub use model::{Feature, FeatureCollection, Geometry, Properties};
pub use query::Nearest;
