//! Building GeoJSON features from boundary records, and merging wards of the
//! same district into one feature.

use std::fmt;

use geo::LineString;
use geojson::{Feature as GeoJsonFeature, Geometry as GeoJsonGeometry, Value as GeoJsonValue};

use crate::coordinates::{parse_ring, NumericPolicy};
use crate::error::ZoneError;
use crate::records::Record;

/// The GeoJSON geometry type a [`Geometry`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polygon => f.write_str("Polygon"),
            Self::MultiPolygon => f.write_str("MultiPolygon"),
        }
    }
}

/// Polygon rings grouped per member. A single member is a Polygon, several
/// make a MultiPolygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    members: Vec<Vec<LineString<f64>>>,
}

impl Geometry {
    pub fn polygon(rings: Vec<LineString<f64>>) -> Self {
        Self {
            members: vec![rings],
        }
    }

    pub fn kind(&self) -> GeometryKind {
        if self.members.len() > 1 {
            GeometryKind::MultiPolygon
        } else {
            GeometryKind::Polygon
        }
    }

    pub fn members(&self) -> &[Vec<LineString<f64>>] {
        &self.members
    }

    /// Appends the first member of `other` to this geometry.
    fn absorb(&mut self, other: Geometry) {
        self.members.extend(other.members.into_iter().take(1));
    }

    pub fn to_geojson(&self) -> GeoJsonGeometry {
        let value = match self.kind() {
            GeometryKind::Polygon => GeoJsonValue::Polygon(
                self.members
                    .first()
                    .map(|rings| rings_to_positions(rings))
                    .unwrap_or_default(),
            ),
            GeometryKind::MultiPolygon => GeoJsonValue::MultiPolygon(
                self.members
                    .iter()
                    .map(|rings| rings_to_positions(rings))
                    .collect(),
            ),
        };
        GeoJsonGeometry::new(value)
    }
}

fn rings_to_positions(rings: &[LineString<f64>]) -> Vec<Vec<Vec<f64>>> {
    rings
        .iter()
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

/// One ward (or, after grouping, one district) boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub name: String,
}

impl Feature {
    /// The part of the name before the first `-`, e.g. `"District 1 "`.
    pub fn district_key(&self) -> &str {
        self.name.split_once('-').map_or(self.name.as_str(), |(district, _)| district)
    }

    pub fn to_geojson(&self) -> GeoJsonFeature {
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_owned(), serde_json::Value::String(self.name.clone()));

        GeoJsonFeature {
            bbox: None,
            geometry: Some(self.geometry.to_geojson()),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

pub fn feature_name(district: &str, ward: &str) -> String {
    format!("District {district} - Ward {ward}")
}

/// Turns one record into a Polygon feature.
///
/// # Errors
///
/// Returns [`ZoneError::Coordinate`] if the geometry column does not parse
/// under `policy`.
pub fn build_feature(record: &Record, policy: NumericPolicy) -> Result<Feature, ZoneError> {
    let name = feature_name(&record.district, &record.ward);
    let rings = parse_ring(&record.raw_geometry, policy).map_err(|source| ZoneError::Coordinate {
        line: record.line,
        name: name.clone(),
        source,
    })?;

    Ok(Feature {
        geometry: Geometry::polygon(rings),
        name,
    })
}

/// Builds one feature per record, in order.
///
/// # Errors
///
/// Fails on the first record whose geometry does not parse.
pub fn build_features(records: &[Record], policy: NumericPolicy) -> Result<Vec<Feature>, ZoneError> {
    let features = records
        .iter()
        .map(|record| build_feature(record, policy))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("Built {} features", features.len());
    Ok(features)
}

/// Merges runs of adjacent features that share a district into a single
/// feature named after the first one in the run.
///
/// Only neighbours are merged: sort by district first if every ward of a
/// district should end up in one feature.
pub fn group_by_district(features: Vec<Feature>) -> Vec<Feature> {
    let total = features.len();
    let (mut groups, last) = features.into_iter().fold(
        (Vec::new(), None::<Feature>),
        |(mut groups, current), feature| match current {
            Some(mut group) if group.district_key() == feature.district_key() => {
                group.geometry.absorb(feature.geometry);
                (groups, Some(group))
            }
            Some(group) => {
                groups.push(group);
                (groups, Some(feature))
            }
            None => (groups, Some(feature)),
        },
    );
    groups.extend(last);

    log::info!("Grouped {} features into {} districts", total, groups.len());
    groups
}
