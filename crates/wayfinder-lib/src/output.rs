use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::routing::RoutePlan;

/// Coordinate reference system recorded on output features unless the
/// caller overrides it. Matches the projected CRS of the surveyed building.
pub const DEFAULT_CRS: &str = "urn:ogc:def:crs:EPSG::28992";

/// GeoJSON `LineString` feature describing a planned route.
///
/// Serialization is a pure structural mapping: node coordinates are copied
/// in path order without transformation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineStringFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: LineStringGeometry,
    properties: serde_json::Map<String, serde_json::Value>,
    crs: NamedCrs,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct LineStringGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct NamedCrs {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: CrsProperties,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct CrsProperties {
    name: String,
}

impl LineStringFeature {
    /// Map a plan's node ids to their coordinates, in order.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan, crs: &str) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let coordinates = plan
            .steps
            .iter()
            .map(|&id| {
                graph
                    .node(id)
                    .map(|node| [node.position.x, node.position.y])
                    .ok_or_else(|| {
                        Error::malformed(format!("route step {id} is not present in the graph"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind: "Feature",
            geometry: LineStringGeometry {
                kind: "LineString",
                coordinates,
            },
            properties: serde_json::Map::new(),
            crs: NamedCrs {
                kind: "name",
                properties: CrsProperties {
                    name: crs.to_string(),
                },
            },
        })
    }

    /// Ordered coordinates of the route geometry.
    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.geometry.coordinates
    }

    /// Serialize the feature as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the feature to any sink as pretty-printed JSON.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        serde_json::to_writer_pretty(sink, self)?;
        Ok(())
    }
}
