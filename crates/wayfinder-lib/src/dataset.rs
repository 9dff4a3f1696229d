use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::geometry::{Boundary, Point, Polygon};
use crate::graph::{build_graph, Graph, NodeId};

/// Paths to the three GeoJSON inputs consumed by the routing engine.
///
/// Passed explicitly into [`Dataset::load`]; the library holds no
/// process-wide path configuration.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    /// Point features with node ids, labels, and neighbour lists.
    pub nodes: PathBuf,
    /// Room polygons with names and anchor nodes.
    pub floorplan: PathBuf,
    /// Polygons whose union is the serviceable area.
    pub boundary: PathBuf,
}

/// Validated node record from the surveyed node dataset.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub id: NodeId,
    pub label: String,
    pub position: Point,
    pub neighbors: Vec<NodeId>,
}

/// Room taken from the floorplan dataset.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    /// Node representing the room's connection to the walk network.
    pub anchor_node: Option<NodeId>,
    pub polygons: Vec<Polygon>,
}

impl Room {
    /// Whether any of the room's polygons contains the point.
    pub fn contains(&self, point: &Point) -> bool {
        self.polygons.iter().any(|polygon| polygon.contains(point))
    }
}

/// Loaded routing dataset: nodes, rooms, and boundary.
///
/// Read-only after loading. The base walk graph is built once on first use
/// and cached, so the dataset can be shared across requests.
#[derive(Debug)]
pub struct Dataset {
    nodes: Vec<NodeRecord>,
    rooms: Vec<Room>,
    boundary: Boundary,
    graph: OnceCell<Graph>,
}

impl Dataset {
    /// Load and validate all three GeoJSON files.
    pub fn load(paths: &DatasetPaths) -> Result<Self> {
        let nodes = load_nodes(&paths.nodes)?;
        let rooms = load_rooms(&paths.floorplan)?;
        let boundary = load_boundary(&paths.boundary)?;

        info!(
            nodes = nodes.len(),
            rooms = rooms.len(),
            boundary_polygons = boundary.polygon_count(),
            "routing dataset loaded"
        );

        Ok(Self::from_parts(nodes, rooms, boundary))
    }

    /// Assemble a dataset from already-validated parts.
    pub fn from_parts(nodes: Vec<NodeRecord>, rooms: Vec<Room>, boundary: Boundary) -> Self {
        Self {
            nodes,
            rooms,
            boundary,
            graph: OnceCell::new(),
        }
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Base walk graph, built on first call and reused afterwards.
    pub fn graph(&self) -> Result<&Graph> {
        self.graph.get_or_try_init(|| build_graph(&self.nodes))
    }
}

// Raw GeoJSON shapes. Fields are optional so that missing attributes
// surface as `MalformedDataset` instead of opaque decoding errors.

#[derive(Debug, Deserialize)]
struct FeatureCollection<P> {
    features: Vec<Feature<P>>,
}

#[derive(Debug, Deserialize)]
struct Feature<P> {
    properties: Option<P>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

#[derive(Debug, Deserialize)]
struct NodeProperties {
    id: Option<NodeId>,
    label: Option<String>,
    neighbors: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoomProperties {
    name: Option<String>,
    anchor_node: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
struct EmptyProperties {}

fn read_collection<P: serde::de::DeserializeOwned>(path: &Path) -> Result<FeatureCollection<P>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn load_nodes(path: &Path) -> Result<Vec<NodeRecord>> {
    let collection: FeatureCollection<NodeProperties> = read_collection(path)?;

    let mut records = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let properties = feature
            .properties
            .ok_or_else(|| Error::malformed(format!("node feature {index} has no properties")))?;
        let id = properties
            .id
            .ok_or_else(|| Error::malformed(format!("node feature {index} is missing an id")))?;
        let label = properties
            .label
            .ok_or_else(|| Error::malformed(format!("node {id} is missing a label")))?;
        let position = match feature.geometry {
            Some(Geometry::Point { coordinates }) => Point::new(coordinates[0], coordinates[1]),
            _ => {
                return Err(Error::malformed(format!(
                    "node {id} is missing a point geometry"
                )))
            }
        };
        let neighbors = match properties.neighbors {
            Some(text) => parse_neighbor_list(id, &text)?,
            None => Vec::new(),
        };

        records.push(NodeRecord {
            id,
            label,
            position,
            neighbors,
        });
    }

    Ok(records)
}

/// Parse a comma-delimited neighbour list such as `"2, 7,12"`.
fn parse_neighbor_list(id: NodeId, text: &str) -> Result<Vec<NodeId>> {
    let mut neighbors = Vec::new();
    for token in text.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let neighbour: NodeId = token.parse().map_err(|_| {
            Error::malformed(format!("node {id} has a malformed neighbour entry '{token}'"))
        })?;
        neighbors.push(neighbour);
    }
    Ok(neighbors)
}

fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    let collection: FeatureCollection<RoomProperties> = read_collection(path)?;

    let mut rooms = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let properties = feature
            .properties
            .ok_or_else(|| Error::malformed(format!("room feature {index} has no properties")))?;
        let name = properties
            .name
            .ok_or_else(|| Error::malformed(format!("room feature {index} is missing a name")))?;
        let polygons = match feature.geometry {
            Some(geometry) => geometry_polygons(geometry).ok_or_else(|| {
                Error::malformed(format!("room '{name}' has a non-polygon geometry"))
            })?,
            None => {
                return Err(Error::malformed(format!(
                    "room '{name}' is missing a geometry"
                )))
            }
        };

        rooms.push(Room {
            name,
            anchor_node: properties.anchor_node,
            polygons,
        });
    }

    Ok(rooms)
}

fn load_boundary(path: &Path) -> Result<Boundary> {
    let collection: FeatureCollection<EmptyProperties> = read_collection(path)?;

    let mut polygons = Vec::new();
    for (index, feature) in collection.features.into_iter().enumerate() {
        let geometry = feature.geometry.ok_or_else(|| {
            Error::malformed(format!("boundary feature {index} is missing a geometry"))
        })?;
        let mut parts = geometry_polygons(geometry).ok_or_else(|| {
            Error::malformed(format!("boundary feature {index} has a non-polygon geometry"))
        })?;
        polygons.append(&mut parts);
    }

    if polygons.is_empty() {
        return Err(Error::malformed("boundary dataset contains no polygons"));
    }

    Ok(Boundary::new(polygons))
}

/// Flatten a polygonal geometry into concrete polygons. Returns `None` for
/// point geometries, which are invalid in a polygon context.
fn geometry_polygons(geometry: Geometry) -> Option<Vec<Polygon>> {
    match geometry {
        Geometry::Point { .. } => None,
        Geometry::Polygon { coordinates } => Some(vec![rings_to_polygon(coordinates)]),
        Geometry::MultiPolygon { coordinates } => {
            Some(coordinates.into_iter().map(rings_to_polygon).collect())
        }
    }
}

fn rings_to_polygon(rings: Vec<Vec<[f64; 2]>>) -> Polygon {
    let mut rings = rings.into_iter().map(|ring| {
        ring.into_iter()
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect::<Vec<_>>()
    });
    let exterior = rings.next().unwrap_or_default();
    Polygon::new(exterior, rings.collect())
}
