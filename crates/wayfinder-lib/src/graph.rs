use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dataset::NodeRecord;
use crate::error::{Error, Result};
use crate::geometry::Point;

/// Identifier for a surveyed navigation node.
pub type NodeId = i64;

/// Surveyed navigation node within the building.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub position: Point,
}

/// Edge within the walk graph. The weight is the Euclidean distance between
/// the endpoints, or infinite when the edge touches a restricted room.
#[derive(Debug, Clone)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Undirected weighted graph used by the route planner.
///
/// Node data and adjacency are kept behind `Arc` so a loaded dataset can be
/// shared read-only across requests. `BTreeMap` storage keeps iteration
/// order stable, which the nearest-node tie-break relies on. Restricted
/// views share the node map but always own a fresh adjacency table.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<BTreeMap<NodeId, Node>>,
    adjacency: Arc<BTreeMap<NodeId, Vec<Edge>>>,
}

impl Graph {
    /// Assemble a graph from prebuilt parts.
    pub(crate) fn from_parts(
        nodes: Arc<BTreeMap<NodeId, Node>>,
        adjacency: BTreeMap<NodeId, Vec<Edge>>,
    ) -> Self {
        Self {
            nodes,
            adjacency: Arc::new(adjacency),
        }
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterate all nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Clone the shared node map for a derived view.
    pub(crate) fn shared_nodes(&self) -> Arc<BTreeMap<NodeId, Node>> {
        Arc::clone(&self.nodes)
    }

    /// Full adjacency table, in ascending id order.
    pub fn adjacency(&self) -> &BTreeMap<NodeId, Vec<Edge>> {
        &self.adjacency
    }
}

/// Build the base walk graph from surveyed node records.
///
/// All nodes are registered first; afterwards every declared neighbour
/// relation that is not already present in either direction becomes one
/// undirected edge weighted by the Euclidean distance between its
/// endpoints. Self-referencing neighbour declarations are skipped.
pub fn build_graph(records: &[NodeRecord]) -> Result<Graph> {
    if records.is_empty() {
        return Err(Error::malformed("node dataset contains no nodes"));
    }

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    for record in records {
        let previous = nodes.insert(
            record.id,
            Node {
                id: record.id,
                label: record.label.clone(),
                position: record.position,
            },
        );
        if previous.is_some() {
            return Err(Error::malformed(format!(
                "duplicate node id {} in node dataset",
                record.id
            )));
        }
    }

    let mut adjacency: BTreeMap<NodeId, Vec<Edge>> =
        nodes.keys().map(|&id| (id, Vec::new())).collect();

    for record in records {
        for &neighbour in &record.neighbors {
            if neighbour == record.id {
                tracing::debug!(node = record.id, "skipping self-referencing neighbour");
                continue;
            }
            let Some(other) = nodes.get(&neighbour) else {
                return Err(Error::malformed(format!(
                    "node {} declares unknown neighbour {}",
                    record.id, neighbour
                )));
            };
            if has_edge(&adjacency, record.id, neighbour) {
                continue;
            }

            let weight = record.position.distance_to(&other.position);
            adjacency
                .entry(record.id)
                .or_default()
                .push(Edge { target: neighbour, weight });
            adjacency
                .entry(neighbour)
                .or_default()
                .push(Edge { target: record.id, weight });
        }
    }

    let edge_count: usize = adjacency.values().map(Vec::len).sum::<usize>() / 2;
    tracing::debug!(nodes = nodes.len(), edges = edge_count, "walk graph built");

    Ok(Graph {
        nodes: Arc::new(nodes),
        adjacency: Arc::new(adjacency),
    })
}

/// Check whether an edge between `a` and `b` already exists in either
/// direction.
fn has_edge(adjacency: &BTreeMap<NodeId, Vec<Edge>>, a: NodeId, b: NodeId) -> bool {
    let forward = adjacency
        .get(&a)
        .is_some_and(|edges| edges.iter().any(|edge| edge.target == b));
    let backward = adjacency
        .get(&b)
        .is_some_and(|edges| edges.iter().any(|edge| edge.target == a));
    forward || backward
}
