use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::dataset::Room;
use crate::graph::{Edge, Graph, NodeId};

/// Derive a weighted view of the graph with restricted rooms priced out.
///
/// Every edge incident to a node lying inside a restricted room's polygon is
/// assigned an infinite weight. The view shares node data with the base
/// graph but owns its adjacency table, so the base graph is never mutated
/// and concurrent unrestricted requests are unaffected. Restriction is
/// monotonic: weights only increase or stay equal.
pub fn apply_restrictions(graph: &Graph, rooms: &[Room], restricted: &[String]) -> Graph {
    let restricted_rooms: Vec<&Room> = rooms
        .iter()
        .filter(|room| restricted.iter().any(|name| name == &room.name))
        .collect();

    for name in restricted {
        if !rooms.iter().any(|room| &room.name == name) {
            warn!(room = %name, "restricted room not present in floorplan");
        }
    }

    let blocked: BTreeSet<NodeId> = graph
        .nodes()
        .filter(|node| {
            restricted_rooms
                .iter()
                .any(|room| room.contains(&node.position))
        })
        .map(|node| node.id)
        .collect();

    debug!(
        rooms = restricted_rooms.len(),
        nodes = blocked.len(),
        "applying room restrictions"
    );

    let adjacency = graph
        .adjacency()
        .iter()
        .map(|(&id, edges)| {
            let edges = edges
                .iter()
                .map(|edge| {
                    let weight = if blocked.contains(&id) || blocked.contains(&edge.target) {
                        f64::INFINITY
                    } else {
                        edge.weight
                    };
                    Edge {
                        target: edge.target,
                        weight,
                    }
                })
                .collect();
            (id, edges)
        })
        .collect();

    Graph::from_parts(graph.shared_nodes(), adjacency)
}
