use tracing::debug;

use crate::dataset::Room;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};

/// Resolve a raw coordinate to a graph node.
///
/// Room interiors take precedence over geometric proximity: a point inside
/// a room must route via the room's anchor node, not whichever node happens
/// to be nearest. Only when no room contains the coordinate does the linear
/// nearest-node scan run; ties keep the earliest node in id order.
pub fn resolve_coordinate(point: &Point, graph: &Graph, rooms: &[Room]) -> Result<NodeId> {
    if graph.node_count() == 0 {
        return Err(Error::malformed("cannot resolve coordinates on an empty graph"));
    }

    for room in rooms {
        if !room.contains(point) {
            continue;
        }
        let Some(anchor) = room.anchor_node else {
            continue;
        };
        if graph.node(anchor).is_none() {
            return Err(Error::malformed(format!(
                "room '{}' anchors to unknown node {anchor}",
                room.name
            )));
        }
        debug!(room = %room.name, anchor, "coordinate resolved via room interior");
        return Ok(anchor);
    }

    let mut closest = None;
    let mut min_distance = f64::INFINITY;
    for node in graph.nodes() {
        let distance = node.position.distance_to(point);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(node.id);
        }
    }

    // Non-empty graph guarantees a closest node.
    closest.ok_or_else(|| Error::malformed("cannot resolve coordinates on an empty graph"))
}

/// Resolve a room label to a node by exact label match, in id order.
pub fn resolve_label(label: &str, graph: &Graph) -> Result<NodeId> {
    graph
        .nodes()
        .find(|node| node.label == label)
        .map(|node| node.id)
        .ok_or_else(|| Error::UnknownRoom {
            name: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::NodeRecord;
    use crate::geometry::Polygon;
    use crate::graph::build_graph;

    fn record(id: NodeId, label: &str, x: f64, y: f64) -> NodeRecord {
        NodeRecord {
            id,
            label: label.to_string(),
            position: Point::new(x, y),
            neighbors: Vec::new(),
        }
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
                Point::new(x0, y0),
            ],
            Vec::new(),
        )
    }

    fn room(name: &str, anchor: Option<NodeId>, polygon: Polygon) -> Room {
        Room {
            name: name.to_string(),
            anchor_node: anchor,
            polygons: vec![polygon],
        }
    }

    #[test]
    fn room_interior_beats_a_nearer_node() {
        let graph = build_graph(&[
            record(2, "hall_a", 10.0, 0.0),
            record(6, "geolab", 10.0, 10.0),
        ])
        .expect("graph builds");
        let rooms = vec![room("geolab", Some(6), square(5.0, 2.0, 15.0, 15.0))];

        // (14, 3) is inside the geolab polygon but closer to node 2.
        let point = Point::new(14.0, 3.0);
        assert!(point.distance_to(&Point::new(10.0, 0.0)) < point.distance_to(&Point::new(10.0, 10.0)));

        let resolved = resolve_coordinate(&point, &graph, &rooms).expect("resolves");
        assert_eq!(resolved, 6);
    }

    #[test]
    fn anchorless_room_falls_back_to_the_nearest_node() {
        let graph = build_graph(&[
            record(2, "hall_a", 10.0, 0.0),
            record(6, "geolab", 10.0, 10.0),
        ])
        .expect("graph builds");
        let rooms = vec![room("geolab", None, square(5.0, 2.0, 15.0, 15.0))];

        let resolved =
            resolve_coordinate(&Point::new(14.0, 3.0), &graph, &rooms).expect("resolves");
        assert_eq!(resolved, 2);
    }

    #[test]
    fn nearest_node_ties_keep_the_earliest_id() {
        let graph = build_graph(&[
            record(3, "left", -5.0, 0.0),
            record(7, "right", 5.0, 0.0),
        ])
        .expect("graph builds");

        let resolved =
            resolve_coordinate(&Point::new(0.0, 0.0), &graph, &[]).expect("resolves");
        assert_eq!(resolved, 3);
    }

    #[test]
    fn anchor_outside_the_graph_is_rejected() {
        let graph = build_graph(&[record(2, "hall_a", 10.0, 0.0)]).expect("graph builds");
        let rooms = vec![room("geolab", Some(99), square(5.0, 2.0, 15.0, 15.0))];

        let err = resolve_coordinate(&Point::new(10.0, 10.0), &graph, &rooms)
            .expect_err("dangling anchor rejected");
        assert!(matches!(err, Error::MalformedDataset { .. }));
    }

    #[test]
    fn empty_graph_cannot_resolve() {
        let graph = Graph::default();
        let err = resolve_coordinate(&Point::new(0.0, 0.0), &graph, &[])
            .expect_err("empty graph rejected");
        assert!(matches!(err, Error::MalformedDataset { .. }));
    }

    #[test]
    fn labels_resolve_by_exact_match() {
        let graph = build_graph(&[
            record(2, "hall_a", 10.0, 0.0),
            record(6, "geolab", 10.0, 10.0),
        ])
        .expect("graph builds");

        assert_eq!(resolve_label("geolab", &graph).expect("resolves"), 6);
        let err = resolve_label("Geolab", &graph).expect_err("case-sensitive lookup");
        assert!(matches!(err, Error::UnknownRoom { .. }));
    }
}
