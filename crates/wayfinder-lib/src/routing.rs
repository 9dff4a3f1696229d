//! Route planning pipeline.
//!
//! Gates both endpoints against the building boundary, resolves them to
//! graph nodes, derives a restricted view when rooms are avoided, and runs
//! the A* planner. Every failure is a typed [`Error`] value; no stage
//! panics, and a truncated path is never returned.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::dataset::{Dataset, Room};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};
use crate::path::find_route_a_star;
use crate::resolve::{resolve_coordinate, resolve_label};
use crate::restrict::apply_restrictions;

/// Start or end of a routing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteEndpoint {
    /// Named room, resolved by exact label lookup.
    Label(String),
    /// Raw coordinate, gated by the boundary before resolution.
    Coordinate(Point),
}

impl fmt::Display for RouteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEndpoint::Label(label) => f.write_str(label),
            RouteEndpoint::Coordinate(point) => write!(f, "({:.4}, {:.4})", point.x, point.y),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: RouteEndpoint,
    pub end: RouteEndpoint,
    /// Rooms the route must not pass through.
    pub restricted_rooms: Vec<String>,
}

impl RouteRequest {
    /// Request without restrictions.
    pub fn between(start: RouteEndpoint, end: RouteEndpoint) -> Self {
        Self {
            start,
            end,
            restricted_rooms: Vec::new(),
        }
    }

    /// Add restricted rooms to the request.
    pub fn avoiding(mut self, rooms: impl IntoIterator<Item = String>) -> Self {
        self.restricted_rooms.extend(rooms);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: NodeId,
    pub goal: NodeId,
    pub steps: Vec<NodeId>,
    /// Sum of traversed edge weights; always finite.
    pub total_cost: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute the shortest walkable route for a request.
///
/// Boundary and label checks short-circuit before any search work; the only
/// failure surfaced from the search stage is [`Error::NoPathFound`].
pub fn plan_route(dataset: &Dataset, request: &RouteRequest) -> Result<RoutePlan> {
    // Boundary gate runs before the graph is even built.
    check_boundary(dataset, &request.start, "start")?;
    check_boundary(dataset, &request.end, "end")?;

    let graph = dataset.graph()?;
    let start_id = resolve_endpoint(&request.start, graph, dataset.rooms())?;
    let goal_id = resolve_endpoint(&request.end, graph, dataset.rooms())?;

    let search_graph = if request.restricted_rooms.is_empty() {
        graph.clone()
    } else {
        apply_restrictions(graph, dataset.rooms(), &request.restricted_rooms)
    };

    let (steps, total_cost) =
        find_route_a_star(&search_graph, start_id, goal_id).ok_or_else(|| Error::NoPathFound {
            start: request.start.to_string(),
            goal: request.end.to_string(),
        })?;

    let plan = RoutePlan {
        start: start_id,
        goal: goal_id,
        steps,
        total_cost,
    };
    info!(
        start = start_id,
        goal = goal_id,
        hops = plan.hop_count(),
        cost = plan.total_cost,
        "route planned"
    );
    Ok(plan)
}

fn check_boundary(dataset: &Dataset, endpoint: &RouteEndpoint, which: &str) -> Result<()> {
    if let RouteEndpoint::Coordinate(point) = endpoint {
        if !dataset.boundary().contains(point) {
            return Err(Error::OutOfBounds {
                endpoint: which.to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_endpoint(endpoint: &RouteEndpoint, graph: &Graph, rooms: &[Room]) -> Result<NodeId> {
    match endpoint {
        RouteEndpoint::Label(label) => resolve_label(label, graph),
        RouteEndpoint::Coordinate(point) => resolve_coordinate(point, graph, rooms),
    }
}
