//! Wayfinder library entry points.
//!
//! This crate loads the surveyed indoor datasets (navigation nodes, room
//! floorplan, building boundary), builds the weighted walk graph, and plans
//! shortest walkable routes between rooms or raw coordinates. Higher-level
//! consumers (CLI, services) should only depend on the functions exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod output;
pub mod path;
pub mod resolve;
pub mod restrict;
pub mod routing;

pub use dataset::{Dataset, DatasetPaths, NodeRecord, Room};
pub use error::{Error, Result};
pub use geometry::{Boundary, Point, Polygon};
pub use graph::{build_graph, Edge, Graph, Node, NodeId};
pub use output::{LineStringFeature, DEFAULT_CRS};
pub use path::find_route_a_star;
pub use resolve::{resolve_coordinate, resolve_label};
pub use restrict::apply_restrictions;
pub use routing::{plan_route, RouteEndpoint, RoutePlan, RouteRequest};
