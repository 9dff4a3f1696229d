use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use crate::graph::{Graph, NodeId};

/// Multiplier on node count bounding total frontier expansions, guarding
/// against pathologically dense inputs.
const SEARCH_BUDGET_FACTOR: usize = 16;

/// Run A* search with a straight-line Euclidean heuristic.
///
/// The heuristic never exceeds the true remaining cost because every finite
/// edge weight is itself a Euclidean distance, so the search is optimal
/// whenever a finite-cost path exists. Edges carrying an infinite weight are
/// treated as absent, so a route severed by restrictions exhausts the
/// frontier and returns `None` instead of an infinite-cost path.
///
/// On success returns the simple path from `start` to `goal` together with
/// its total cost.
pub fn find_route_a_star(graph: &Graph, start: NodeId, goal: NodeId) -> Option<(Vec<NodeId>, f64)> {
    let start_position = graph.node(start)?.position;
    let goal_position = graph.node(goal)?.position;

    if start == goal {
        return Some((vec![start], 0.0));
    }

    let mut g_score: BTreeMap<NodeId, f64> = BTreeMap::new();
    let mut parents: BTreeMap<NodeId, Option<NodeId>> = BTreeMap::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(AStarEntry::new(
        start,
        0.0,
        start_position.distance_to(&goal_position),
    ));

    let budget = graph.node_count().saturating_mul(SEARCH_BUDGET_FACTOR).max(64);
    let mut expansions = 0usize;

    while let Some(entry) = queue.pop() {
        expansions += 1;
        if expansions > budget {
            tracing::warn!(budget, "search expansion budget exhausted");
            return None;
        }

        let current_score = match g_score.get(&entry.node) {
            // Stale queue entry superseded by a cheaper path.
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            return Some((reconstruct_path(&parents, start, goal), current_score));
        }

        for edge in graph.neighbours(entry.node) {
            // Restricted edges carry an infinite weight; treat them as absent.
            if !edge.weight.is_finite() {
                continue;
            }

            let next = edge.target;
            let tentative = current_score + edge.weight;
            if tentative < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative);
                parents.insert(next, Some(entry.node));
                let heuristic = graph
                    .node(next)
                    .map(|node| node.position.distance_to(&goal_position))
                    .unwrap_or(0.0);
                queue.push(AStarEntry::new(next, tentative, heuristic));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &BTreeMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl AStarEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate;
        // node id settles ties deterministically.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for AStarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
