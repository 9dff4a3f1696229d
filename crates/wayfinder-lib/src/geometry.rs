use serde::{Deserialize, Serialize};

/// 2D position in the floorplan's projected coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Polygon with an exterior ring and zero or more interior rings (holes).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self { exterior, holes }
    }

    /// Whether the point lies inside the exterior ring and outside every hole.
    pub fn contains(&self, point: &Point) -> bool {
        ring_contains(&self.exterior, point) && !self.holes.iter().any(|h| ring_contains(h, point))
    }
}

/// Serviceable area made up of one or more polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    polygons: Vec<Polygon>,
}

impl Boundary {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Whether at least one member polygon contains the point.
    pub fn contains(&self, point: &Point) -> bool {
        self.polygons.iter().any(|polygon| polygon.contains(point))
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }
}

/// Even-odd ray casting over a ring of vertices. The ring may or may not
/// repeat its first vertex as the last one; the wrap-around pairing makes
/// the duplicate harmless.
fn ring_contains(ring: &[Point], point: &Point) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let crossing = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
