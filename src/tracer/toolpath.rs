//! Toolpath
//!
//! Ordered, append-only list of resolved tool positions.

use std::ops::Add;

use serde::Serialize;

/// A point in machine coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Ordered sequence of points the tool head visits. Not de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Toolpath {
    points: Vec<Point3>,
}

impl Toolpath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path holding only its starting point
    pub fn starting_at(start: Point3) -> Self {
        Self {
            points: vec![start],
        }
    }

    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// The first `len` points, or all of them if the path is shorter
    pub fn prefix(&self, len: usize) -> &[Point3] {
        &self.points[..len.min(self.points.len())]
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Extend<Point3> for Toolpath {
    fn extend<I: IntoIterator<Item = Point3>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl IntoIterator for Toolpath {
    type Item = Point3;
    type IntoIter = std::vec::IntoIter<Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
