use crate::error::{QuantError, Result};

pub type Point3 = [f64; 3];

/// Vertex positions of one mesh, in the mesh's original vertex order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexSet {
    points: Vec<Point3>,
}

/// Summary statistics of a vertex set, per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexStats {
    pub count: usize,
    pub min: Point3,
    pub max: Point3,
    pub mean: Point3,
    /// Population standard deviation.
    pub std: Point3,
}

impl VertexSet {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fails on an empty set or on the first NaN / infinite coordinate.
    pub(crate) fn ensure_usable(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(QuantError::EmptyVertexSet);
        }
        for (index, p) in self.points.iter().enumerate() {
            for axis in 0..3 {
                if !p[axis].is_finite() {
                    return Err(QuantError::NonFiniteCoordinate { index, axis });
                }
            }
        }
        Ok(())
    }

    pub fn centroid(&self) -> Option<Point3> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let mut sum = [0.0; 3];
        for p in &self.points {
            for a in 0..3 {
                sum[a] += p[a];
            }
        }
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }

    pub fn stats(&self) -> Option<VertexStats> {
        let mean = self.centroid()?;
        let (min, max) = axis_bounds(&self.points);
        let n = self.points.len() as f64;
        let mut var = [0.0; 3];
        for p in &self.points {
            for a in 0..3 {
                let d = p[a] - mean[a];
                var[a] += d * d;
            }
        }
        Some(VertexStats {
            count: self.points.len(),
            min,
            max,
            mean,
            std: [(var[0] / n).sqrt(), (var[1] / n).sqrt(), (var[2] / n).sqrt()],
        })
    }
}

impl From<Vec<Point3>> for VertexSet {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

/// Per-axis minimum and maximum over all points.
/// An empty slice yields `(+inf, -inf)` on every axis.
pub fn axis_bounds(points: &[Point3]) -> (Point3, Point3) {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for p in points {
        for a in 0..3 {
            if p[a] < min[a] { min[a] = p[a]; }
            if p[a] > max[a] { max[a] = p[a]; }
        }
    }
    (min, max)
}
