use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::error::{QuantError, Result};
use crate::vertex::{axis_bounds, Point3, VertexSet};

/// Normalization strategy applied before quantization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Method {
    /// Independent per-axis rescale using the observed min / max.
    #[serde(rename = "minmax")]
    MinMax,
    /// Centroid-centred, uniformly scaled into the unit ball, then remapped to [0,1].
    #[serde(rename = "unit_sphere")]
    UnitSphere,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::MinMax, Method::UnitSphere];

    pub fn name(self) -> &'static str {
        match self {
            Method::MinMax => "minmax",
            Method::UnitSphere => "unit_sphere",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown normalization method '{0}' (expected minmax or unit_sphere)")]
pub struct ParseMethodError(pub String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minmax" | "min-max" | "min_max" => Ok(Method::MinMax),
            "unit_sphere" | "unit-sphere" | "unitsphere" => Ok(Method::UnitSphere),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Everything needed to invert a normalization.
///
/// Stored values are the raw observations: a flat axis keeps `max == min`
/// and coincident points keep `max_distance == 0.0`. The divide-by-zero
/// guard is re-applied on both sides of the mapping instead of being baked in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum NormalizationParams {
    #[serde(rename = "minmax")]
    MinMax { min: Point3, max: Point3 },
    #[serde(rename = "unit_sphere")]
    UnitSphere { centroid: Point3, max_distance: f64 },
}

impl NormalizationParams {
    pub fn method(&self) -> Method {
        match self {
            NormalizationParams::MinMax { .. } => Method::MinMax,
            NormalizationParams::UnitSphere { .. } => Method::UnitSphere,
        }
    }
}

/// Coordinates mapped into [0,1]³, tagged with the method that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedVertexSet {
    pub method: Method,
    pub points: Vec<Point3>,
}

impl NormalizedVertexSet {
    pub fn new(method: Method, points: Vec<Point3>) -> Self {
        Self { method, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[inline]
fn guarded(divisor: f64) -> f64 {
    if divisor == 0.0 { 1.0 } else { divisor }
}

pub fn normalize(vertices: &VertexSet, method: Method) -> Result<(NormalizedVertexSet, NormalizationParams)> {
    match method {
        Method::MinMax => normalize_minmax(vertices),
        Method::UnitSphere => normalize_unit_sphere(vertices),
    }
}

/// `(x - min) / (max - min)` per axis; a flat axis divides by 1 and lands on 0.
pub fn normalize_minmax(vertices: &VertexSet) -> Result<(NormalizedVertexSet, NormalizationParams)> {
    vertices.ensure_usable()?;
    let (min, max) = axis_bounds(vertices.points());
    for a in 0..3 {
        if max[a] == min[a] {
            debug!("minmax: axis {} is flat at {}, normalizing it to 0", a, min[a]);
        }
    }
    let range = [
        guarded(max[0] - min[0]),
        guarded(max[1] - min[1]),
        guarded(max[2] - min[2]),
    ];

    let points = vertices
        .points()
        .iter()
        .map(|p| {
            let mut n = [0.0; 3];
            for a in 0..3 {
                n[a] = (p[a] - min[a]) / range[a];
            }
            n
        })
        .collect();

    let params = NormalizationParams::MinMax { min, max };
    debug!("minmax params: {:?}", params);
    Ok((NormalizedVertexSet::new(Method::MinMax, points), params))
}

/// Centre on the centroid, scale by the largest centroid distance, remap [-1,1] to [0,1].
pub fn normalize_unit_sphere(vertices: &VertexSet) -> Result<(NormalizedVertexSet, NormalizationParams)> {
    vertices.ensure_usable()?;
    let centroid = vertices.centroid().ok_or(QuantError::EmptyVertexSet)?;

    let max_distance = vertices
        .points()
        .iter()
        .map(|p| {
            // hypot keeps huge but finite coordinates from overflowing to inf
            (p[0] - centroid[0]).hypot(p[1] - centroid[1]).hypot(p[2] - centroid[2])
        })
        .fold(0.0_f64, f64::max);
    if max_distance == 0.0 {
        debug!("unit_sphere: all {} points sit on the centroid {:?}", vertices.len(), centroid);
    }
    let scale = guarded(max_distance);

    let points = vertices
        .points()
        .iter()
        .map(|p| {
            let mut n = [0.0; 3];
            for a in 0..3 {
                let unit = (p[a] - centroid[a]) / scale;
                n[a] = (unit + 1.0) / 2.0;
            }
            n
        })
        .collect();

    let params = NormalizationParams::UnitSphere { centroid, max_distance };
    debug!("unit_sphere params: {:?}", params);
    Ok((NormalizedVertexSet::new(Method::UnitSphere, points), params))
}

/// Inverse of [`normalize`]. The coordinates must carry the same method tag as `params`.
pub fn denormalize(normalized: &NormalizedVertexSet, params: &NormalizationParams) -> Result<VertexSet> {
    if normalized.method != params.method() {
        return Err(QuantError::MethodMismatch {
            normalized: normalized.method,
            params: params.method(),
        });
    }

    let points = match *params {
        NormalizationParams::MinMax { min, max } => {
            let range = [
                guarded(max[0] - min[0]),
                guarded(max[1] - min[1]),
                guarded(max[2] - min[2]),
            ];
            normalized
                .points
                .iter()
                .map(|v| {
                    let mut x = [0.0; 3];
                    for a in 0..3 {
                        x[a] = v[a] * range[a] + min[a];
                    }
                    x
                })
                .collect()
        }
        NormalizationParams::UnitSphere { centroid, max_distance } => {
            let scale = guarded(max_distance);
            normalized
                .points
                .iter()
                .map(|v| {
                    let mut x = [0.0; 3];
                    for a in 0..3 {
                        let unit = v[a] * 2.0 - 1.0;
                        x[a] = unit * scale + centroid[a];
                    }
                    x
                })
                .collect()
        }
    };

    Ok(VertexSet::new(points))
}
