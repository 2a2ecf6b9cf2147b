use std::f64::consts::PI;

use anyhow::{bail, Result};
use meshq_batch::MeshInput;

pub const SAMPLE_NAMES: [&str; 6] = ["cube", "tetrahedron", "plane", "sphere", "torus", "point"];

fn cube() -> Vec<[f64; 3]> {
    let mut out = Vec::with_capacity(8);
    for i in 0..8 {
        let x = if i & 1 == 0 { -1.5 } else { 2.5 };
        let y = if i & 2 == 0 { 0.0 } else { 4.0 };
        let z = if i & 4 == 0 { 10.0 } else { 14.0 };
        out.push([x, y, z]);
    }
    out
}

fn tetrahedron() -> Vec<[f64; 3]> {
    vec![[1.0, 1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, 1.0]]
}

/// 16x16 grid on z = 5.
fn plane() -> Vec<[f64; 3]> {
    (0..256)
        .map(|i| [(i % 16) as f64 * 0.2, (i / 16) as f64 * 0.35, 5.0])
        .collect()
}

/// UV sphere of radius 2 around (1, -3, 0.5).
fn sphere() -> Vec<[f64; 3]> {
    let (rings, segments) = (24, 48);
    let mut out = vec![[1.0, -3.0, 2.5], [1.0, -3.0, -1.5]];
    for r in 1..rings {
        let theta = PI * r as f64 / rings as f64;
        for s in 0..segments {
            let phi = 2.0 * PI * s as f64 / segments as f64;
            out.push([
                1.0 + 2.0 * theta.sin() * phi.cos(),
                -3.0 + 2.0 * theta.sin() * phi.sin(),
                0.5 + 2.0 * theta.cos(),
            ]);
        }
    }
    out
}

/// Flattened torus: wide in x/y, thin in z.
fn torus() -> Vec<[f64; 3]> {
    let (major, minor) = (40, 16);
    let mut out = Vec::with_capacity(major * minor);
    for i in 0..major {
        let u = 2.0 * PI * i as f64 / major as f64;
        for j in 0..minor {
            let v = 2.0 * PI * j as f64 / minor as f64;
            let ring = 8.0 + 1.5 * v.cos();
            out.push([ring * u.cos(), ring * u.sin(), 0.4 * v.sin()]);
        }
    }
    out
}

fn point() -> Vec<[f64; 3]> {
    vec![[3.0, -7.0, 0.25]]
}

pub fn sample(name: &str) -> Result<MeshInput> {
    let points = match name {
        "cube" => cube(),
        "tetrahedron" => tetrahedron(),
        "plane" => plane(),
        "sphere" => sphere(),
        "torus" => torus(),
        "point" => point(),
        other => bail!("unknown sample mesh '{}' (available: {})", other, SAMPLE_NAMES.join(", ")),
    };
    Ok(MeshInput::new(name, points))
}

pub fn samples(names: &[String]) -> Result<Vec<MeshInput>> {
    if names.is_empty() {
        return SAMPLE_NAMES.iter().map(|n| sample(n)).collect();
    }
    names.iter().map(|n| sample(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sample_builds() {
        let all = samples(&[]).unwrap();
        assert_eq!(all.len(), SAMPLE_NAMES.len());
        assert!(all.iter().all(|m| !m.vertices.is_empty()));
        assert_eq!(sample("sphere").unwrap().vertices.len(), 2 + 23 * 48);
    }

    #[test]
    fn unknown_sample_is_an_error() {
        assert!(sample("teapot").is_err());
    }
}
