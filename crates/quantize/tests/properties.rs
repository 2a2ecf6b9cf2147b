use proptest::prelude::*;
use meshq_quantize::{
    dequantize, denormalize, normalize, normalize_minmax, quantize, Bins, Method,
    NormalizedVertexSet, VertexSet,
};

fn point() -> impl Strategy<Value = [f64; 3]> {
    [-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0]
}

fn vertex_set() -> impl Strategy<Value = VertexSet> {
    prop::collection::vec(point(), 1..200).prop_map(VertexSet::new)
}

fn method() -> impl Strategy<Value = Method> {
    prop_oneof![Just(Method::MinMax), Just(Method::UnitSphere)]
}

// Property 1: every level lies in [0, bins - 1]
proptest! {
    #[test]
    fn prop_levels_in_range(set in vertex_set(), m in method(), bins in 2u32..5000) {
        let bins = Bins::new(bins).unwrap();
        let (norm, _) = normalize(&set, m).unwrap();
        let q = quantize(&norm, bins);
        prop_assert_eq!(q.len(), set.len());
        for l in &q.levels {
            for a in 0..3 {
                prop_assert!(l[a] <= bins.max_level(), "level {} above {}", l[a], bins.max_level());
            }
        }
    }
}

// Property 2: |dequantize(quantize(v)) - v| <= 1 / (bins - 1)
proptest! {
    #[test]
    fn prop_dequantize_within_step(
        values in prop::collection::vec([0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0], 1..100),
        bins in 2u32..100_000
    ) {
        let bins = Bins::new(bins).unwrap();
        let src = NormalizedVertexSet::new(Method::MinMax, values);
        let back = dequantize(&quantize(&src, bins), bins).unwrap();
        for (p, r) in src.points.iter().zip(&back.points) {
            for a in 0..3 {
                let diff = (p[a] - r[a]).abs();
                prop_assert!(diff <= bins.step() + 1e-15, "diff {} exceeds {}", diff, bins.step());
            }
        }
    }
}

// Property 3: denormalize(normalize(x)) == x without quantization
proptest! {
    #[test]
    fn prop_normalization_inverts(set in vertex_set(), m in method()) {
        let (norm, params) = normalize(&set, m).unwrap();
        let back = denormalize(&norm, &params).unwrap();
        prop_assert_eq!(back.len(), set.len());
        for (p, r) in set.points().iter().zip(back.points()) {
            for a in 0..3 {
                let diff = (p[a] - r[a]).abs();
                prop_assert!(diff <= 1e-9, "{} vs {} (diff {})", p[a], r[a], diff);
            }
        }
    }
}

// Property 4: a flat axis normalizes to 0 under MinMax
proptest! {
    #[test]
    fn prop_flat_axis_is_constant(
        xy in prop::collection::vec([-50.0f64..50.0, -50.0f64..50.0], 1..100),
        z in -50.0f64..50.0
    ) {
        let set = VertexSet::new(xy.iter().map(|p| [p[0], p[1], z]).collect());
        let (norm, _) = normalize_minmax(&set).unwrap();
        prop_assert!(norm.points.iter().all(|p| p[2] == 0.0));
    }
}
