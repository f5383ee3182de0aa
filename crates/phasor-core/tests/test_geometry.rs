use phasor_core::error::PhasorError;
use phasor_core::{derive_output_geometry, Geometry};

fn geometry(size: &[usize], spacing: &[f64], start: &[i64]) -> Geometry {
    Geometry::new(size.to_vec(), spacing.to_vec(), start.to_vec()).unwrap()
}

#[test]
fn test_output_takes_min_size_max_spacing_fixed_start() {
    let fixed = geometry(&[64, 64], &[1.0, 1.0], &[3, -2]);
    let moving = geometry(&[32, 64], &[2.0, 1.0], &[0, 0]);

    let out = derive_output_geometry(&fixed, &moving).unwrap();
    assert_eq!(out.size, vec![32, 64]);
    assert_eq!(out.spacing, vec![2.0, 1.0]);
    assert_eq!(out.start_index, vec![3, -2]);
}

#[test]
fn test_output_never_larger_than_either_input() {
    let fixed = geometry(&[17, 40, 9], &[0.5, 1.0, 3.0], &[0, 0, 0]);
    let moving = geometry(&[20, 31, 9], &[1.0, 0.25, 3.0], &[0, 0, 0]);

    let out = derive_output_geometry(&fixed, &moving).unwrap();
    for k in 0..3 {
        assert!(out.size[k] <= fixed.size[k]);
        assert!(out.size[k] <= moving.size[k]);
        assert!(out.spacing[k] >= fixed.spacing[k]);
        assert!(out.spacing[k] >= moving.spacing[k]);
    }
    assert_eq!(out.size, vec![17, 31, 9]);
    assert_eq!(out.spacing, vec![1.0, 1.0, 3.0]);
}

#[test]
fn test_actual_real_size_min_when_both_present() {
    let fixed = Geometry::from_size(vec![33, 64])
        .unwrap()
        .with_actual_real_size(Some(64));
    let moving = Geometry::from_size(vec![17, 32])
        .unwrap()
        .with_actual_real_size(Some(30));

    let out = derive_output_geometry(&fixed, &moving).unwrap();
    assert_eq!(out.actual_real_size, Some(30));
}

#[test]
fn test_actual_real_size_absent_when_either_missing() {
    let with = Geometry::from_size(vec![33, 64])
        .unwrap()
        .with_actual_real_size(Some(64));
    let without = Geometry::from_size(vec![33, 64]).unwrap();

    assert_eq!(
        derive_output_geometry(&with, &without).unwrap().actual_real_size,
        None
    );
    assert_eq!(
        derive_output_geometry(&without, &with).unwrap().actual_real_size,
        None
    );
    assert_eq!(
        derive_output_geometry(&without, &without)
            .unwrap()
            .actual_real_size,
        None
    );
}

#[test]
fn test_dimension_mismatch() {
    let fixed = Geometry::from_size(vec![8, 8]).unwrap();
    let moving = Geometry::from_size(vec![8, 8, 8]).unwrap();

    let result = derive_output_geometry(&fixed, &moving);
    assert!(matches!(result, Err(PhasorError::DimensionMismatch(_))));
}

#[test]
fn test_region_matches_geometry() {
    let g = geometry(&[5, 6], &[1.0, 1.0], &[2, 3]);
    let region = g.region();
    assert_eq!(region.index, vec![2, 3]);
    assert_eq!(region.size, vec![5, 6]);
    assert_eq!(g.num_samples(), 30);
}

#[test]
fn test_geometry_serde_roundtrip() {
    let g = geometry(&[33, 64], &[1.0, 0.5], &[0, 4]).with_actual_real_size(Some(64));
    let json = serde_json::to_string(&g).unwrap();
    let back: Geometry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, g);
}
