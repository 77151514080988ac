use nalgebra::Point3;
use ndarray::Array3;
use subdiv_core::filter::{DecimateFilter, ExpandFilter};
use subdiv_core::spatial::{Direction, Spacing};
use subdiv_core::Volume;

fn ramp_volume(shape: (usize, usize, usize), spacing: [f64; 3]) -> Volume {
    let data = Array3::from_shape_fn(shape, |(i, j, k)| (i * 100 + j * 10 + k) as f32);
    Volume::new(
        data,
        Point3::new(12.5, -7.0, 0.0),
        Spacing::new(spacing),
        Direction::identity(),
    )
}

#[test]
fn expansion_multiplies_voxel_counts_and_preserves_extent() {
    let volume = ramp_volume((4, 5, 6), [1.0, 2.0, 0.5]);

    for divisions in [1u32, 2, 3, 4] {
        let expanded = ExpandFilter::new(divisions).unwrap().apply(&volume);
        let d = divisions as usize;

        assert_eq!(expanded.shape(), [4 * d, 5 * d, 6 * d]);
        for axis in 0..3 {
            assert!(
                (expanded.extent()[axis] - volume.extent()[axis]).abs() < 1e-9,
                "extent changed on axis {} for divisions {}",
                axis,
                divisions
            );
        }
    }
}

#[test]
fn expansion_with_one_division_is_identical() {
    let volume = ramp_volume((3, 3, 3), [1.0, 1.0, 1.0]);
    let out = ExpandFilter::new(1).unwrap().apply(&volume);

    assert_eq!(out.data(), volume.data());
    assert_eq!(out.origin(), volume.origin());
    assert_eq!(out.spacing(), volume.spacing());
}

#[test]
fn expansion_keeps_origin_and_direction() {
    let volume = ramp_volume((2, 2, 2), [2.0, 2.0, 2.0]);
    let expanded = ExpandFilter::new(2).unwrap().apply(&volume);

    assert_eq!(expanded.origin(), volume.origin());
    assert_eq!(expanded.direction(), volume.direction());
    assert_eq!(expanded.spacing(), &Spacing::uniform(1.0));
}

#[test]
fn expand_then_decimate_recovers_the_original() {
    let volume = ramp_volume((5, 4, 3), [0.75, 1.0, 1.25]);

    for divisions in [2u32, 4] {
        let expanded = ExpandFilter::new(divisions).unwrap().apply(&volume);
        let recovered = DecimateFilter::new(divisions).unwrap().apply(&expanded);

        assert_eq!(recovered.data(), volume.data());
        assert_eq!(recovered.shape(), volume.shape());
        for axis in 0..3 {
            assert!((recovered.spacing()[axis] - volume.spacing()[axis]).abs() < 1e-12);
        }
    }
}
