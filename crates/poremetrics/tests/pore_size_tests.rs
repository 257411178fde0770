mod common;

use common::random_grid;
use ndarray::{Array1, Array2, Array3, Zip, s};
use poremetrics::{
    ErrorCategory, PorosimetryBuilder, distance_transform, local_thickness, porosimetry,
    size_distribution,
};

/// 12x7 grid holding two slabs of void that span every column: a narrow one
/// in rows 1..=3 and a wide one in rows 5..=9
fn two_slabs() -> Array2<bool> {
    Array2::from_shape_fn((12, 7), |(i, _)| (1..=3).contains(&i) || (5..=9).contains(&i))
}

/// 11x20 grid where a 7x7 chamber (rows 2..=8, cols 8..=14) is only
/// reachable from the left face through a 1 voxel wide throat along row 5
fn throat_and_chamber() -> Array2<bool> {
    let mut grid = Array2::from_elem((11, 20), false);
    grid.slice_mut(s![5, 0..8]).fill(true);
    grid.slice_mut(s![2..9, 8..15]).fill(true);
    grid
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn distance_to_a_single_solid_voxel() {
        let mut grid = Array2::from_elem((5, 5), true);
        grid[[2, 2]] = false;
        let dist = distance_transform(&grid).unwrap();
        assert_eq!(dist[[2, 2]], 0.0);
        assert_eq!(dist[[2, 0]], 2.0);
        assert_eq!(dist[[0, 0]], 8.0_f64.sqrt());

        let void = Array3::from_elem((3, 3, 3), true);
        let dist = distance_transform(&void).unwrap();
        assert!(dist.iter().all(|d| d.is_infinite()));

        let line = Array1::from_elem(5, true);
        let err = distance_transform(&line).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);
    }

    #[test]
    fn local_thickness_of_slabs() {
        let grid = two_slabs();
        let thickness = local_thickness(&grid).unwrap();
        for (index, &t) in thickness.indexed_iter() {
            let i = index[0];
            let expected = match i {
                1..=3 => 2.0,
                5..=9 => 3.0,
                _ => 0.0,
            };
            assert_eq!(t, expected, "row {i}");
        }

        let (radii, counts) = size_distribution(&thickness);
        assert_eq!(radii, vec![2.0, 3.0]);
        assert_eq!(counts, vec![21, 35]);
    }

    #[test]
    fn local_thickness_of_3d_slab() {
        let grid = Array3::from_shape_fn((9, 5, 5), |(i, _, _)| i > 0 && i < 8);
        let thickness = local_thickness(&grid).unwrap();
        let (radii, counts) = size_distribution(&thickness);
        assert_eq!(radii, vec![4.0]);
        assert_eq!(counts, vec![175]);
    }

    #[test]
    fn local_thickness_bounds() {
        let grid = random_grid(21, &[18, 16, 14], 0.6);
        let thickness = local_thickness(&grid).unwrap();
        let dist = distance_transform(&grid).unwrap();
        let largest = dist.iter().map(|d| d.round_ties_even()).fold(0.0, f64::max);
        Zip::from(&thickness)
            .and(&dist)
            .and(&grid)
            .for_each(|&t, &d, &void| {
                if void {
                    assert!((1.0..=largest).contains(&t));
                    // a sphere of the rounded radius centered on the voxel fits
                    if d.round_ties_even() <= d {
                        assert!(t >= d.round_ties_even());
                    }
                } else {
                    assert_eq!(t, 0.0);
                }
            });

        let void = Array2::from_elem((4, 6), true);
        let thickness = local_thickness(&void).unwrap();
        assert!(thickness.iter().all(|t| t.is_infinite()));

        let solid = Array2::from_elem((4, 6), false);
        let thickness = local_thickness(&solid).unwrap();
        assert!(thickness.iter().all(|&t| t == 0.0));
    }

    #[test]
    fn porosimetry_through_a_throat() {
        let grid = throat_and_chamber();
        let limited = PorosimetryBuilder::new()
            .radii(vec![1.0, 3.0])
            .build()
            .unwrap();
        let open = PorosimetryBuilder::new()
            .radii(vec![1.0, 3.0])
            .access_limited(false)
            .build()
            .unwrap();
        let limited = limited.apply(&grid).unwrap();
        let open = open.apply(&grid).unwrap();

        // the chamber only fills once spheres fit through the throat
        for &v in limited.slice(s![2..9, 8..15]).iter() {
            assert_eq!(v, 1.0);
        }
        for &v in open.slice(s![2..9, 8..15]).iter() {
            assert_eq!(v, 3.0);
        }
        assert_eq!(limited[[5, 3]], 1.0);
        assert_eq!(open[[5, 3]], 1.0);

        Zip::from(&limited)
            .and(&open)
            .and(&grid.view().into_dyn())
            .for_each(|&l, &o, &void| {
                assert!(l <= o);
                if !void {
                    assert_eq!(o, 0.0);
                }
            });
    }

    #[test]
    fn porosimetry_custom_inlets() {
        let grid = throat_and_chamber();
        let config = PorosimetryBuilder::new()
            .radii(vec![1.0, 3.0])
            .build()
            .unwrap();

        let mut left = Array2::from_elem(grid.raw_dim(), false);
        left.column_mut(0).fill(true);
        let from_left = porosimetry(&grid, Some(left.view().into_dyn()), &config).unwrap();
        assert_eq!(from_left, config.apply(&grid).unwrap());

        // nothing void touches the right face
        let mut right = Array2::from_elem(grid.raw_dim(), false);
        right.column_mut(19).fill(true);
        let from_right = porosimetry(&grid, Some(right.view().into_dyn()), &config).unwrap();
        assert!(from_right.iter().all(|&v| v == 0.0));

        let wrong = Array2::from_elem((11, 19), true);
        let err = porosimetry(&grid, Some(wrong.view().into_dyn()), &config).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);
    }

    #[test]
    fn porosimetry_default_radii() {
        let grid = throat_and_chamber();
        let config = PorosimetryBuilder::new().build().unwrap();
        let invaded = config.apply(&grid).unwrap();
        // the smallest default radius is 1, which reaches past the inlet
        for ((i, j), &void) in grid.indexed_iter() {
            let v = invaded[[i, j]];
            if !void {
                assert_eq!(v, 0.0);
            } else if j > 0 {
                assert!((1.0..=4.0).contains(&v), "voxel ({i}, {j}) holds {v}");
            }
        }

        let void = Array2::from_elem((6, 6), true);
        let invaded = config.apply(&void).unwrap();
        assert!(invaded.iter().all(|v| v.is_infinite()));

        let solid = Array2::from_elem((6, 6), false);
        let invaded = config.apply(&solid).unwrap();
        assert!(invaded.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn random_porosimetry_properties() {
        let grid = random_grid(17, &[20, 22], 0.65);
        let limited = PorosimetryBuilder::new().n_radii(8).build().unwrap();
        let open = PorosimetryBuilder::new()
            .n_radii(8)
            .access_limited(false)
            .build()
            .unwrap();
        let limited = limited.apply(&grid).unwrap();
        let open = open.apply(&grid).unwrap();
        Zip::from(&limited)
            .and(&open)
            .and(&grid)
            .for_each(|&l, &o, &void| {
                assert!(l <= o);
                if !void {
                    assert_eq!(l, 0.0);
                    assert_eq!(o, 0.0);
                }
            });
    }
}
