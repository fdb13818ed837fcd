//! Bitwise face culling and slice transposition.
//!
//! A face of a group's cell is visible if the neighbor cell in that direction
//! is not occupied by any group. Each row is tested against the combined
//! occupancy with a single shift, 62 cells per operation.
//!
//! Visible faces come out as rows along the face axis. The greedy merge wants
//! whole planes instead, so [`build_slices`] transposes every set bit into the
//! plane it lies on.

use crate::bits::{exposed_neg, exposed_pos, unpad, SetBits};
use crate::core::{FaceMasks, SliceMasks, CS};
use crate::occupancy::OccupancyGrid;

/// Number of usable rows `(a, b)` in the plane of `axis`.
#[inline]
pub const fn plane_extent(axis: usize, cells: [usize; 3]) -> (usize, usize) {
    match axis {
        0 => (cells[1], cells[2]),
        1 => (cells[0], cells[2]),
        _ => (cells[0], cells[1]),
    }
}

/// Generate visible-face masks for one group.
///
/// `masks` is cleared first; rows and bits outside the `cells` extent stay
/// zero, so padding cells never produce faces. Returns the number of visible
/// unit faces.
pub fn cull_faces(
    group: &OccupancyGrid,
    all: &OccupancyGrid,
    cells: [usize; 3],
    masks: &mut FaceMasks,
) -> usize {
    debug_assert!(cells.iter().all(|&n| n <= CS));
    masks.clear();

    for axis in 0..3 {
        let (na, nb) = plane_extent(axis, cells);
        let len = cells[axis] as u32;

        for a in 1..=na {
            for b in 1..=nb {
                let row = group.row(axis, a, b);

                // Skip empty rows
                if row == 0 {
                    continue;
                }

                let occupied = all.row(axis, a, b);
                masks.set(2 * axis, a - 1, b - 1, unpad(exposed_neg(row, occupied), len));
                masks.set(2 * axis + 1, a - 1, b - 1, unpad(exposed_pos(row, occupied), len));
            }
        }
    }

    masks.total_faces()
}

/// Re-flatten face masks into planes.
///
/// Bit `s` of mask row `(u, v)` becomes bit `v` of column `u` on plane `s`.
/// `slices` is cleared first so no bits leak in from a previous group.
pub fn build_slices(masks: &FaceMasks, slices: &mut SliceMasks) {
    slices.clear();

    for face in 0..6 {
        for u in 0..CS {
            for v in 0..CS {
                for slice in SetBits(masks.get(face, u, v)) {
                    *slices.get_mut(face, slice as usize, u) |= 1u64 << v;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FACE_NEG_X, FACE_NEG_Y, FACE_NEG_Z, FACE_POS_X, FACE_POS_Y, FACE_POS_Z};

    const CELLS: [usize; 3] = [CS, CS, CS];

    /// Set usable cell `(x, y, z)` (0-based) in both grids.
    fn put(group: &mut OccupancyGrid, all: &mut OccupancyGrid, x: usize, y: usize, z: usize) {
        group.set([x + 1, y + 1, z + 1]);
        all.set([x + 1, y + 1, z + 1]);
    }

    fn count_visible_faces(masks: &FaceMasks) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for (face, count) in counts.iter_mut().enumerate() {
            for u in 0..CS {
                for v in 0..CS {
                    *count += masks.get(face, u, v).count_ones() as usize;
                }
            }
        }
        counts
    }

    fn cull(group: &OccupancyGrid, all: &OccupancyGrid) -> FaceMasks {
        let mut masks = FaceMasks::new();
        cull_faces(group, all, CELLS, &mut masks);
        masks
    }

    #[test]
    fn single_cell_six_faces() {
        let (mut group, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        put(&mut group, &mut all, 31, 31, 31);

        let masks = cull(&group, &all);
        assert_eq!(masks.total_faces(), 6, "Single cell should have 6 visible faces");
        assert_eq!(count_visible_faces(&masks), [1; 6]);
        assert_eq!(masks.get(FACE_POS_X, 31, 31), 1 << 31);
    }

    #[test]
    fn two_adjacent_share_face() {
        for offset in [[1, 0, 0], [0, 1, 0], [0, 0, 1]] {
            let (mut group, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
            put(&mut group, &mut all, 10, 10, 10);
            put(&mut group, &mut all, 10 + offset[0], 10 + offset[1], 10 + offset[2]);

            // Two cells: 12 faces - 2 hidden = 10
            assert_eq!(cull(&group, &all).total_faces(), 10);
        }
    }

    #[test]
    fn foreign_group_occludes() {
        let (mut stone, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        put(&mut stone, &mut all, 20, 20, 20);
        // Another group's cell above.
        all.set([21, 22, 21]);

        let masks = cull(&stone, &all);
        assert_eq!(masks.total_faces(), 5);
        assert_eq!(count_visible_faces(&masks)[FACE_POS_Y], 0);
        assert_eq!(count_visible_faces(&masks)[FACE_NEG_Y], 1);
    }

    #[test]
    fn cube_3x3x3_interior_hidden() {
        let (mut group, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        for x in 30..33 {
            for y in 30..33 {
                for z in 30..33 {
                    put(&mut group, &mut all, x, y, z);
                }
            }
        }

        // Surface of 3x3x3 cube has 9 faces per side = 54 total
        assert_eq!(cull(&group, &all).total_faces(), 54);
    }

    #[test]
    fn padding_cells_emit_no_faces_but_occlude() {
        let cells = [4, 4, 4];
        let (mut group, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        // Fill usable cells and both padding layers.
        for x in 0..6 {
            for y in 0..6 {
                for z in 0..6 {
                    group.set([x, y, z]);
                    all.set([x, y, z]);
                }
            }
        }

        let mut masks = FaceMasks::new();
        assert_eq!(cull_faces(&group, &all, cells, &mut masks), 0);

        // Remove the +X padding layer: the 4x4 boundary faces appear.
        let mut open = OccupancyGrid::new();
        for x in 0..5 {
            for y in 0..6 {
                for z in 0..6 {
                    open.set([x, y, z]);
                }
            }
        }
        assert_eq!(cull_faces(&open, &open, cells, &mut masks), 16);
        assert_eq!(count_visible_faces(&masks)[FACE_POS_X], 16);
        assert_eq!(masks.get(FACE_POS_X, 0, 0), 1 << 3);
    }

    #[test]
    fn masks_are_cleared_between_groups() {
        let (mut a, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        put(&mut a, &mut all, 5, 5, 5);
        let mut b = OccupancyGrid::new();
        b.set([41, 41, 41]);
        all.set([41, 41, 41]);

        let mut masks = FaceMasks::new();
        assert_eq!(cull_faces(&a, &all, CELLS, &mut masks), 6);
        assert_eq!(cull_faces(&b, &all, CELLS, &mut masks), 6);
        assert_eq!(masks.get(FACE_NEG_Z, 5, 5), 0);
    }

    #[test]
    fn slices_transpose_rows_into_planes() {
        let (mut group, mut all) = (OccupancyGrid::new(), OccupancyGrid::new());
        // Row of 3 cells along X at y = 7, z = 9.
        for x in 2..5 {
            put(&mut group, &mut all, x, 7, 9);
        }
        let masks = cull(&group, &all);

        let mut slices = SliceMasks::new();
        build_slices(&masks, &mut slices);
        assert_eq!(slices.total_faces(), masks.total_faces());

        // -X face at x = 2: plane 2, u = y, bit v = z.
        assert_eq!(slices.get(FACE_NEG_X, 2, 7), 1 << 9);
        assert_eq!(slices.get(FACE_POS_X, 4, 7), 1 << 9);
        // +Y faces on plane y = 7, u = x, bit v = z.
        for x in 2..5 {
            assert_eq!(slices.get(FACE_POS_Y, 7, x), 1 << 9);
        }
        // -Z faces on plane z = 9, u = x, bit v = y.
        assert_eq!(slices.get(FACE_NEG_Z, 9, 3), 1 << 7);
        assert_eq!(slices.get(FACE_POS_Z, 9, 3), 1 << 7);
    }
}
