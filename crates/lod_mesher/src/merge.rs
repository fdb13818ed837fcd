//! Greedy merge over slice bitsets.
//!
//! Each plane is `CS` columns of 64-bit words; bit `v` of column `u` is a
//! visible face at `(u, v)`. A column is scanned run by run: the lowest run of
//! set bits becomes the quad's height, then the quad grows across `u + 1, ..`
//! for as long as the next column contains the same run. Consumed bits are
//! cleared immediately, so no face is emitted twice.
//!
//! All six directions share one implementation; the plane axes only matter
//! when the quad is expanded to vertices.

use crate::bits::{lowest_set, run_length, run_mask};
use crate::core::{SliceMasks, CS};

/// A merged rectangle of faces on one plane, in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceQuad {
    pub face: usize,
    /// Plane index along the face axis.
    pub slice: u32,
    pub u: u32,
    pub v: u32,
    /// Extent along `u`.
    pub du: u32,
    /// Extent along `v`.
    pub dv: u32,
}

impl SliceQuad {
    /// Number of unit faces covered.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.du * self.dv
    }
}

/// Merge one plane, consuming every bit in `plane`.
pub fn merge_plane<F>(face: usize, slice: u32, plane: &mut [u64], emit: &mut F)
where
    F: FnMut(SliceQuad),
{
    let columns = plane.len();

    for u in 0..columns {
        while let Some(v) = lowest_set(plane[u]) {
            let dv = run_length(plane[u], v);
            let mask = run_mask(v, dv);
            plane[u] &= !mask;

            // Extend across following columns while they hold the whole run
            let mut du = 1;
            while u + du < columns && plane[u + du] & mask == mask {
                plane[u + du] &= !mask;
                du += 1;
            }

            emit(SliceQuad {
                face,
                slice,
                u: u as u32,
                v,
                du: du as u32,
                dv,
            });
        }
    }
}

/// Greedy-merge all planes of all six directions.
///
/// Leaves `slices` empty. Returns the number of quads emitted.
pub fn greedy_merge<F>(slices: &mut SliceMasks, mut emit: F) -> usize
where
    F: FnMut(SliceQuad),
{
    let mut count = 0;
    let mut counted = |quad: SliceQuad| {
        count += 1;
        emit(quad);
    };

    for face in 0..6 {
        for slice in 0..CS {
            let plane = slices.plane_mut(face, slice);

            // Skip empty planes
            if plane.iter().all(|&c| c == 0) {
                continue;
            }

            merge_plane(face, slice as u32, plane, &mut counted);
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FACE_NEG_X, FACE_POS_Y, FACE_POS_Z};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn merge_all(slices: &mut SliceMasks) -> Vec<SliceQuad> {
        let mut quads = Vec::new();
        let n = greedy_merge(slices, |q| quads.push(q));
        assert_eq!(n, quads.len());
        quads
    }

    fn fill_rect(
        slices: &mut SliceMasks,
        face: usize,
        slice: usize,
        u: std::ops::Range<usize>,
        v: std::ops::Range<usize>,
    ) {
        for cu in u {
            for cv in v.clone() {
                *slices.get_mut(face, slice, cu) |= 1u64 << cv;
            }
        }
    }

    #[test]
    fn single_face_single_quad() {
        let mut slices = SliceMasks::new();
        *slices.get_mut(FACE_POS_Y, 31, 31) = 1 << 31;

        let quads = merge_all(&mut slices);
        assert_eq!(
            quads,
            vec![SliceQuad { face: FACE_POS_Y, slice: 31, u: 31, v: 31, du: 1, dv: 1 }]
        );
    }

    #[test]
    fn square_merges_to_one_quad() {
        let mut slices = SliceMasks::new();
        fill_rect(&mut slices, FACE_POS_Z, 20, 20..30, 20..30);

        let quads = merge_all(&mut slices);
        assert_eq!(quads.len(), 1, "10x10 square should merge to 1 quad");
        assert_eq!(quads[0].area(), 100);
        assert_eq!((quads[0].u, quads[0].v, quads[0].du, quads[0].dv), (20, 20, 10, 10));
    }

    #[test]
    fn full_plane_merges_to_one_quad() {
        let mut slices = SliceMasks::new();
        fill_rect(&mut slices, FACE_NEG_X, 0, 0..CS, 0..CS);

        let quads = merge_all(&mut slices);
        assert_eq!(quads.len(), 1);
        assert_eq!((quads[0].du, quads[0].dv), (CS as u32, CS as u32));
    }

    #[test]
    fn striped_columns_do_not_merge_across_gaps() {
        let mut slices = SliceMasks::new();
        // Columns u = 0, 2, 4, 6 fully set along v 0..8.
        for u in (0..8).step_by(2) {
            fill_rect(&mut slices, FACE_POS_Y, 5, u..u + 1, 0..8);
        }

        let quads = merge_all(&mut slices);
        assert_eq!(quads.len(), 4);
        assert!(quads.iter().all(|q| q.du == 1 && q.dv == 8));
    }

    #[test]
    fn l_shape_needs_two_quads() {
        let mut slices = SliceMasks::new();
        fill_rect(&mut slices, FACE_POS_Y, 0, 0..1, 0..4);
        fill_rect(&mut slices, FACE_POS_Y, 0, 1..4, 0..1);

        let quads = merge_all(&mut slices);
        assert_eq!(quads.len(), 2);
        assert_eq!(quads.iter().map(SliceQuad::area).sum::<u32>(), 7);
    }

    #[test]
    fn partial_column_match_keeps_leftover_bits() {
        let mut slices = SliceMasks::new();
        // Column 0: v 0..2. Column 1: v 0..4 contains the run, leaving v 2..4.
        fill_rect(&mut slices, FACE_POS_Y, 0, 0..1, 0..2);
        fill_rect(&mut slices, FACE_POS_Y, 0, 1..2, 0..4);

        let quads = merge_all(&mut slices);
        assert_eq!(
            quads,
            vec![
                SliceQuad { face: FACE_POS_Y, slice: 0, u: 0, v: 0, du: 2, dv: 2 },
                SliceQuad { face: FACE_POS_Y, slice: 0, u: 1, v: 2, du: 1, dv: 2 },
            ]
        );
    }

    #[test]
    fn merge_consumes_all_bits() {
        let mut slices = SliceMasks::new();
        fill_rect(&mut slices, FACE_POS_Z, 3, 1..9, 4..11);
        fill_rect(&mut slices, FACE_NEG_X, 61, 60..62, 0..62);

        merge_all(&mut slices);
        assert_eq!(slices.total_faces(), 0);
    }

    #[test]
    fn random_planes_cover_exactly_without_overlap() {
        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..20 {
            let mut slices = SliceMasks::new();
            for face in 0..6 {
                for slice in [0, 17, 61] {
                    for u in 0..CS {
                        let column = rng.gen::<u64>() & crate::bits::low_mask(CS as u32);
                        *slices.get_mut(face, slice, u) = column;
                    }
                }
            }
            let reference = slices.clone();
            let total = slices.total_faces();

            let quads = merge_all(&mut slices);
            assert_eq!(quads.iter().map(|q| q.area() as usize).sum::<usize>(), total);

            let mut painted = SliceMasks::new();
            for q in &quads {
                let mask = run_mask(q.v, q.dv);
                for u in q.u..q.u + q.du {
                    let column = reference.get(q.face, q.slice as usize, u as usize);
                    assert_eq!(column & mask, mask, "quad covers a hidden face");

                    let cell = painted.get_mut(q.face, q.slice as usize, u as usize);
                    assert_eq!(*cell & mask, 0, "{q:?} overlaps an earlier quad");
                    *cell |= mask;
                }
            }
            assert_eq!(painted.masks, reference.masks);
        }
    }
}
