//! Sampling a segment into occupancy bitsets.
//!
//! A segment is sampled on a grid of `width`-node cells. Every sampled cell
//! is classified into a group (content type + light) and recorded in two
//! places: the group's own occupancy and the combined occupancy of all groups.
//! The combined occupancy is what face culling tests neighbors against.
//!
//! Memory layout of [`OccupancyGrid`]: three planes of `CS_P × CS_P` rows, one
//! per axis. Row `(a, b)` of axis `k` holds one bit per cell along axis `k`,
//! where `(a, b)` are the two remaining coordinates in ascending order.

use std::collections::HashMap;

use glam::IVec3;

use crate::core::{LightPair, NodeKey, CS, CS_P, CS_P2, MAP_BLOCKSIZE};
use crate::node::{DrawType, DrawTypeSet, Node};
use crate::source::{Lighting, NodeDefs, VoxelSource};

/// Split a padded cell position into `(a, b, bit)` for the given axis.
#[inline]
pub const fn axis_coords(axis: usize, cell: [usize; 3]) -> (usize, usize, usize) {
    match axis {
        0 => (cell[1], cell[2], cell[0]),
        1 => (cell[0], cell[2], cell[1]),
        _ => (cell[0], cell[1], cell[2]),
    }
}

/// Per-axis occupancy rows of one padded segment.
#[derive(Clone)]
pub struct OccupancyGrid {
    rows: Box<[u64]>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self { rows: vec![0u64; 3 * CS_P2].into_boxed_slice() }
    }

    #[inline]
    pub fn row(&self, axis: usize, a: usize, b: usize) -> u64 {
        self.rows[axis * CS_P2 + a * CS_P + b]
    }

    /// Mark a padded cell as occupied in the rows of one axis.
    #[inline]
    pub fn set_axis(&mut self, axis: usize, cell: [usize; 3]) {
        debug_assert!(cell.iter().all(|&c| c < CS_P), "cell out of bounds");
        let (a, b, bit) = axis_coords(axis, cell);
        self.rows[axis * CS_P2 + a * CS_P + b] |= 1u64 << bit;
    }

    /// Mark a padded cell as occupied in the rows of all three axes.
    #[inline]
    pub fn set(&mut self, cell: [usize; 3]) {
        for axis in 0..3 {
            self.set_axis(axis, cell);
        }
    }

    #[inline]
    pub fn is_set(&self, axis: usize, cell: [usize; 3]) -> bool {
        let (a, b, bit) = axis_coords(axis, cell);
        (self.row(axis, a, b) >> bit) & 1 != 0
    }

    /// Number of occupied cells recorded for one axis.
    pub fn count(&self, axis: usize) -> usize {
        self.rows[axis * CS_P2..(axis + 1) * CS_P2]
            .iter()
            .map(|r| r.count_ones() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    pub fn clear(&mut self) {
        self.rows.fill(0);
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// A sub-volume small enough for 64-bit rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// First node of the segment.
    pub start: IVec3,
    /// Extent in nodes.
    pub size: IVec3,
    /// Nodes per sampled cell along each axis.
    pub width: i32,
}

impl Segment {
    /// Usable cells per axis, `ceil(size / width)`.
    pub fn cells(&self) -> [usize; 3] {
        let w = self.width;
        let n = (self.size + IVec3::splat(w - 1)) / w;
        [n.x as usize, n.y as usize, n.z as usize]
    }

    /// Node sampled for padded cell `k`: the last node of the cell, so cell 0
    /// is the last node before the segment.
    #[inline]
    pub fn sample_pos(&self, k: [usize; 3]) -> IVec3 {
        let k = IVec3::new(k[0] as i32, k[1] as i32, k[2] as i32);
        self.start - IVec3::ONE + k * self.width
    }
}

/// All cells of one group, plus a representative node for tile/color lookup.
#[derive(Clone)]
pub struct Group {
    pub node: Node,
    pub cells: OccupancyGrid,
}

/// Result of sampling one segment for one pass.
pub struct SegmentOccupancy {
    /// Usable cells per axis.
    pub cells: [usize; 3],
    /// Union of every group's cells, including padding cells.
    pub all: OccupancyGrid,
    pub groups: HashMap<NodeKey, Group>,
}

impl SegmentOccupancy {
    /// Groups ordered by key, so emission order does not depend on hashing.
    pub fn sorted_groups(&self) -> Vec<(&NodeKey, &Group)> {
        let mut groups: Vec<_> = self.groups.iter().collect();
        groups.sort_unstable_by_key(|(key, _)| **key);
        groups
    }

    fn group_mut(&mut self, key: NodeKey, node: Node) -> &mut OccupancyGrid {
        &mut self
            .groups
            .entry(key)
            .or_insert_with(|| Group { node, cells: OccupancyGrid::new() })
            .cells
    }
}

/// Samples a segment against the voxel, node definition and light collaborators.
pub struct SegmentSampler<'a, V, D, L> {
    pub voxels: &'a V,
    pub nodedef: &'a D,
    pub lighting: &'a L,
}

impl<'a, V, D, L> SegmentSampler<'a, V, D, L>
where
    V: VoxelSource,
    D: NodeDefs,
    L: Lighting,
{
    pub fn new(voxels: &'a V, nodedef: &'a D, lighting: &'a L) -> Self {
        Self { voxels, nodedef, lighting }
    }

    /// Fetch the node representing a sampled cell.
    ///
    /// Air-like samples look straight down up to `width - 1` nodes and take
    /// the first non-air node, so coarse cells under overhangs are not lost.
    /// Returns `None` for ignore nodes and drawtypes outside `types`.
    pub fn sample(&self, p: IVec3, width: i32, types: DrawTypeSet) -> Option<(Node, DrawType)> {
        let mut node = self.voxels.get_node(p);
        if node.is_ignore() {
            return None;
        }
        let mut drawtype = self.nodedef.drawtype(node.content);
        let mut depth = 1;
        while drawtype == DrawType::Airlike && depth < width {
            node = self.voxels.get_node(p - IVec3::new(0, depth, 0));
            drawtype = self.nodedef.drawtype(node.content);
            depth += 1;
        }
        if node.is_ignore() || !types.contains(drawtype) {
            return None;
        }
        Some((node, drawtype))
    }

    /// Brighter of the two face lights seen `step` away on either side.
    fn max_face_light(&self, node: Node, p: IVec3, step: IVec3) -> LightPair {
        let ahead = self.lighting.face_light(node, self.voxels.get_node(p + step));
        let behind = self.lighting.face_light(node, self.voxels.get_node(p - step));
        ahead.max(behind)
    }

    /// Sample every cell of `segment`, including one padding cell on each side.
    ///
    /// # Panics
    /// Panics if the segment needs more than 62 cells on any axis.
    pub fn sample_segment(&self, segment: &Segment, types: DrawTypeSet) -> SegmentOccupancy {
        assert!(segment.width >= 1, "cell width must be >= 1");
        let cells = segment.cells();
        assert!(
            cells.iter().all(|&n| n <= CS),
            "segment of {:?} cells exceeds the {} cell row budget",
            cells,
            CS
        );

        let mut out = SegmentOccupancy {
            cells,
            all: OccupancyGrid::new(),
            groups: HashMap::new(),
        };
        let light_step = segment.width.min(MAP_BLOCKSIZE);

        for kz in 0..=cells[2] + 1 {
            for ky in 0..=cells[1] + 1 {
                for kx in 0..=cells[0] + 1 {
                    let cell = [kx, ky, kz];
                    let p = segment.sample_pos(cell);
                    let Some((node, drawtype)) = self.sample(p, segment.width, types) else {
                        continue;
                    };

                    if drawtype == DrawType::Normal {
                        // Lighting is direction dependent: each axis is keyed
                        // by the brightest sample along that axis.
                        for axis in 0..3 {
                            let mut step = IVec3::ZERO;
                            step[axis] = light_step;
                            let light = self.max_face_light(node, p, step);
                            let key = NodeKey { content: node.content, light };
                            out.group_mut(key, node).set_axis(axis, cell);
                        }
                    } else {
                        let light = self.lighting.interior_light(node);
                        let key = NodeKey { content: node.content, light };
                        out.group_mut(key, node).set(cell);
                    }

                    out.all.set(cell);
                }
            }
        }

        out
    }
}
