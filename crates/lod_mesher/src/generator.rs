//! LOD mesh generation driver.
//!
//! Orchestrates the complete pipeline for one mesh block:
//! 1. Split the block into segments of at most 62 cells per axis
//! 2. Sample each segment into per-group occupancy (see [`crate::occupancy`])
//! 3. Cull hidden faces and transpose them into slices (see [`crate::cull`])
//! 4. Greedy-merge the slices and append quads to the sink (see [`crate::merge`])
//!
//! Every block is meshed in two passes, transparent drawtypes first.

use glam::IVec3;
use log::{debug, trace};

use crate::config::LodConfig;
use crate::core::{Color, FaceMasks, Material, NodeKey, SliceMasks, CS, QUAD_INDICES};
use crate::cull::{build_slices, cull_faces};
use crate::error::LodError;
use crate::expand::{quad_vertices, CellSpace};
use crate::merge::greedy_merge;
use crate::node::{DrawTypeSet, Node};
use crate::occupancy::{Segment, SegmentSampler};
use crate::source::{Lighting, MeshSink, NodeDefs, TileResolver, VoxelSource};

/// Highest LOD level; its cells are 128 nodes wide.
pub const MAX_LOD: u8 = 8;

/// Everything a generator reads for one mesh block.
pub struct MeshMakeData<'a, V, D, L> {
    pub voxels: &'a V,
    pub nodedef: &'a D,
    pub lighting: &'a L,
    /// Tile lookup for textured mode. Without one, quads fall back to flat colors.
    pub tiles: Option<&'a dyn TileResolver>,
    /// First node of the mesh block. Vertex positions are relative to it.
    pub blockpos_nodes: IVec3,
    /// Edge length of the mesh block in nodes.
    pub side_length: i32,
}

impl<'a, V, D, L> MeshMakeData<'a, V, D, L>
where
    V: VoxelSource,
    D: NodeDefs,
    L: Lighting,
{
    pub fn new(
        voxels: &'a V,
        nodedef: &'a D,
        lighting: &'a L,
        blockpos_nodes: IVec3,
        side_length: i32,
    ) -> Result<Self, LodError> {
        if side_length <= 0 {
            return Err(LodError::InvalidSideLength(side_length));
        }
        Ok(Self { voxels, nodedef, lighting, tiles: None, blockpos_nodes, side_length })
    }

    pub fn with_tiles(mut self, tiles: &'a dyn TileResolver) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Material and vertex color of one face direction of a group.
    fn face_material(
        &self,
        node: Node,
        light: Color,
        face: usize,
        textureless: bool,
    ) -> (Material, Color) {
        match self.tiles {
            Some(tiles) if !textureless => {
                (tiles.resolve_tile(node, self.blockpos_nodes, face), light)
            }
            _ => {
                let average = self.nodedef.average_face_color(node.content, face);
                (Material::Untextured, light.modulate_rgb(average))
            }
        }
    }
}

/// Statistics about one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LodStats {
    /// Nodes per cell.
    pub width: i32,
    /// Segments sampled, counted once per pass.
    pub segments: usize,
    /// Groups that had at least one visible face.
    pub groups: usize,
    /// Total number of quads emitted
    pub quads: usize,
    /// Quads per face direction
    pub quads_per_face: [usize; 6],
    /// Visible unit faces before merging
    pub visible_faces: usize,
}

impl LodStats {
    /// Accumulate the counters of another run at the same width.
    pub fn add(&mut self, other: &LodStats) {
        self.segments += other.segments;
        self.groups += other.groups;
        self.quads += other.quads;
        self.visible_faces += other.visible_faces;
        for (a, b) in self.quads_per_face.iter_mut().zip(other.quads_per_face) {
            *a += b;
        }
    }

    /// Merge efficiency (1.0 = everything merged into one quad, 0.0 = no merging).
    pub fn merge_efficiency(&self) -> f32 {
        if self.visible_faces == 0 {
            return 0.0;
        }
        1.0 - self.quads as f32 / self.visible_faces as f32
    }
}

/// Greedy LOD mesher for one mesh block.
///
/// Owns its scratch bitsets, so independent generators can run on separate
/// threads without sharing anything but the read-only inputs.
pub struct LodMeshGenerator<'a, V, D, L> {
    data: MeshMakeData<'a, V, D, L>,
    collector: &'a mut dyn MeshSink,
    config: LodConfig,
    faces: FaceMasks,
    slices: SliceMasks,
}

impl<'a, V, D, L> LodMeshGenerator<'a, V, D, L>
where
    V: VoxelSource,
    D: NodeDefs,
    L: Lighting,
{
    pub fn new(
        data: MeshMakeData<'a, V, D, L>,
        collector: &'a mut dyn MeshSink,
        config: LodConfig,
    ) -> Result<Self, LodError> {
        config.validate()?;
        Ok(Self {
            data,
            collector,
            config,
            faces: FaceMasks::new(),
            slices: SliceMasks::new(),
        })
    }

    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Nodes per cell for an LOD level: `2^(lod - 1)`, capped at 128 and at the
    /// block's side length.
    pub fn lod_width(&self, lod: u8) -> i32 {
        let shift = lod.saturating_sub(1).min(MAX_LOD - 1);
        (1i32 << shift).min(self.data.side_length)
    }

    /// Mesh the block at the given LOD level (1..=8), transparent pass first.
    pub fn generate(&mut self, lod: u8) -> LodStats {
        debug_assert!((1..=MAX_LOD).contains(&lod), "LOD level {lod} out of range");
        let width = self.lod_width(lod);

        let transparent = self.config.transparent_types();
        let solid = self.config.solid_types();

        let mut stats = self.generate_lod_chunks(transparent, width);
        stats.add(&self.generate_lod_chunks(solid, width));

        debug!(
            "lod {} (width {}): {} segments, {} groups, {} quads from {} faces",
            lod, width, stats.segments, stats.groups, stats.quads, stats.visible_faces
        );
        stats
    }

    /// Mesh every segment of the block for one set of drawtypes.
    ///
    /// Segments span `62 * width` nodes per axis; the last one along an axis
    /// is clipped to what remains of the block.
    pub fn generate_lod_chunks(&mut self, types: DrawTypeSet, width: i32) -> LodStats {
        let mut stats = LodStats { width, ..Default::default() };
        if types.is_empty() {
            return stats;
        }

        let side = self.data.side_length;
        let span = CS as i32 * width;

        for z in (0..side).step_by(span as usize) {
            for y in (0..side).step_by(span as usize) {
                for x in (0..side).step_by(span as usize) {
                    let offset = IVec3::new(x, y, z);
                    let segment = Segment {
                        start: self.data.blockpos_nodes + offset,
                        size: (IVec3::splat(side) - offset).min(IVec3::splat(span)),
                        width,
                    };
                    self.generate_greedy_lod(types, &segment, &mut stats);
                    stats.segments += 1;
                }
            }
        }

        stats
    }

    /// Sample one segment, then cull and merge each of its groups in key order.
    pub fn generate_greedy_lod(
        &mut self,
        types: DrawTypeSet,
        segment: &Segment,
        stats: &mut LodStats,
    ) {
        let sampler = SegmentSampler::new(self.data.voxels, self.data.nodedef, self.data.lighting);
        let occupancy = sampler.sample_segment(segment, types);

        trace!(
            "segment at {} ({:?} cells): {} groups",
            segment.start,
            occupancy.cells,
            occupancy.groups.len()
        );

        if occupancy.groups.is_empty() {
            return;
        }

        let space = CellSpace::new(
            segment.start,
            self.data.blockpos_nodes,
            segment.width,
            self.config.node_size,
        );

        for (key, group) in occupancy.sorted_groups() {
            let visible =
                cull_faces(&group.cells, &occupancy.all, occupancy.cells, &mut self.faces);
            if visible == 0 {
                continue;
            }
            build_slices(&self.faces, &mut self.slices);

            stats.groups += 1;
            stats.visible_faces += visible;
            self.generate_bitset_mesh(group.node, *key, &space, stats);
        }
    }

    /// Emit the merged quads of the group currently held in the slices.
    pub fn generate_bitset_mesh(
        &mut self,
        node: Node,
        key: NodeKey,
        space: &CellSpace,
        stats: &mut LodStats,
    ) {
        let data = &self.data;
        let textureless = self.config.textureless;
        let collector = &mut *self.collector;

        let light_source = data.nodedef.light_source(node.content);
        let light = data.lighting.encode_light(key.light, light_source);

        // Resolved once per direction
        let mut materials: [Option<(Material, Color)>; 6] = [None; 6];
        let quads_per_face = &mut stats.quads_per_face;

        let quads = greedy_merge(&mut self.slices, |quad| {
            let (material, color) = *materials[quad.face]
                .get_or_insert_with(|| data.face_material(node, light, quad.face, textureless));

            let vertices = quad_vertices(&quad, space, color);
            collector.append(material, &vertices, &QUAD_INDICES);
            quads_per_face[quad.face] += 1;
        });

        stats.quads += quads;
    }
}
