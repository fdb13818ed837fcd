//! Collaborator interfaces consumed and produced by the mesher.
//!
//! The mesher only reads voxels, node definitions and light through these
//! traits, and only writes quads through [`MeshSink`]. Reference
//! implementations live in [`crate::world`], [`crate::light`] and
//! [`crate::collector`].

use glam::IVec3;

use crate::core::{Color, LightPair, Material, Vertex};
use crate::light::encode_light;
use crate::node::{ContentId, DrawType, Node};

/// Read-only voxel snapshot.
///
/// Must return [`Node::IGNORE`] for positions outside the loaded area.
/// The snapshot must not change for the duration of one `generate` call.
pub trait VoxelSource {
    fn get_node(&self, p: IVec3) -> Node;
}

/// Read-only node definition lookup.
pub trait NodeDefs {
    fn drawtype(&self, content: ContentId) -> DrawType;

    /// Average color of the given face of a content type, used in textureless mode.
    fn average_face_color(&self, content: ContentId, face: usize) -> Color;

    /// Light emitted by the content type (0 for non-sources).
    fn light_source(&self, content: ContentId) -> u8;
}

/// Light computation. Treated as a black box by the mesher.
pub trait Lighting {
    /// Light of the face between `node` and `neighbor`.
    fn face_light(&self, node: Node, neighbor: Node) -> LightPair;

    /// Light inside a non-cube node.
    fn interior_light(&self, node: Node) -> LightPair;

    /// Vertex color for a light pair.
    fn encode_light(&self, light: LightPair, light_source: u8) -> Color {
        encode_light(light, light_source)
    }
}

/// Resolves the real texture tile for a node face (textured mode only).
pub trait TileResolver {
    fn resolve_tile(&self, node: Node, blockpos_nodes: IVec3, face: usize) -> Material;
}

/// Append-only destination for emitted quads.
pub trait MeshSink {
    fn append(&mut self, material: Material, vertices: &[Vertex; 4], indices: &[u16; 6]);
}

impl<T: VoxelSource + ?Sized> VoxelSource for &T {
    #[inline]
    fn get_node(&self, p: IVec3) -> Node {
        (**self).get_node(p)
    }
}

impl<T: MeshSink + ?Sized> MeshSink for &mut T {
    fn append(&mut self, material: Material, vertices: &[Vertex; 4], indices: &[u16; 6]) {
        (**self).append(material, vertices, indices)
    }
}

impl MeshSink for Vec<(Material, [Vertex; 4])> {
    fn append(&mut self, material: Material, vertices: &[Vertex; 4], _indices: &[u16; 6]) {
        self.push((material, *vertices));
    }
}
