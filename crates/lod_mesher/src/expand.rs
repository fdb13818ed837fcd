//! Quad expansion to vertices.
//!
//! Converts merged slice quads (cell units, plane coordinates) into four
//! mesh-space vertices. Nodes are centered on multiples of the node size, so
//! cell boundaries sit half a node below each node position.

use glam::{IVec3, Vec3};

use crate::core::{
    face_axis, face_is_positive, Color, Vertex, FACE_NEG_X, FACE_NEG_Y, FACE_NEG_Z, FACE_NORMALS,
    FACE_POS_X, FACE_POS_Y, FACE_POS_Z,
};
use crate::merge::SliceQuad;

/// Plane axes `(u, v)` for faces perpendicular to `axis`.
#[inline]
pub const fn plane_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Mapping from segment cells to mesh space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSpace {
    /// Mesh-space position of the lower corner of cell `(0, 0, 0)`.
    pub origin: Vec3,
    /// Edge length of one cell in world units.
    pub cell_size: f32,
    /// Nodes per cell.
    pub width: u32,
}

impl CellSpace {
    /// Cells of a segment starting at node `segment_start`, with positions
    /// relative to the mesh block at `blockpos_nodes`.
    pub fn new(segment_start: IVec3, blockpos_nodes: IVec3, width: i32, node_size: f32) -> Self {
        let offset = (segment_start - blockpos_nodes).as_vec3() * node_size;
        Self {
            origin: offset - Vec3::splat(node_size / 2.0),
            cell_size: width as f32 * node_size,
            width: width as u32,
        }
    }

    #[inline]
    fn point(&self, cell: [u32; 3]) -> Vec3 {
        self.origin + Vec3::new(cell[0] as f32, cell[1] as f32, cell[2] as f32) * self.cell_size
    }
}

/// Corner order in plane coordinates, 0 = quad start and 1 = quad end.
///
/// Triangles `(0, 1, 2)` and `(2, 3, 0)` wind counter-clockwise when seen
/// from the side the normal points to.
fn corner_order(face: usize) -> [[u32; 2]; 4] {
    match face {
        // u × v points along +X and +Z, but along -Y
        FACE_POS_X | FACE_NEG_Y | FACE_POS_Z => [[0, 0], [1, 0], [1, 1], [0, 1]],
        FACE_NEG_X | FACE_POS_Y | FACE_NEG_Z => [[0, 0], [0, 1], [1, 1], [1, 0]],
        _ => unreachable!("Invalid face direction"),
    }
}

/// Expand one merged quad into four vertices.
///
/// UVs tile once per node, so a merged quad keeps the texture density of a
/// single node face at any LOD width.
pub fn quad_vertices(quad: &SliceQuad, space: &CellSpace, color: Color) -> [Vertex; 4] {
    let axis = face_axis(quad.face);
    let (ua, va) = plane_axes(axis);
    // Positive faces sit on the far side of their cell
    let depth = quad.slice + u32::from(face_is_positive(quad.face));

    let normal = FACE_NORMALS[quad.face];
    let color = color.to_rgba();
    let u_tiles = (quad.du * space.width) as f32;
    let v_tiles = (quad.dv * space.width) as f32;

    corner_order(quad.face).map(|[cu, cv]| {
        let mut cell = [0u32; 3];
        cell[axis] = depth;
        cell[ua] = quad.u + cu * quad.du;
        cell[va] = quad.v + cv * quad.dv;

        Vertex {
            position: space.point(cell).to_array(),
            normal,
            color,
            uv: [cu as f32 * u_tiles, cv as f32 * v_tiles],
        }
    })
}
