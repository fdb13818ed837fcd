//! Core type definitions for the LOD mesher.

use bytemuck::{Pod, Zeroable};

/// Bits per occupancy row including the two padding cells (64).
/// The padding allows neighbor lookups with a single shift.
pub const CS_P: usize = 64;
/// Usable cells per row (62).
pub const CS: usize = 62;
/// Padded plane size (CS_P × CS_P = 4096).
pub const CS_P2: usize = CS_P * CS_P;
/// Usable plane size (CS × CS = 3844).
pub const CS2: usize = CS * CS;

/// Side length of a map block in nodes. Caps the light probe distance.
pub const MAP_BLOCKSIZE: i32 = 16;

/// Face direction indices. `face / 2` is the axis, odd faces point along +axis.
pub const FACE_NEG_X: usize = 0;
pub const FACE_POS_X: usize = 1;
pub const FACE_NEG_Y: usize = 2;
pub const FACE_POS_Y: usize = 3;
pub const FACE_NEG_Z: usize = 4;
pub const FACE_POS_Z: usize = 5;

/// Normal vectors for each face direction.
pub const FACE_NORMALS: [[f32; 3]; 6] = [
    [-1.0, 0.0, 0.0], // -X
    [1.0, 0.0, 0.0],  // +X
    [0.0, -1.0, 0.0], // -Y
    [0.0, 1.0, 0.0],  // +Y
    [0.0, 0.0, -1.0], // -Z
    [0.0, 0.0, 1.0],  // +Z
];

/// Axis a face direction is perpendicular to (0 = X, 1 = Y, 2 = Z).
#[inline]
pub const fn face_axis(face: usize) -> usize {
    face / 2
}

/// Whether a face points along the positive direction of its axis.
#[inline]
pub const fn face_is_positive(face: usize) -> bool {
    face % 2 == 1
}

/// Visible-face masks for one group, all 6 directions.
///
/// Memory layout: `masks[face * CS2 + u * CS + v]` holds the visible faces of
/// the row at plane coordinates `(u, v)`, one bit per cell along the face axis.
/// The plane coordinates are the two remaining axes in ascending order
/// (X faces: `(y, z)`, Y faces: `(x, z)`, Z faces: `(x, y)`).
#[derive(Clone)]
pub struct FaceMasks {
    pub masks: Box<[u64]>,
}

impl FaceMasks {
    /// Create empty face masks on the heap.
    pub fn new() -> Self {
        Self { masks: vec![0u64; 6 * CS2].into_boxed_slice() }
    }

    /// Get the face mask for a row.
    #[inline]
    pub fn get(&self, face: usize, u: usize, v: usize) -> u64 {
        self.masks[face * CS2 + u * CS + v]
    }

    /// Set the face mask for a row.
    #[inline]
    pub fn set(&mut self, face: usize, u: usize, v: usize, mask: u64) {
        self.masks[face * CS2 + u * CS + v] = mask;
    }

    /// Count total visible faces.
    pub fn total_faces(&self) -> usize {
        self.masks.iter().map(|m| m.count_ones() as usize).sum()
    }

    /// Clear all masks.
    pub fn clear(&mut self) {
        self.masks.fill(0);
    }
}

impl Default for FaceMasks {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible faces re-flattened into planes, the surface the greedy merge walks.
///
/// `masks[face * CS2 + slice * CS + u]` has bit `v` set when a face exists at
/// plane coordinates `(u, v)` on plane `slice` along the face axis.
#[derive(Clone)]
pub struct SliceMasks {
    pub masks: Box<[u64]>,
}

impl SliceMasks {
    pub fn new() -> Self {
        Self { masks: vec![0u64; 6 * CS2].into_boxed_slice() }
    }

    #[inline]
    pub fn get(&self, face: usize, slice: usize, u: usize) -> u64 {
        self.masks[face * CS2 + slice * CS + u]
    }

    #[inline]
    pub fn get_mut(&mut self, face: usize, slice: usize, u: usize) -> &mut u64 {
        &mut self.masks[face * CS2 + slice * CS + u]
    }

    /// The `CS` columns of one plane.
    #[inline]
    pub fn plane_mut(&mut self, face: usize, slice: usize) -> &mut [u64] {
        let start = face * CS2 + slice * CS;
        &mut self.masks[start..start + CS]
    }

    pub fn total_faces(&self) -> usize {
        self.masks.iter().map(|m| m.count_ones() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.masks.fill(0);
    }
}

impl Default for SliceMasks {
    fn default() -> Self {
        Self::new()
    }
}

/// 8-bit ARGB color, the layout the engine's vertex colors use.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color from RGB.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Channel-wise multiply of RGB by `other`, keeping this color's alpha.
    pub fn modulate_rgb(self, other: Color) -> Color {
        let mul = |a: u8, b: u8| (u16::from(a) * u16::from(b) / 255) as u8;
        Color {
            a: self.a,
            r: mul(self.r, other.r),
            g: mul(self.g, other.g),
            b: mul(self.b, other.b),
        }
    }

    /// RGBA byte order for vertex buffers.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Day/night light levels of a face, packed as `day | night << 8`.
///
/// Ordering compares the packed value, so `max` prefers the brighter night
/// bank first and the brighter day bank second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightPair(pub u16);

impl LightPair {
    pub const fn new(day: u8, night: u8) -> Self {
        Self(day as u16 | (night as u16) << 8)
    }

    #[inline]
    pub const fn day(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn night(self) -> u8 {
        (self.0 >> 8) as u8
    }
}

/// Batching key: every face sharing a content type and light merges together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeKey {
    pub content: crate::node::ContentId,
    pub light: LightPair,
}

impl std::hash::Hash for NodeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(u32::from(self.content) | u32::from(self.light.0) << 16);
    }
}

/// Material reference attached to every emitted quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Material {
    /// Flat vertex-colored material used in textureless mode.
    Untextured,
    /// A tile resolved by the content's tile resolver.
    Tile(u32),
}

/// Mesh vertex, laid out for direct upload to GPU buffers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// RGBA.
    pub color: [u8; 4],
    pub uv: [f32; 2],
}

/// Two triangles per quad.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];
