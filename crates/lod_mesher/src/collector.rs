//! Mesh output batched by material.
//!
//! [`MeshCollector`] is the reference [`MeshSink`]: quads sharing a material
//! land in the same [`MeshBuffer`] until its 16-bit index space is used up.

use std::collections::HashMap;

use crate::core::{Material, Vertex};
use crate::source::MeshSink;

/// Vertices a buffer may hold while still addressable by `u16` indices.
pub const MAX_BUFFER_VERTICES: usize = u16::MAX as usize + 1;

/// Geometry of one material, ready for GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffer {
    pub material: Material,
    pub vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle), local to this buffer.
    pub indices: Vec<u16>,
}

impl MeshBuffer {
    pub fn new(material: Material) -> Self {
        Self { material, vertices: Vec::new(), indices: Vec::new() }
    }

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex data.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index data.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn has_room(&self, vertices: usize) -> bool {
        self.vertices.len() + vertices <= MAX_BUFFER_VERTICES
    }
}

/// Collects emitted quads into per-material buffers.
#[derive(Clone, Debug, Default)]
pub struct MeshCollector {
    buffers: Vec<MeshBuffer>,
    /// Buffer currently receiving quads of each material.
    open: HashMap<Material, usize>,
    quads: usize,
}

impl MeshCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> &[MeshBuffer] {
        &self.buffers
    }

    pub fn into_buffers(self) -> Vec<MeshBuffer> {
        self.buffers
    }

    /// All buffers holding `material`, in creation order.
    pub fn buffers_for(&self, material: Material) -> impl Iterator<Item = &MeshBuffer> {
        self.buffers.iter().filter(move |b| b.material == material)
    }

    /// Total quads appended.
    pub fn quad_count(&self) -> usize {
        self.quads
    }

    /// Total vertices across all buffers.
    pub fn vertex_count(&self) -> usize {
        self.buffers.iter().map(MeshBuffer::vertex_count).sum()
    }

    /// Total triangles across all buffers.
    pub fn triangle_count(&self) -> usize {
        self.buffers.iter().map(MeshBuffer::triangle_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.quads == 0
    }

    /// Drop all collected geometry.
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.open.clear();
        self.quads = 0;
    }

    fn buffer_with_room(&mut self, material: Material, vertices: usize) -> &mut MeshBuffer {
        let index = match self.open.get(&material).copied() {
            Some(i) if self.buffers[i].has_room(vertices) => i,
            _ => {
                self.buffers.push(MeshBuffer::new(material));
                let i = self.buffers.len() - 1;
                self.open.insert(material, i);
                i
            }
        };
        &mut self.buffers[index]
    }
}

impl MeshSink for MeshCollector {
    fn append(&mut self, material: Material, vertices: &[Vertex; 4], indices: &[u16; 6]) {
        let buffer = self.buffer_with_room(material, vertices.len());
        let base = buffer.vertices.len() as u16;

        buffer.vertices.extend_from_slice(vertices);
        buffer.indices.extend(indices.iter().map(|&i| base + i));
        self.quads += 1;
    }
}
