//! Binary greedy meshing of voxel terrain at multiple levels of detail.
//!
//! A mesh block is sampled on a grid of `2^(lod - 1)`-node cells. Occupancy,
//! face culling and quad merging all run on 64-bit rows (62 cells plus two
//! padding cells), so one instruction processes a whole row of cells.
//! Quads are batched by content type and light level and appended to a
//! caller-provided [`MeshSink`].
//!
//! # Example
//!
//! ```
//! use glam::IVec3;
//! use lod_mesher::{
//!     ContentFeatures, ContentRegistry, DrawType, LodConfig, LodMeshGenerator, MeshCollector,
//!     MeshMakeData, Node, ParamLighting, VoxelGrid,
//! };
//!
//! let mut defs = ContentRegistry::new();
//! let stone = defs.register(ContentFeatures::new("stone", DrawType::Normal)).unwrap();
//!
//! let mut grid = VoxelGrid::with_margin(16).unwrap();
//! grid.fill(IVec3::splat(4), IVec3::splat(11), Node::new(stone));
//!
//! let data = MeshMakeData::new(&grid, &defs, &ParamLighting, IVec3::ZERO, 16).unwrap();
//! let mut collector = MeshCollector::new();
//! let stats = LodMeshGenerator::new(data, &mut collector, LodConfig::default())
//!     .unwrap()
//!     .generate(1);
//!
//! assert_eq!(stats.quads, 6); // One quad per side of the cube
//! assert_eq!(collector.triangle_count(), 12);
//! ```

pub mod bits;
pub mod collector;
pub mod config;
pub mod core;
pub mod cull;
pub mod error;
pub mod expand;
pub mod generator;
pub mod light;
pub mod merge;
pub mod node;
pub mod occupancy;
pub mod source;
pub mod world;

// Re-export primary types
pub use crate::core::{
    Color,
    FaceMasks,
    LightPair,
    Material,
    NodeKey,
    SliceMasks,
    Vertex,
    // Constants
    CS_P, CS, CS_P2, CS2, MAP_BLOCKSIZE,
    FACE_NEG_X, FACE_POS_X, FACE_NEG_Y, FACE_POS_Y, FACE_NEG_Z, FACE_POS_Z,
    FACE_NORMALS, QUAD_INDICES,
};
pub use crate::node::{
    ContentId, DrawType, DrawTypeSet, Node, CONTENT_AIR, CONTENT_IGNORE, CONTENT_UNKNOWN,
};
pub use crate::source::{Lighting, MeshSink, NodeDefs, TileResolver, VoxelSource};

// Re-export main entry points
pub use crate::collector::{MeshBuffer, MeshCollector};
pub use crate::config::{LeavesStyle, LodConfig, BS};
pub use crate::error::LodError;
pub use crate::generator::{LodMeshGenerator, LodStats, MeshMakeData, MAX_LOD};
pub use crate::light::{encode_light, ParamLighting};
pub use crate::world::{ContentFeatures, ContentRegistry, VoxelGrid};
