//! In-memory voxel snapshot and node definitions.
//!
//! These are the reference collaborators used by the tests and benchmarks, and
//! by callers that do not bring their own map storage.

use glam::IVec3;

use crate::core::Color;
use crate::error::LodError;
use crate::node::{ContentId, DrawType, Node, CONTENT_AIR, CONTENT_IGNORE, CONTENT_UNKNOWN};
use crate::source::{NodeDefs, VoxelSource};

/// Dense box of nodes.
///
/// Memory layout: `nodes[(z * size.y + y) * size.x + x]` relative to `min`.
/// Reads outside the box return [`Node::IGNORE`].
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    min: IVec3,
    size: IVec3,
    nodes: Vec<Node>,
}

impl VoxelGrid {
    /// Create a grid covering `min .. min + size`, filled with air.
    pub fn new(min: IVec3, size: IVec3) -> Result<Self, LodError> {
        if size.cmple(IVec3::ZERO).any() {
            return Err(LodError::InvalidGridSize(size.to_array()));
        }
        let len = size.x as usize * size.y as usize * size.z as usize;
        Ok(Self { min, size, nodes: vec![Node::AIR; len] })
    }

    /// Grid of `side³` nodes plus a one-node margin on every side, so a mesh
    /// block at the origin can be sampled together with its padding.
    pub fn with_margin(side: i32) -> Result<Self, LodError> {
        Self::new(IVec3::splat(-1), IVec3::splat(side + 2))
    }

    pub fn min(&self) -> IVec3 {
        self.min
    }

    pub fn size(&self) -> IVec3 {
        self.size
    }

    #[inline]
    fn index(&self, p: IVec3) -> Option<usize> {
        let rel = p - self.min;
        if rel.cmplt(IVec3::ZERO).any() || rel.cmpge(self.size).any() {
            return None;
        }
        Some(((rel.z * self.size.y + rel.y) * self.size.x + rel.x) as usize)
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: IVec3) -> bool {
        self.index(p).is_some()
    }

    /// Set a node. Writes outside the grid are dropped.
    #[inline]
    pub fn set(&mut self, p: IVec3, node: Node) {
        if let Some(i) = self.index(p) {
            self.nodes[i] = node;
        }
    }

    /// Fill the box `from ..= to` (clipped to the grid).
    pub fn fill(&mut self, from: IVec3, to: IVec3, node: Node) {
        self.fill_with(from, to, |_| Some(node));
    }

    /// Set every node in `from ..= to` for which `f` returns a node.
    pub fn fill_with(&mut self, from: IVec3, to: IVec3, mut f: impl FnMut(IVec3) -> Option<Node>) {
        let lo = from.max(self.min);
        let hi = to.min(self.min + self.size - IVec3::ONE);
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                for x in lo.x..=hi.x {
                    let p = IVec3::new(x, y, z);
                    if let Some(node) = f(p) {
                        self.set(p, node);
                    }
                }
            }
        }
    }

    /// Count nodes matching a content type.
    pub fn count(&self, content: ContentId) -> usize {
        self.nodes.iter().filter(|n| n.content == content).count()
    }
}

impl VoxelSource for VoxelGrid {
    #[inline]
    fn get_node(&self, p: IVec3) -> Node {
        match self.index(p) {
            Some(i) => self.nodes[i],
            None => Node::IGNORE,
        }
    }
}

/// Definition of one content type.
#[derive(Clone, Debug)]
pub struct ContentFeatures {
    pub name: String,
    pub drawtype: DrawType,
    /// Average texture color per face direction.
    pub average_color: [Color; 6],
    pub light_source: u8,
}

impl ContentFeatures {
    pub fn new(name: impl Into<String>, drawtype: DrawType) -> Self {
        Self {
            name: name.into(),
            drawtype,
            average_color: [Color::WHITE; 6],
            light_source: 0,
        }
    }

    /// Use the same average color on all faces.
    pub fn with_color(mut self, color: Color) -> Self {
        self.average_color = [color; 6];
        self
    }

    pub fn with_light_source(mut self, light_source: u8) -> Self {
        self.light_source = light_source;
        self
    }
}

/// Node definitions indexed by content id.
///
/// Unregistered ids resolve to the "unknown" definition, drawn as a solid cube.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    features: Vec<ContentFeatures>,
    registered: Vec<bool>,
    unknown: ContentFeatures,
}

impl ContentRegistry {
    /// Registry holding only the reserved air and ignore definitions.
    pub fn new() -> Self {
        let mut registry = Self {
            features: Vec::new(),
            registered: Vec::new(),
            unknown: ContentFeatures::new("unknown", DrawType::Normal),
        };
        registry.set(CONTENT_UNKNOWN, ContentFeatures::new("unknown", DrawType::Normal));
        registry.set(CONTENT_AIR, ContentFeatures::new("air", DrawType::Airlike));
        registry.set(CONTENT_IGNORE, ContentFeatures::new("ignore", DrawType::Airlike));
        registry
    }

    /// Define content `id`, replacing any previous definition.
    pub fn set(&mut self, id: ContentId, features: ContentFeatures) {
        let i = usize::from(id);
        if i >= self.features.len() {
            self.features.resize(i + 1, self.unknown.clone());
            self.registered.resize(i + 1, false);
        }
        self.features[i] = features;
        self.registered[i] = true;
    }

    /// Define a new content type under the lowest free id.
    pub fn register(&mut self, features: ContentFeatures) -> Result<ContentId, LodError> {
        let id = (0..=ContentId::MAX)
            .find(|&id| !self.is_registered(id))
            .ok_or(LodError::ContentIdsExhausted)?;
        self.set(id, features);
        Ok(id)
    }

    pub fn is_registered(&self, id: ContentId) -> bool {
        self.registered.get(usize::from(id)).copied().unwrap_or(false)
    }

    pub fn get(&self, id: ContentId) -> &ContentFeatures {
        self.features.get(usize::from(id)).unwrap_or(&self.unknown)
    }

    /// Find a content id by name.
    pub fn id(&self, name: &str) -> Option<ContentId> {
        self.features
            .iter()
            .zip(&self.registered)
            .position(|(f, &registered)| registered && f.name == name)
            .map(|i| i as ContentId)
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeDefs for ContentRegistry {
    #[inline]
    fn drawtype(&self, content: ContentId) -> DrawType {
        self.get(content).drawtype
    }

    fn average_face_color(&self, content: ContentId, face: usize) -> Color {
        self.get(content).average_color[face]
    }

    fn light_source(&self, content: ContentId) -> u8 {
        self.get(content).light_source
    }
}
