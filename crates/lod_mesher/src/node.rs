//! Voxel samples and their drawtype classification.

/// Content type identifier.
pub type ContentId = u16;

/// Reserved content for nodes whose definition is unknown.
pub const CONTENT_UNKNOWN: ContentId = 125;
/// Reserved content for empty space.
pub const CONTENT_AIR: ContentId = 126;
/// Reserved content for positions outside the loaded area. Never meshed.
pub const CONTENT_IGNORE: ContentId = 127;

/// A single voxel: content type plus two parameter bytes.
///
/// `param1` conventionally stores light, `param2` orientation or level data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    pub content: ContentId,
    pub param1: u8,
    pub param2: u8,
}

impl Node {
    pub const AIR: Node = Node::new(CONTENT_AIR);
    pub const IGNORE: Node = Node::new(CONTENT_IGNORE);

    pub const fn new(content: ContentId) -> Self {
        Self { content, param1: 0, param2: 0 }
    }

    pub const fn with_param1(content: ContentId, param1: u8) -> Self {
        Self { content, param1, param2: 0 }
    }

    #[inline]
    pub const fn is_ignore(&self) -> bool {
        self.content == CONTENT_IGNORE
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::AIR
    }
}

/// How a content type is drawn. Determines which pass, if any, meshes it.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawType {
    /// Solid cube; lit per face.
    Normal = 0,
    Airlike,
    Liquid,
    FlowingLiquid,
    Glasslike,
    GlasslikeFramed,
    Allfaces,
    AllfacesOptional,
    Torchlike,
    Signlike,
    Plantlike,
    Firelike,
    Fencelike,
    Raillike,
    Nodebox,
    Mesh,
    PlantlikeRooted,
}

impl DrawType {
    #[inline]
    const fn bit(self) -> u32 {
        1 << self as u8
    }
}

/// A set of drawtypes selected for one meshing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawTypeSet(u32);

impl DrawTypeSet {
    pub const EMPTY: DrawTypeSet = DrawTypeSet(0);

    /// Returns a copy of the set with `drawtype` added.
    pub const fn with(self, drawtype: DrawType) -> Self {
        Self(self.0 | drawtype.bit())
    }

    pub fn insert(&mut self, drawtype: DrawType) {
        self.0 |= drawtype.bit();
    }

    #[inline]
    pub const fn contains(self, drawtype: DrawType) -> bool {
        self.0 & drawtype.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<DrawType> for DrawTypeSet {
    fn from_iter<I: IntoIterator<Item = DrawType>>(iter: I) -> Self {
        let mut set = DrawTypeSet::EMPTY;
        for drawtype in iter {
            set.insert(drawtype);
        }
        set
    }
}
