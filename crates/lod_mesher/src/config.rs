//! Mesher configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::LodError;
use crate::node::{DrawType, DrawTypeSet};

/// Node size in world units (one node spans `BS`).
pub const BS: f32 = 10.0;

/// How leaves are drawn, mirroring the `leaves_style` client setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LeavesStyle {
    #[default]
    Fancy,
    /// Leaves use glasslike drawing and join the transparent pass.
    Simple,
    Opaque,
}

impl FromStr for LeavesStyle {
    type Err = LodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fancy" => Ok(LeavesStyle::Fancy),
            "simple" => Ok(LeavesStyle::Simple),
            "opaque" => Ok(LeavesStyle::Opaque),
            other => Err(LodError::UnknownLeavesStyle(other.to_string())),
        }
    }
}

impl fmt::Display for LeavesStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeavesStyle::Fancy => "fancy",
            LeavesStyle::Simple => "simple",
            LeavesStyle::Opaque => "opaque",
        })
    }
}

/// Configuration for LOD mesh generation.
#[derive(Clone, Debug)]
pub struct LodConfig {
    pub leaves_style: LeavesStyle,
    /// Emit flat vertex-colored quads instead of resolving texture tiles.
    pub textureless: bool,
    /// Size of one node in world units.
    pub node_size: f32,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            leaves_style: LeavesStyle::default(),
            textureless: false,
            node_size: BS,
        }
    }
}

impl LodConfig {
    pub fn validate(&self) -> Result<(), LodError> {
        if !self.node_size.is_finite() || self.node_size <= 0.0 {
            return Err(LodError::InvalidNodeSize(self.node_size));
        }
        Ok(())
    }

    /// Drawtypes meshed in the transparent pass. Liquids always render separately.
    pub fn transparent_types(&self) -> DrawTypeSet {
        let set = DrawTypeSet::EMPTY.with(DrawType::Liquid);
        if self.leaves_style == LeavesStyle::Simple {
            set.with(DrawType::Glasslike)
        } else {
            set
        }
    }

    /// Drawtypes meshed in the solid pass.
    pub fn solid_types(&self) -> DrawTypeSet {
        DrawTypeSet::EMPTY
            .with(DrawType::Normal)
            .with(DrawType::Nodebox)
            .with(DrawType::Allfaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leaves_style() {
        assert_eq!("simple".parse::<LeavesStyle>(), Ok(LeavesStyle::Simple));
        assert_eq!(" fancy ".parse::<LeavesStyle>(), Ok(LeavesStyle::Fancy));
        assert_eq!(
            "shiny".parse::<LeavesStyle>(),
            Err(LodError::UnknownLeavesStyle("shiny".into()))
        );
        assert_eq!(LeavesStyle::Opaque.to_string(), "opaque");
    }

    #[test]
    fn validate_node_size() {
        assert!(LodConfig::default().validate().is_ok());

        let config = LodConfig { node_size: 0.0, ..Default::default() };
        assert_eq!(config.validate(), Err(LodError::InvalidNodeSize(0.0)));

        let config = LodConfig { node_size: f32::INFINITY, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn simple_leaves_join_transparent_pass() {
        let fancy = LodConfig::default();
        assert!(fancy.transparent_types().contains(DrawType::Liquid));
        assert!(!fancy.transparent_types().contains(DrawType::Glasslike));

        let simple = LodConfig { leaves_style: LeavesStyle::Simple, ..Default::default() };
        assert!(simple.transparent_types().contains(DrawType::Glasslike));
    }

    #[test]
    fn solid_pass_types() {
        let solid = LodConfig::default().solid_types();
        assert!(solid.contains(DrawType::Normal));
        assert!(solid.contains(DrawType::Nodebox));
        assert!(solid.contains(DrawType::Allfaces));
        assert!(!solid.contains(DrawType::Liquid));
        assert!(!solid.contains(DrawType::Airlike));
    }
}
