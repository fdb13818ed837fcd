//! Light encoding and a param1-based lighting model.

use crate::core::{Color, LightPair};
use crate::node::Node;
use crate::source::Lighting;

/// Highest light level a nibble can store.
pub const LIGHT_MAX: u8 = 15;

/// Encode a day/night light pair into a vertex color.
///
/// Alpha carries the share of sunlight, RGB the average brightness. Light
/// sources boost the night bank. Day light that does not exceed the night bank
/// is assumed to be artificial.
pub fn encode_light(light: LightPair, light_source: u8) -> Color {
    let mut day = u32::from(light.day());
    let mut night = u32::from(light.night());

    night += (f32::from(light_source) * 2.5) as u32;
    night = night.min(255);

    day = day.saturating_sub(night);

    let sum = day + night;
    let sunlight = if sum > 0 { day * 255 / sum } else { 0 };
    let brightness = (sum / 2) as u8;

    Color::new(sunlight as u8, brightness, brightness, brightness)
}

/// Scale a 0..=15 nibble level to 0..=255.
#[inline]
pub const fn decode_level(level: u8) -> u8 {
    let level = if level > LIGHT_MAX { LIGHT_MAX } else { level };
    level * 17
}

/// Reads light from `param1`: day bank in the low nibble, night in the high nibble.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParamLighting;

impl ParamLighting {
    #[inline]
    fn banks(node: Node) -> (u8, u8) {
        (node.param1 & 0x0F, node.param1 >> 4)
    }
}

impl Lighting for ParamLighting {
    fn face_light(&self, node: Node, neighbor: Node) -> LightPair {
        let (day_a, night_a) = Self::banks(node);
        let (day_b, night_b) = Self::banks(neighbor);
        LightPair::new(
            decode_level(day_a.max(day_b)),
            decode_level(night_a.max(night_b)),
        )
    }

    fn interior_light(&self, node: Node) -> LightPair {
        let (day, night) = Self::banks(node);
        LightPair::new(decode_level(day), decode_level(night))
    }
}
