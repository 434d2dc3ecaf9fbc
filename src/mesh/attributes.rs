//! Per-vertex color storage and color-space casting.
//!
//! A half-edge mesh keeps its vertex colors in whatever representation they
//! were supplied in. Flat render buffers always want 8-bit RGBA, so every
//! supported representation implements [`ColorCast`].

/// Conversion of a color value to 8-bit RGBA.
///
/// Representations without an alpha channel become fully opaque. Float
/// channels are scaled by 255 and saturate to `0..=255`.
pub trait ColorCast: Copy {
    /// Cast to `[r, g, b, a]` with 8 bits per channel.
    fn to_rgba8(self) -> [u8; 4];
}

impl ColorCast for [u8; 3] {
    #[inline]
    fn to_rgba8(self) -> [u8; 4] {
        [self[0], self[1], self[2], u8::MAX]
    }
}

impl ColorCast for [u8; 4] {
    #[inline]
    fn to_rgba8(self) -> [u8; 4] {
        self
    }
}

impl ColorCast for [f32; 3] {
    #[inline]
    fn to_rgba8(self) -> [u8; 4] {
        [unit_to_u8(self[0]), unit_to_u8(self[1]), unit_to_u8(self[2]), u8::MAX]
    }
}

impl ColorCast for [f32; 4] {
    #[inline]
    fn to_rgba8(self) -> [u8; 4] {
        [
            unit_to_u8(self[0]),
            unit_to_u8(self[1]),
            unit_to_u8(self[2]),
            unit_to_u8(self[3]),
        ]
    }
}

// `as` saturates and maps NaN to 0.
#[inline]
fn unit_to_u8(c: f32) -> u8 {
    (c * 255.0) as u8
}

/// Vertex colors in their native representation, one entry per vertex.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexColors {
    /// 8-bit RGB.
    Rgb8(Vec<[u8; 3]>),
    /// 8-bit RGBA.
    Rgba8(Vec<[u8; 4]>),
    /// Floating point RGB in `[0, 1]`.
    Rgb(Vec<[f32; 3]>),
    /// Floating point RGBA in `[0, 1]`.
    Rgba(Vec<[f32; 4]>),
}

impl VertexColors {
    /// Number of stored colors.
    pub fn len(&self) -> usize {
        match self {
            VertexColors::Rgb8(c) => c.len(),
            VertexColors::Rgba8(c) => c.len(),
            VertexColors::Rgb(c) => c.len(),
            VertexColors::Rgba(c) => c.len(),
        }
    }

    /// Whether no colors are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color at `index`, cast to 8-bit RGBA.
    #[inline]
    pub fn rgba8(&self, index: usize) -> [u8; 4] {
        match self {
            VertexColors::Rgb8(c) => c[index].to_rgba8(),
            VertexColors::Rgba8(c) => c[index].to_rgba8(),
            VertexColors::Rgb(c) => c[index].to_rgba8(),
            VertexColors::Rgba(c) => c[index].to_rgba8(),
        }
    }

    /// Append an opaque white entry, keeping the array aligned with a newly
    /// added vertex.
    pub(crate) fn push_default(&mut self) {
        match self {
            VertexColors::Rgb8(c) => c.push([u8::MAX; 3]),
            VertexColors::Rgba8(c) => c.push([u8::MAX; 4]),
            VertexColors::Rgb(c) => c.push([1.0; 3]),
            VertexColors::Rgba(c) => c.push([1.0; 4]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8_gets_opaque_alpha() {
        assert_eq!([10u8, 20, 30].to_rgba8(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_float_cast_scales_and_saturates() {
        assert_eq!([0.0f32, 1.0, 0.5].to_rgba8(), [0, 255, 127, 255]);
        assert_eq!([-1.0f32, 2.0, f32::NAN, 0.0].to_rgba8(), [0, 255, 0, 0]);
    }

    #[test]
    fn test_vertex_colors_lookup() {
        let mut colors = VertexColors::Rgb(vec![[1.0, 0.0, 0.0]]);
        colors.push_default();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.rgba8(0), [255, 0, 0, 255]);
        assert_eq!(colors.rgba8(1), [255, 255, 255, 255]);
    }
}
