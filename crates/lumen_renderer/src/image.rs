//! Displayable RGBA8 output.

use lumen_math::Vec4;

/// Convert a linear color to packed RGBA8 (`R | G << 8 | B << 16 | A << 24`).
///
/// Channels are clamped to [0, 1] before quantizing.
#[inline]
pub fn color_to_rgba(color: Vec4) -> u32 {
    let color = color.clamp(Vec4::ZERO, Vec4::ONE);
    let r = (color.x * 255.0) as u8;
    let g = (color.y * 255.0) as u8;
    let b = (color.z * 255.0) as u8;
    let a = (color.w * 255.0) as u8;

    u32::from(r) | u32::from(g) << 8 | u32::from(b) << 16 | u32::from(a) << 24
}

/// Image buffer the presentation layer reads after each render.
#[derive(Debug, Clone)]
pub struct FinalImage {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u32>,
}

impl FinalImage {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Get the packed pixel at (x, y), if it is inside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Packed pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw RGBA bytes, ready for upload to a texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_packing() {
        assert_eq!(color_to_rgba(Vec4::new(1.0, 0.0, 0.0, 1.0)), 0xFF0000FF);
        assert_eq!(color_to_rgba(Vec4::new(0.0, 1.0, 0.0, 1.0)), 0xFF00FF00);
        assert_eq!(color_to_rgba(Vec4::new(0.0, 0.0, 1.0, 0.0)), 0x00FF0000);
        assert_eq!(color_to_rgba(Vec4::new(0.5, 0.5, 0.5, 1.0)), 0xFF7F7F7F);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Vec4::new(4.0, -1.0, 2.0, 1.0)), 0xFFFF00FF);
        assert_eq!(color_to_rgba(Vec4::splat(-3.0)), 0);
    }

    #[test]
    fn test_final_image_get() {
        let mut image = FinalImage::new(3, 2);
        image.pixels_mut()[3 + 1] = 0xDEADBEEF;

        assert_eq!(image.pixel_count(), 6);
        assert_eq!(image.get(1, 1), Some(0xDEADBEEF));
        assert_eq!(image.get(0, 0), Some(0));
        assert_eq!(image.get(3, 0), None);
        assert_eq!(image.get(0, 2), None);
    }

    #[test]
    fn test_as_bytes_little_endian_rgba() {
        let mut image = FinalImage::new(1, 1);
        image.pixels_mut()[0] = color_to_rgba(Vec4::new(1.0, 0.0, 0.5, 1.0));

        assert_eq!(image.as_bytes().len(), 4);
        if cfg!(target_endian = "little") {
            assert_eq!(image.as_bytes(), &[255, 0, 127, 255]);
        }
    }

    #[test]
    fn test_zero_sized_image() {
        let image = FinalImage::new(0, 10);
        assert_eq!(image.pixel_count(), 0);
        assert!(image.as_bytes().is_empty());
    }
}
