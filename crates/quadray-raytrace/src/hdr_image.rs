//! Floating-point pixel buffer.

use quadray_math::Color;

/// A `width x height` grid of HDR colors, row-major, row 0 at the top.
///
/// Only pixel access lives here; encoding to PFM or LDR formats and tone
/// mapping happen outside the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct HdrImage {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl HdrImage {
    /// Allocate a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(col, row)` lies inside the image.
    pub fn valid_coordinates(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    #[inline]
    fn pixel_offset(&self, col: usize, row: usize) -> usize {
        debug_assert!(
            self.valid_coordinates(col, row),
            "pixel ({col}, {row}) outside {}x{} image",
            self.width,
            self.height
        );
        row * self.width + col
    }

    /// Color of pixel `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn get_pixel(&self, col: usize, row: usize) -> Color {
        self.pixels[self.pixel_offset(col, row)]
    }

    /// Overwrite pixel `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn set_pixel(&mut self, col: usize, row: usize, color: Color) {
        let offset = self.pixel_offset(col, row);
        self.pixels[offset] = color;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// All pixels, row-major, for bulk writers such as parallel tracers.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img = HdrImage::new(7, 4);
        assert_eq!(img.width(), 7);
        assert_eq!(img.height(), 4);
        assert_eq!(img.pixels().len(), 28);
        assert!(img.pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_coordinates() {
        let img = HdrImage::new(7, 4);
        assert!(img.valid_coordinates(0, 0));
        assert!(img.valid_coordinates(6, 3));
        assert!(!img.valid_coordinates(7, 0));
        assert!(!img.valid_coordinates(0, 4));
    }

    #[test]
    fn test_pixel_offset() {
        let img = HdrImage::new(7, 4);
        assert_eq!(img.pixel_offset(0, 0), 0);
        assert_eq!(img.pixel_offset(3, 2), 17);
        assert_eq!(img.pixel_offset(6, 3), 7 * 4 - 1);
    }

    #[test]
    fn test_get_set_pixel() {
        let mut img = HdrImage::new(7, 4);
        let c = Color::new(1.0, 2.0, 3.0);
        img.set_pixel(3, 2, c);
        assert_eq!(img.get_pixel(3, 2), c);
        assert_eq!(img.get_pixel(2, 3), Color::BLACK);
        assert_eq!(img.pixels()[17], c);
    }
}
