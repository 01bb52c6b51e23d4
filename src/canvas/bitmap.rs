//! One-bit bitmaps and the sibling-control lookup used for unclipped blits.

use super::Drawable;

/// A 1-bpp bitmap with a hotspot, packed LSB-first in 8-pixel row groups.
///
/// Row stride is `(width + 7) / 8` bytes. The hotspot is the pixel that lands
/// on the draw position, so a crosshair bitmap centers itself on the pointer.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: i32,
    height: i32,
    hot_x: i32,
    hot_y: i32,
    bits: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from packed row data. Returns `None` when the
    /// dimensions are not positive or `bits` is shorter than
    /// `stride * height`.
    pub fn new(width: i32, height: i32, hot_x: i32, hot_y: i32, bits: Vec<u8>) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let stride = ((width + 7) / 8) as usize;
        if bits.len() < stride * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            hot_x,
            hot_y,
            bits,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The hotspot offset, subtracted from the draw position.
    pub fn hotspot(&self) -> (i32, i32) {
        (self.hot_x, self.hot_y)
    }

    /// Returns true when the pixel at `(x, y)` is set. Out-of-range
    /// coordinates are unset.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        let stride = ((self.width + 7) / 8) as usize;
        let byte = self.bits[y as usize * stride + (x >> 3) as usize];
        byte & (1 << (x & 7)) != 0
    }
}

/// Resolves a parent-window position to the control occupying it.
///
/// Bitmap pixels that fall outside their own drawable are, when the call
/// allows bleed, painted onto whichever sibling control sits at that spot.
/// The windowing layer implements this lookup; the renderer never walks a
/// widget tree itself. Coordinates are parent-window device pixels.
pub trait ControlLookup {
    fn control_at(&mut self, x: i32, y: i32) -> Option<&mut Drawable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_addressing_is_lsb_first() {
        // 10 pixels wide: stride 2. Row 0 sets pixels 0 and 9.
        let bits = vec![0b0000_0001, 0b0000_0010, 0, 0];
        let bm = Bitmap::new(10, 2, 0, 0, bits).unwrap();
        assert!(bm.is_set(0, 0));
        assert!(bm.is_set(9, 0));
        assert!(!bm.is_set(1, 0));
        assert!(!bm.is_set(0, 1));
    }

    #[test]
    fn out_of_range_pixels_are_unset() {
        let bm = Bitmap::new(8, 1, 0, 0, vec![0xFF]).unwrap();
        assert!(!bm.is_set(-1, 0));
        assert!(!bm.is_set(8, 0));
        assert!(!bm.is_set(0, 1));
    }

    #[test]
    fn short_data_is_rejected() {
        assert!(Bitmap::new(16, 2, 0, 0, vec![0; 3]).is_none());
        assert!(Bitmap::new(0, 2, 0, 0, vec![0; 4]).is_none());
    }
}
