use crate::error::{RegrainError, Result};

/// Borrowed interleaved 8-bit RGB image.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows, at least 3 * w
    pub data: &'a [u8],
}

impl<'a> RgbImageU8<'a> {
    /// Wrap a tightly packed `w * h * 3` byte buffer.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Result<Self> {
        Self::with_stride(w, h, w * 3, data)
    }

    /// Wrap a padded buffer whose rows start every `stride` bytes.
    pub fn with_stride(w: usize, h: usize, stride: usize, data: &'a [u8]) -> Result<Self> {
        if stride < w * 3 {
            return Err(RegrainError::BufferSize {
                expected: w * 3,
                actual: stride,
            });
        }
        let expected = if h == 0 { 0 } else { stride * (h - 1) + w * 3 };
        if data.len() < expected {
            return Err(RegrainError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, stride, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + x * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Interleaved bytes of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 3]
    }
}
