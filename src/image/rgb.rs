//! Owned 3-channel f32 image, the working representation of the solver.
//!
//! Pixels are stored as `[f32; 3]` in row-major order with no padding, so a
//! row is a plain slice and the whole image is one contiguous slice. Values
//! are nominally in `[0, 1]`; nothing here clamps them.
use super::u8::RgbImageU8;
use super::ImageView;

pub type Rgb = [f32; 3];

#[derive(Clone, Debug, PartialEq)]
pub struct RgbImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order, `w * h` pixels
    pub data: Vec<Rgb>,
}

impl RgbImageF32 {
    /// Construct a black image of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![[0.0; 3]; w * h],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Normalize an 8-bit view into `[0, 1]` by dividing every channel by 255.
    pub fn from_u8(src: RgbImageU8<'_>) -> Self {
        let mut out = Self::new(src.w, src.h);
        for y in 0..src.h {
            let bytes = src.row(y);
            let start = y * src.w;
            for (dst, px) in out.data[start..start + src.w]
                .iter_mut()
                .zip(bytes.chunks_exact(3))
            {
                *dst = [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                ];
            }
        }
        out
    }

    /// Convert back to tightly packed 8-bit RGB, rounding `v * 255` and
    /// clamping to `[0, 255]`.
    pub fn to_u8_clamped(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for px in &self.data {
            for &c in px {
                out.push((c * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: Rgb) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Smallest and largest channel value over the whole image.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut values = self.data.iter().flat_map(|p| p.iter().copied());
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Mean over all pixels and channels of each row, top to bottom.
    pub fn row_means(&self) -> Vec<f32> {
        let n = (3 * self.w).max(1) as f32;
        self.rows()
            .map(|row| row.iter().map(|p| p[0] + p[1] + p[2]).sum::<f32>() / n)
            .collect()
    }
}

impl crate::image::traits::ImageView for RgbImageF32 {
    type Pixel = Rgb;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl crate::image::traits::ImageViewMut for RgbImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.w;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
