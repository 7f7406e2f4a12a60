//! Bilinear resampling between pyramid levels.
//!
//! Pixel centres are aligned (`src = (dst + 0.5) * scale - 0.5`) and samples
//! outside the source clamp to the border, so a linear ramp survives a
//! downsample/upsample round trip except within half a pixel of the border.
//! The same routine is used for every image of a level so they stay
//! comparable pixel by pixel.
use crate::image::{ImageView, ImageViewMut, Rgb, RgbImageF32};

/// Two source indices and the weight of the second one.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Tap {
    i0: usize,
    i1: usize,
    t: f32,
}

fn taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f32 / dst_len as f32;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f32 + 0.5) * scale - 0.5).max(0.0);
            let i0 = (s.floor() as usize).min(last);
            let i1 = (i0 + 1).min(last);
            let t = if i0 == last { 0.0 } else { s - i0 as f32 };
            Tap { i0, i1, t }
        })
        .collect()
}

#[inline]
fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Resize `src` to `w × h`. Returns a copy when the size is unchanged and an
/// empty image when either side of the source or target is zero.
pub fn resize_bilinear(src: &RgbImageF32, w: usize, h: usize) -> RgbImageF32 {
    if src.dims() == (w, h) {
        return src.clone();
    }
    let mut out = RgbImageF32::new(w, h);
    if src.is_empty() || out.is_empty() {
        return out;
    }

    let xs = taps(src.w, w);
    let ys = taps(src.h, h);
    for (y, ty) in ys.iter().enumerate() {
        let r0 = src.row(ty.i0);
        let r1 = src.row(ty.i1);
        let dst = out.row_mut(y);
        for (px, tx) in dst.iter_mut().zip(&xs) {
            let top = lerp(r0[tx.i0], r0[tx.i1], tx.t);
            let bottom = lerp(r1[tx.i0], r1[tx.i1], tx.t);
            *px = lerp(top, bottom, ty.t);
        }
    }
    out
}

/// Size of the next coarser level: both sides halved, rounding up.
#[inline]
pub fn half_size(w: usize, h: usize) -> (usize, usize) {
    (w.div_ceil(2), h.div_ceil(2))
}
