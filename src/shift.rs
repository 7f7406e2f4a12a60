//! One-pixel neighbour translations with edge replication.
//!
//! `shift_image` returns, for every pixel, the value of its left, right,
//! upper and lower neighbour. Samples that would fall outside the image are
//! replaced by the nearest border pixel, so the difference between a border
//! pixel and its missing neighbour is zero (Neumann boundary).
use crate::image::{ImageView, ImageViewMut, RgbImageF32};

/// The four axis-aligned neighbour images of a source image.
///
/// `right[x, y] = src[min(x + 1, w - 1), y]`, `left[x, y] = src[max(x, 1) - 1, y]`,
/// and likewise `down`/`up` along rows.
#[derive(Clone, Debug)]
pub struct Shifts {
    pub left: RgbImageF32,
    pub right: RgbImageF32,
    pub up: RgbImageF32,
    pub down: RgbImageF32,
}

impl Shifts {
    /// Neighbour images in the order left, right, up, down.
    pub fn directions(&self) -> [&RgbImageF32; 4] {
        [&self.left, &self.right, &self.up, &self.down]
    }
}

pub fn shift_image(src: &RgbImageF32) -> Shifts {
    let (w, h) = src.dims();
    let mut left = RgbImageF32::new(w, h);
    let mut right = RgbImageF32::new(w, h);
    let mut up = RgbImageF32::new(w, h);
    let mut down = RgbImageF32::new(w, h);

    if src.is_empty() {
        return Shifts {
            left,
            right,
            up,
            down,
        };
    }

    for y in 0..h {
        let row = src.row(y);

        let dst = left.row_mut(y);
        dst[0] = row[0];
        dst[1..].copy_from_slice(&row[..w - 1]);

        let dst = right.row_mut(y);
        dst[..w - 1].copy_from_slice(&row[1..]);
        dst[w - 1] = row[w - 1];

        up.row_mut(y).copy_from_slice(src.row(y.saturating_sub(1)));
        down.row_mut(y).copy_from_slice(src.row((y + 1).min(h - 1)));
    }

    Shifts {
        left,
        right,
        up,
        down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> RgbImageF32 {
        RgbImageF32::from_fn(w, h, |x, y| {
            let v = (y * w + x) as f32;
            [v, v + 0.25, v + 0.5]
        })
    }

    #[test]
    fn shifts_keep_input_dimensions() {
        for (w, h) in [(1, 1), (1, 5), (7, 1), (4, 3)] {
            let img = ramp(w, h);
            let shifts = shift_image(&img);
            for dir in shifts.directions() {
                assert_eq!((dir.w, dir.h), (w, h));
            }
        }
    }

    #[test]
    fn interior_and_border_samples() {
        let img = ramp(4, 3);
        let s = shift_image(&img);

        assert_eq!(s.right.get(1, 1), img.get(2, 1));
        assert_eq!(s.right.get(3, 1), img.get(3, 1));
        assert_eq!(s.left.get(2, 2), img.get(1, 2));
        assert_eq!(s.left.get(0, 2), img.get(0, 2));
        assert_eq!(s.up.get(3, 2), img.get(3, 1));
        assert_eq!(s.up.get(3, 0), img.get(3, 0));
        assert_eq!(s.down.get(0, 1), img.get(0, 2));
        assert_eq!(s.down.get(0, 2), img.get(0, 2));
    }

    #[test]
    fn single_row_has_identity_vertical_shifts() {
        let img = ramp(6, 1);
        let s = shift_image(&img);
        assert_eq!(s.up, img);
        assert_eq!(s.down, img);
        assert_ne!(s.left, img);
    }

    #[test]
    fn single_column_has_identity_horizontal_shifts() {
        let img = ramp(1, 6);
        let s = shift_image(&img);
        assert_eq!(s.left, img);
        assert_eq!(s.right, img);
        assert_ne!(s.up, img);
    }

    #[test]
    fn empty_image_yields_empty_shifts() {
        let s = shift_image(&RgbImageF32::new(0, 3));
        assert!(s.left.data.is_empty());
        assert_eq!((s.down.w, s.down.h), (0, 3));
    }
}
