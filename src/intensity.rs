// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Intensity of an image
//!
//! The forward energy costs are computed over a single luminance
//! channel.  The field produced here is padded by one pixel on every
//! side, each padding pixel a copy of its nearest edge pixel, so the
//! cost calculation can look left, right and up from any pixel
//! without a special case at the border.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

/// A luminance field, one pixel larger than its image on every side.
pub type IntensityField = TwoDimensionalMap<i32>;

// Rec.601 weights in 14-bit fixed point, with a half for rounding.
const RED_WEIGHT: i32 = 4899;
const GREEN_WEIGHT: i32 = 9617;
const BLUE_WEIGHT: i32 = 1868;
const HALF: i32 = 1 << 13;
const SHIFT: i32 = 14;

/// Pixel -> Luminance
///
/// Every pixel is first brought to RGB, so greyscale images pass
/// through unchanged: equal weights summing to 1 << 14 give back the
/// grey level.
#[inline]
pub fn luminance<P, S>(p: &P) -> i32
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    #[inline]
    fn channel<S: Primitive>(c: S) -> i32 {
        NumCast::from(c).unwrap_or(0)
    }

    let rgb = p.to_rgb();
    let [r, g, b] = rgb.0;
    (RED_WEIGHT * channel(r) + GREEN_WEIGHT * channel(g) + BLUE_WEIGHT * channel(b) + HALF)
        >> SHIFT
}

/// Image -> padded IntensityField
///
/// Field coordinate `(x + 1, y + 1)` holds the luminance of image
/// pixel `(x, y)`.  The outer ring repeats the nearest edge.  An
/// empty image has nothing to repeat and gives an empty field.
pub fn intensity_field<I, P, S>(image: &I) -> IntensityField
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return IntensityField::new(0, 0);
    }
    let (mw, mh) = (width - 1, height - 1);

    let mut field = IntensityField::new(width + 2, height + 2);
    for (fy, fx) in iproduct!(0..height + 2, 0..width + 2) {
        let x = cq!(fx == 0, 0, cq!(fx > width, mw, fx - 1));
        let y = cq!(fy == 0, 0, cq!(fy > height, mh, fy - 1));
        field[(fx, fy)] = luminance(&image.get_pixel(x, y));
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn luminance_matches_fixed_point_weights() {
        assert_eq!(luminance(&Rgb([255u8, 0, 0])), 76);
        assert_eq!(luminance(&Rgb([0u8, 255, 0])), 150);
        assert_eq!(luminance(&Rgb([0u8, 0, 255])), 29);
        assert_eq!(luminance(&Rgb([255u8, 255, 255])), 255);
    }

    #[test]
    fn grey_levels_pass_through() {
        for v in &[0u8, 1, 127, 128, 200, 255] {
            assert_eq!(luminance(&Rgb([*v, *v, *v])), *v as i32);
            assert_eq!(luminance(&Luma([*v])), *v as i32);
        }
    }

    const IMAGE_DATA: [u8; 6] = [1, 2, 3, 4, 5, 6];
    const PADDED: [i32; 20] = [
        1, 1, 2, 3, 3, //
        1, 1, 2, 3, 3, //
        4, 4, 5, 6, 6, //
        4, 4, 5, 6, 6,
    ];

    #[test]
    fn field_replicates_the_border() {
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(3, 2, &IMAGE_DATA[..]).unwrap();
        let field = intensity_field(&buf);
        assert_eq!(field.dimensions(), (5, 4));
        assert_eq!(field.values(), &PADDED[..]);
    }

    #[test]
    fn single_pixel_pads_to_three_by_three() {
        let buf: RgbImage = ImageBuffer::from_pixel(1, 1, Rgb([9, 9, 9]));
        let field = intensity_field(&buf);
        assert_eq!(field.values(), &[9; 9][..]);
    }

    #[test]
    fn empty_image_gives_an_empty_field() {
        let buf: RgbImage = ImageBuffer::new(0, 4);
        let field = intensity_field(&buf);
        assert!(field.is_empty());
        assert_eq!(field.dimensions(), (0, 0));
    }
}
