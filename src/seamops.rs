// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam removal and insertion
//!
//! Both operators take an image and a vertical seam traced against
//! an image of the same height, and return a brand new buffer one
//! column narrower or one column wider.  The source is never touched.

use crate::error::{CarveError, Result};
use crate::seamfinder::Seam;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, RgbImage};
use num_traits::NumCast;

fn check_seam(seam: &Seam, (width, height): (u32, u32)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(CarveError::EmptyImage);
    }
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            expected: height,
            found: seam.len() as u32,
        });
    }
    match seam.iter().position(|column| *column >= width) {
        Some(row) => Err(CarveError::SeamOutOfBounds {
            row: row as u32,
            column: seam.columns()[row],
            width,
        }),
        None => Ok(()),
    }
}

/// Image -> Image, one column narrower
///
/// In every row the pixel under the seam is dropped and the two
/// segments on either side of it are closed up.  Either segment may be
/// empty when the seam runs along an edge.
pub fn remove_seam<I, P, S>(image: &I, seam: &Seam) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    check_seam(seam, (width, height))?;
    if width < 2 {
        return Err(CarveError::TooNarrow { width });
    }

    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for (y, &cut) in (0..height).zip(seam) {
        let kept = (0..cut).chain(cut + 1..width);
        for (nx, x) in (0..).zip(kept) {
            imgbuf.put_pixel(nx, y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

// Floor of the channel-wise mean of two pixels.
fn midpoint<P, S>(left: &P, right: &P) -> P
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    left.map2(right, |l, r| {
        let (wl, wr): (u64, u64) = (NumCast::from(l).unwrap_or(0), NumCast::from(r).unwrap_or(0));
        NumCast::from((wl + wr) / 2).unwrap_or(l)
    })
}

/// Image -> Image, one column wider
///
/// In every row a new pixel goes in immediately to the right of the
/// seam pixel.  It is the mean of the seam pixel and its right-hand
/// neighbor, or a copy of the seam pixel when the seam is on the last
/// column.
pub fn insert_seam<I, P, S>(image: &I, seam: &Seam) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    check_seam(seam, (width, height))?;

    let mut imgbuf = ImageBuffer::new(width + 1, height);
    for (y, &cut) in (0..height).zip(seam) {
        for x in 0..=cut {
            imgbuf.put_pixel(x, y, image.get_pixel(x, y));
        }
        let seam_pixel = image.get_pixel(cut, y);
        let synthesized = if cut + 1 == width {
            seam_pixel
        } else {
            midpoint(&seam_pixel, &image.get_pixel(cut + 1, y))
        };
        imgbuf.put_pixel(cut + 1, y, synthesized);
        for x in cut + 1..width {
            imgbuf.put_pixel(x + 1, y, image.get_pixel(x, y));
        }
    }
    Ok(imgbuf)
}

/// The color a seam is painted in.
pub const SEAM_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// A copy of the image with the seam painted over it.
pub fn draw_seam(image: &RgbImage, seam: &Seam) -> Result<RgbImage> {
    check_seam(seam, image.dimensions())?;
    let mut overlay = image.clone();
    for (y, &x) in (0..image.height()).zip(seam) {
        overlay.put_pixel(x, y, SEAM_COLOR);
    }
    Ok(overlay)
}
