// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image dimensional flipper
//!
//! A proxy for the image crate's `GenericImageView` that maps the
//! width to the original height, and vice versa, as well as every x
//! to y and vice versa.
//!
//! Every seam operator in this crate works on vertical seams.  A
//! horizontal seam of an image is a vertical seam of its transpose,
//! so horizontal carving is "flip, carve, flip back", and since the
//! transpose is its own inverse the same flipper does both halves.

use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

/// The transpose of an image, as a read-only view.
pub struct Flipper<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    pub image: &'a I,
}

impl<'a, I, P, S> Flipper<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    pub fn new(image: &'a I) -> Self {
        Flipper { image }
    }
}

impl<'a, I, P, S> GenericImageView for Flipper<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    type Pixel = P;
    type InnerImageView = I;

    fn dimensions(&self) -> (u32, u32) {
        let (x, y) = self.image.dimensions();
        (y, x)
    }

    fn width(&self) -> u32 {
        self.image.height()
    }

    fn height(&self) -> u32 {
        self.image.width()
    }

    fn get_pixel(&self, x: u32, y: u32) -> P {
        self.image.get_pixel(y, x)
    }

    fn inner(&self) -> &Self::InnerImageView {
        self.image
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        let (x, y, w, h) = self.image.bounds();
        (y, x, h, w)
    }
}

/// Materialize the transpose of an image into its own buffer.
pub fn transpose<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let flipped = Flipper::new(image);
    let (width, height) = flipped.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| flipped.get_pixel(x, y))
}
