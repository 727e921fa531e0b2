// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The carving controller
//!
//! The `Carver` owns the image being resized and replaces it wholesale
//! after every seam.  Removal needs nothing more than "compute, trace,
//! remove, repeat", since every removal changes what the next energy
//! pass sees.
//!
//! Insertion does.  Once a seam has been duplicated, the grown image
//! has two nearly identical low-cost columns where there was one, and
//! the next trace goes right back to them.  So while inserting, the
//! carver keeps a second image, the duplicate buffer, that looks like
//! the real image would if every inserted seam had been removed
//! instead.  Seams are traced on that buffer and removed from it, and
//! the same coordinates are inserted into the real image.  Each trace
//! therefore lands on the next-cheapest seam rather than the last
//! one.

use crate::energy::compute_cost;
use crate::error::{CarveError, Result};
use crate::flipper::transpose;
use crate::seamfinder::{trace_seam, Seam};
use crate::seamops::{draw_seam, insert_seam, remove_seam};
use image::{GrayImage, ImageBuffer, Pixel, Primitive, RgbImage};
use log::{debug, info, warn};

/// The direction seams run in.  Vertical seams run top to bottom and
/// change the width; horizontal seams run left to right and change
/// the height.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The other one.
    pub fn turn(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    // Bring an image into the frame where this orientation's seams are
    // vertical.
    fn enter<P, S>(self, image: &ImageBuffer<P, Vec<S>>) -> ImageBuffer<P, Vec<S>>
    where
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        match self {
            Orientation::Vertical => image.clone(),
            Orientation::Horizontal => transpose(image),
        }
    }

    // And back out again.
    fn leave<P, S>(self, image: ImageBuffer<P, Vec<S>>) -> ImageBuffer<P, Vec<S>>
    where
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        match self {
            Orientation::Vertical => image,
            Orientation::Horizontal => transpose(&image),
        }
    }
}

/// What a single carving step produced, for whoever is showing the
/// work.  The energy map and overlay are in the caller's orientation;
/// the seam is in the frame it was traced in, so for a horizontal
/// step each entry is a row index, one per column.
#[derive(Debug, Clone)]
pub struct Step {
    pub orientation: Orientation,
    pub seam: Seam,
    pub energy: GrayImage,
    pub overlay: RgbImage,
}

// The duplicate buffer of an insertion session.  It is stored in the
// session's vertical frame, so horizontal sessions transpose it only
// once.
#[derive(Debug)]
struct InsertionSession {
    orientation: Orientation,
    buffer: RgbImage,
}

/// The carving controller.  Holds the current image, and while seams
/// are being inserted, the duplicate buffer that keeps successive
/// insertions apart.
#[derive(Debug)]
pub struct Carver {
    image: RgbImage,
    session: Option<InsertionSession>,
}

impl Carver {
    /// Takes ownership of the image to be carved.
    pub fn new(image: RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(CarveError::EmptyImage);
        }
        Ok(Carver {
            image,
            session: None,
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Remove the cheapest seam.  Ends any insertion session: the next
    /// insertion starts mirroring the image as it is after this.
    pub fn remove(&mut self, orientation: Orientation) -> Result<Step> {
        let working = orientation.enter(&self.image);
        let energy = compute_cost(&working)?;
        let seam = trace_seam(&energy.cost, &energy.directions)?;
        let overlay = draw_seam(&working, &seam)?;
        let carved = remove_seam(&working, &seam)?;

        self.image = orientation.leave(carved);
        self.session = None;
        debug!(
            "removed {:?} seam, now {}x{}",
            orientation,
            self.image.width(),
            self.image.height()
        );

        Ok(Step {
            orientation,
            seam,
            energy: orientation.leave(energy.energy),
            overlay: orientation.leave(overlay),
        })
    }

    /// Insert a seam, traced on the duplicate buffer so that repeated
    /// insertions spread out instead of piling up on one spot.
    pub fn insert(&mut self, orientation: Orientation) -> Result<Step> {
        let working = orientation.enter(&self.image);
        let duplicate = self.take_duplicate(orientation, &working);

        let traced = compute_cost(&duplicate)?;
        let seam = trace_seam(&traced.cost, &traced.directions)?;
        let remaining = remove_seam(&duplicate, &seam)?;

        // The energy shown is the real image's, not the buffer's.
        let shown = compute_cost(&working)?;
        let overlay = draw_seam(&working, &seam)?;
        let grown = insert_seam(&working, &seam)?;

        self.session = Some(InsertionSession {
            orientation,
            buffer: remaining,
        });
        self.image = orientation.leave(grown);
        debug!(
            "inserted {:?} seam, now {}x{}",
            orientation,
            self.image.width(),
            self.image.height()
        );

        Ok(Step {
            orientation,
            seam,
            energy: orientation.leave(shown.energy),
            overlay: orientation.leave(overlay),
        })
    }

    // Continue the running session if it is for this orientation and
    // still wide enough to trace; otherwise start over from the image
    // as it stands.
    fn take_duplicate(&mut self, orientation: Orientation, working: &RgbImage) -> RgbImage {
        match self.session.take() {
            Some(session) if session.orientation == orientation && session.buffer.width() >= 2 => {
                session.buffer
            }
            Some(session) if session.orientation == orientation => {
                warn!(
                    "duplicate buffer down to {} pixels; restarting {:?} insertion session",
                    session.buffer.width(),
                    orientation
                );
                working.clone()
            }
            _ => {
                debug!("starting {:?} insertion session", orientation);
                working.clone()
            }
        }
    }

    /// Carve or grow the image to exactly `width` x `height`.
    /// Shrinking alternates between the two orientations while both
    /// dimensions are too large; growing finishes one orientation's
    /// insertion session before starting the other's.  Returns the
    /// last step taken, if any.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<Option<Step>> {
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyTarget { width, height });
        }
        info!(
            "resizing {}x{} to {}x{}",
            self.image.width(),
            self.image.height(),
            width,
            height
        );

        let mut last = None;
        let mut direction = Orientation::Vertical;
        while self.image.width() > width && self.image.height() > height {
            last = Some(self.remove(direction)?);
            direction = direction.turn();
        }
        while self.image.width() > width {
            last = Some(self.remove(Orientation::Vertical)?);
        }
        while self.image.height() > height {
            last = Some(self.remove(Orientation::Horizontal)?);
        }
        while self.image.width() < width {
            last = Some(self.insert(Orientation::Vertical)?);
        }
        while self.image.height() < height {
            last = Some(self.insert(Orientation::Horizontal)?);
        }

        info!("resized to {}x{}", self.image.width(), self.image.height());
        Ok(last)
    }
}
