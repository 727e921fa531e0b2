// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Every failure in the carver is a violated precondition: an empty
//! image, an image too narrow to have a neighborhood, or a seam that
//! does not belong to the image it is applied to.  Nothing is retried
//! and nothing is partially applied.

use failure::Fail;

/// The ways a carving request can be malformed.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum CarveError {
    #[fail(display = "cannot carve an empty image")]
    EmptyImage,

    #[fail(display = "image is {} pixels across; seams need at least 2", width)]
    TooNarrow { width: u32 },

    #[fail(
        display = "cost matrix is {:?} but direction matrix is {:?}",
        cost, directions
    )]
    MismatchedMatrices {
        cost: (u32, u32),
        directions: (u32, u32),
    },

    #[fail(display = "seam has {} rows but the image has {}", found, expected)]
    SeamLength { expected: u32, found: u32 },

    #[fail(
        display = "seam column {} in row {} is outside an image {} wide",
        column, row, width
    )]
    SeamOutOfBounds { row: u32, column: u32, width: u32 },

    #[fail(display = "direction table leaves the image at ({}, {})", x, y)]
    BrokenDirections { x: u32, y: u32 },

    #[fail(display = "cannot resize to {}x{}", width, height)]
    EmptyTarget { width: u32, height: u32 },
}

/// Result type for every carving operation.
pub type Result<T> = std::result::Result<T, CarveError>;
