// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam tracing
//!
//! Walks the direction table from the cheapest cell of the bottom row
//! back up to the top, producing one column per row.

use crate::energy::{CostMatrix, Direction, DirectionMatrix};
use crate::error::{CarveError, Result};
use std::slice::Iter;

/// A connected top-to-bottom path through an image, one column per
/// row.  The first entry belongs to the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    /// The columns, top row first.
    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    /// An iterator over the columns, for adapters and `for` loops.
    pub fn iter(&self) -> Iter<'_, u32> {
        self.0.iter()
    }

    /// The columns, bottom row first: the order they are traced in.
    pub fn bottom_up(&self) -> impl Iterator<Item = &u32> {
        self.0.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if no two neighboring rows are more than one column apart.
    pub fn is_connected(&self) -> bool {
        self.0.windows(2).all(|w| w[0].max(w[1]) - w[0].min(w[1]) <= 1)
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

impl<'a> IntoIterator for &'a Seam {
    type Item = &'a u32;
    type IntoIter = Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// (CostMatrix, DirectionMatrix) -> Seam
///
/// Starts from the left-most minimum of the bottom row and follows
/// the recorded directions upward.  The two tables must be non-empty
/// and the same size.
pub fn trace_seam(cost: &CostMatrix, directions: &DirectionMatrix) -> Result<Seam> {
    if cost.dimensions() != directions.dimensions() {
        return Err(CarveError::MismatchedMatrices {
            cost: cost.dimensions(),
            directions: directions.dimensions(),
        });
    }
    let (width, height) = cost.dimensions();
    if cost.is_empty() {
        return Err(CarveError::EmptyImage);
    }

    // Find the x coordinate of the bottommost seam with the least
    // energy.  min_by_key keeps the first of equal keys, so ties go
    // to the left.
    let bottom = height - 1;
    let mut seam_col = (0..width)
        .min_by_key(|x| cost[(*x, bottom)])
        .ok_or(CarveError::EmptyImage)?;

    // Working backwards, collect the columns bottom-up, then flip
    // them so the top row comes first.
    let mut columns = Vec::<u32>::with_capacity(height as usize);
    columns.push(seam_col);
    for y in (1..height).rev() {
        let broken = CarveError::BrokenDirections { x: seam_col, y };
        seam_col = match directions[(seam_col, y)] {
            Direction::Left => seam_col.checked_sub(1).ok_or(broken)?,
            Direction::Up => seam_col,
            Direction::Right if seam_col + 1 < width => seam_col + 1,
            Direction::Right => return Err(broken),
        };
        columns.push(seam_col);
    }
    columns.reverse();
    Ok(Seam(columns))
}
