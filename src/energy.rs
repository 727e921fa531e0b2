// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the cost of an image using the Avidan & Shamir "Forward
//! Energy" algorithm.
//!
//! Forward energy charges a pixel not for its own gradient but for
//! the gradient its removal would create: taking a pixel out of a row
//! makes its left and right neighbors adjacent, and taking it out of
//! a seam that arrived diagonally makes a vertical neighbor adjacent
//! too.  The cumulative cost table and the table of which predecessor
//! produced each minimum come out of a single top-to-bottom pass.

use crate::cq;
use crate::error::{CarveError, Result};
use crate::intensity::{intensity_field, IntensityField};
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Primitive};
use itertools::{Itertools, MinMaxResult};

/// Which cell in the row above a seam arrived from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
}

// The top row has no predecessor, and by convention records Up.
impl Default for Direction {
    fn default() -> Self {
        Direction::Up
    }
}

/// Cumulative minimal seam cost, per pixel.
pub type CostMatrix = TwoDimensionalMap<u32>;

/// The predecessor direction that produced each cumulative minimum.
pub type DirectionMatrix = TwoDimensionalMap<Direction>;

/// Everything one energy pass produces.
#[derive(Debug, Clone)]
pub struct ForwardEnergy {
    /// The cost matrix normalized to 0..=255, for display only.
    pub energy: GrayImage,
    pub cost: CostMatrix,
    pub directions: DirectionMatrix,
}

// The three transition costs for a single pixel.
//
//  CU(x,y) = |I(x−1,y) − I(x+1,y)|
//  CL(x,y) = CU(x,y) + |I(x,y−1) − I(x−1,y)|
//  CR(x,y) = CU(x,y) + |I(x,y−1) − I(x+1,y)|
//
// The padded field makes every one of those lookups legal, so the
// edges need no special case here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct TransitionCosts {
    left: u32,
    up: u32,
    right: u32,
}

fn transition_costs(field: &IntensityField, (x, y): (u32, u32)) -> TransitionCosts {
    let (fx, fy) = (x + 1, y + 1);
    let (left, right, above) = (field[(fx - 1, fy)], field[(fx + 1, fy)], field[(fx, fy - 1)]);
    let up = left.abs_diff(right);
    TransitionCosts {
        left: up + above.abs_diff(left),
        up,
        right: up + above.abs_diff(right),
    }
}

// The cost for a specific pixel is therefore:
//
//           ⎧ M(x−1,y−1)+CL(x,y)
// M(x,y)=min⎨ M(x,y−1)+CU(x,y)
//           ⎩ M(x+1,y−1)+CR(x,y)
//
// A predecessor off the edge of the image is not a candidate at all.
// Ties go to the first candidate in Left, Up, Right order; which seam
// gets picked on a flat region depends on it.
fn cheapest_predecessor(
    cost: &CostMatrix,
    transitions: TransitionCosts,
    (x, y): (u32, u32),
) -> (Direction, u32) {
    let above = y - 1;
    let max_width = cost.width() - 1;
    let up = cost[(x, above)].saturating_add(transitions.up);
    let candidates = [
        (
            Direction::Left,
            cq!(x == 0, None, Some(cost[(x - 1, above)].saturating_add(transitions.left))),
        ),
        (Direction::Up, Some(up)),
        (
            Direction::Right,
            cq!(x == max_width, None, Some(cost[(x + 1, above)].saturating_add(transitions.right))),
        ),
    ];

    candidates
        .iter()
        .filter_map(|&(direction, total)| total.map(|total| (direction, total)))
        .min_by_key(|&(_, total)| total)
        .unwrap_or((Direction::Up, up))
}

/// Stretch the cost matrix over 0..=255.  A flat matrix comes out
/// black.
pub fn normalize(cost: &CostMatrix) -> GrayImage {
    let (min, max) = match cost.values().iter().minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(v) => (*v, *v),
        MinMaxResult::MinMax(lo, hi) => (*lo, *hi),
    };
    let range = u64::from(max - min);

    ImageBuffer::from_fn(cost.width(), cost.height(), |x, y| {
        let offset = u64::from(cost[(x, y)] - min);
        let level = cq!(range == 0, 0, (offset * 255 + range / 2) / range);
        Luma([level as u8])
    })
}

/// Image -> ForwardEnergy
///
/// Builds the cumulative cost table row by row from the top, the
/// direction table alongside it, and the display map from the
/// finished table.  Images narrower than two pixels have no
/// horizontal neighborhood and are refused.
pub fn compute_cost<I, P, S>(image: &I) -> Result<ForwardEnergy>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::EmptyImage);
    }
    if width < 2 {
        return Err(CarveError::TooNarrow { width });
    }

    let field = intensity_field(image);
    let mut cost = CostMatrix::new(width, height);
    let mut directions = DirectionMatrix::new(width, height);

    // The top row is a special case: nothing above, so only the cost
    // of closing the gap left and right counts.
    for x in 0..width {
        cost[(x, 0)] = transition_costs(&field, (x, 0)).up;
    }

    for y in 1..height {
        for x in 0..width {
            let transitions = transition_costs(&field, (x, y));
            let (direction, total) = cheapest_predecessor(&cost, transitions, (x, y));
            cost[(x, y)] = total;
            directions[(x, y)] = direction;
        }
    }

    Ok(ForwardEnergy {
        energy: normalize(&cost),
        cost,
        directions,
    })
}

#[cfg(test)]
mod tests {
    use super::Direction::{Left, Right, Up};
    use super::*;
    use image::{Rgb, RgbImage};

    fn grey_rows(width: u32, rows: &[&[u8]]) -> RgbImage {
        let data: Vec<u8> = rows
            .iter()
            .flat_map(|row| row.iter().flat_map(|v| vec![*v, *v, *v]))
            .collect();
        ImageBuffer::from_raw(width, rows.len() as u32, data).unwrap()
    }

    #[test]
    fn transition_costs_read_the_padded_neighbors() {
        let image = grey_rows(3, &[&[0, 0, 0], &[0, 90, 0]]);
        let field = intensity_field(&image);
        let costs: Vec<_> = (0..3).map(|x| transition_costs(&field, (x, 1))).collect();
        assert_eq!(
            costs,
            vec![
                TransitionCosts { left: 90, up: 90, right: 180 },
                TransitionCosts { left: 0, up: 0, right: 0 },
                TransitionCosts { left: 180, up: 90, right: 90 },
            ]
        );
    }

    const RAMP_COST: [u32; 9] = [128, 255, 127, 256, 509, 254, 384, 636, 381];

    #[test]
    fn ramp_cost_and_directions() {
        let image = grey_rows(3, &[&[0, 128, 255], &[0, 128, 255], &[0, 128, 255]]);
        let result = compute_cost(&image).unwrap();
        assert_eq!(result.cost.values(), &RAMP_COST[..]);
        assert_eq!(
            result.directions.values(),
            &[Up, Up, Up, Up, Right, Up, Up, Right, Up][..]
        );
    }

    #[test]
    fn ties_prefer_left_then_up() {
        // A thin bright line: closing it up creates no new edge.
        let image = grey_rows(3, &[&[0, 255, 0], &[0, 255, 0]]);
        let result = compute_cost(&image).unwrap();
        assert_eq!(result.cost.row(0), &[255, 0, 255]);
        assert_eq!(result.cost.row(1), &[510, 0, 510]);
        assert_eq!(result.directions.row(1), &[Up, Up, Left]);
    }

    #[test]
    fn left_beats_right_when_up_is_dearer() {
        let cost = CostMatrix::from_vec(3, 2, vec![5, 9, 5, 0, 0, 0]).unwrap();
        let transitions = TransitionCosts { left: 1, up: 1, right: 1 };
        assert_eq!(cheapest_predecessor(&cost, transitions, (1, 1)), (Left, 6));
        let uneven = TransitionCosts { left: 2, up: 1, right: 1 };
        assert_eq!(cheapest_predecessor(&cost, uneven, (1, 1)), (Right, 6));
    }

    #[test]
    fn flat_image_has_zero_cost_and_leans_left() {
        let image: RgbImage = ImageBuffer::from_pixel(4, 4, Rgb([40, 80, 120]));
        let result = compute_cost(&image).unwrap();
        assert!(result.cost.values().iter().all(|c| *c == 0));
        for y in 1..4 {
            assert_eq!(result.directions.row(y), &[Up, Left, Left, Left]);
        }
        assert!(result.energy.pixels().all(|p| p.0 == [0]));
    }

    #[test]
    fn edges_never_point_off_the_image() {
        let image: RgbImage = ImageBuffer::from_fn(17, 11, |x, y| {
            Rgb([
                ((x * 37 + y * 91) % 256) as u8,
                ((x * x + 7 * y) % 256) as u8,
                ((x * y * 13) % 256) as u8,
            ])
        });
        let result = compute_cost(&image).unwrap();
        for y in 0..11 {
            assert_ne!(result.directions[(0, y)], Left);
            assert_ne!(result.directions[(16, y)], Right);
        }
    }

    #[test]
    fn energy_map_spans_the_full_range() {
        let image = grey_rows(3, &[&[0, 128, 255], &[0, 128, 255], &[0, 128, 255]]);
        let result = compute_cost(&image).unwrap();
        assert_eq!(result.energy.dimensions(), (3, 3));
        assert_eq!(result.energy.get_pixel(2, 0).0, [0]);
        assert_eq!(result.energy.get_pixel(1, 2).0, [255]);
    }

    #[test]
    fn narrow_and_empty_images_are_refused() {
        let narrow: RgbImage = ImageBuffer::new(1, 5);
        assert_eq!(
            compute_cost(&narrow).unwrap_err(),
            CarveError::TooNarrow { width: 1 }
        );
        let empty: RgbImage = ImageBuffer::new(0, 0);
        assert_eq!(compute_cost(&empty).unwrap_err(), CarveError::EmptyImage);
    }
}
