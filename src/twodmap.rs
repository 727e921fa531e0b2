use crate::cq;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field.  Every intermediate product
/// of the carver lives in one of these: the padded intensity field
/// (`i32`), the cumulative cost table (`u32`), and the table of
/// predecessor directions.  Addressing is `(x, y)`, column first, the
/// same as the image crate.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    values: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to the content type's
    /// default.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            values: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major vector.  Returns `None` if the
    /// vector is not exactly `width * height` long.
    pub fn from_vec(width: u32, height: u32, values: Vec<P>) -> Option<Self> {
        cq!(
            values.len() == width as usize * height as usize,
            Some(TwoDimensionalMap {
                width,
                height,
                values
            }),
            None
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// One full row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.values[start..start + self.width as usize]
    }

    /// Every cell, row-major.
    pub fn values(&self) -> &[P] {
        &self.values
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.values[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_column_first() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(3, 2);
        map[(2, 0)] = 7;
        map[(0, 1)] = 9;
        assert_eq!(map.values(), &[0, 0, 7, 9, 0, 0]);
        assert_eq!(map.row(1), &[9, 0, 0]);
        assert_eq!(map.dimensions(), (3, 2));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(TwoDimensionalMap::from_vec(2, 2, vec![1u32, 2, 3]).is_none());
        let map = TwoDimensionalMap::from_vec(2, 2, vec![1u32, 2, 3, 4]).unwrap();
        assert_eq!(map[(1, 1)], 4);
    }
}
