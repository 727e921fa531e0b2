// #![deny(missing_docs)]

//! Content-aware image resizing by forward-energy seam carving.
//!
//! The four core operations are [`compute_cost`], [`trace_seam`],
//! [`remove_seam`] and [`insert_seam`]; [`Carver`] strings them
//! together, for either orientation, and keeps repeated insertions
//! from landing on the same seam.

extern crate image;

mod ternary;

pub mod error;
pub use error::{CarveError, Result};

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod intensity;

pub mod energy;
pub use energy::{compute_cost, CostMatrix, Direction, DirectionMatrix, ForwardEnergy};

pub mod seamfinder;
pub use seamfinder::{trace_seam, Seam};

pub mod seamops;
pub use seamops::{draw_seam, insert_seam, remove_seam};

pub mod flipper;
pub use flipper::{transpose, Flipper};

pub mod seamcarver;
pub use seamcarver::{Carver, Orientation, Step};
