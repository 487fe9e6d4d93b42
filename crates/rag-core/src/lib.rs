//! Foundational primitives for region-adjacency overlays.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! Mutable views are what the overlay renderer writes into, so callers can
//! annotate a padded buffer or a sub-rectangle in place.
//!
//! ## Coordinates
//! [`Point2d`] uses `x` for the column and `y` for the row, both measured at
//! pixel centers. Integer coordinates refer to pixel centers. Tuple notation
//! `(row, col)` is only used through [`Point2d::from_row_col`].
//!
//! ## Connectivity
//! [`Connectivity::C4`] is the cross-shaped structuring element (axis-aligned
//! neighbors); [`Connectivity::C8`] adds diagonals.

mod connectivity;
mod draw;
mod error;
mod geom;
mod image;
mod pixel;

pub use connectivity::Connectivity;
pub use draw::{Bresenham, LineRasterizer};
pub use error::Error;
pub use geom::{Point2d, Vec2d};
pub use image::{Image, ImageView, ImageViewMut};
pub use pixel::Pixel;
