//! Gray-level morphology and watershed segmentation.
//!
//! The segmentation chain is `area_closing -> watershed_flooding`:
//! - [`area_closing`] fills every regional minimum whose area is below the
//!   threshold, which suppresses over-segmentation from small basins.
//! - [`watershed_flooding`] floods the closed image from its regional minima
//!   and labels basins `1..=region_count`. Pixels where two basins meet get
//!   [`WATERSHED_LINE`].
//!
//! [`morphological_gradient`] turns an intensity image into the gradient image
//! the flooding expects, for callers whose input is not already one.

mod closing;
mod gradient;
mod watershed;

use log::debug;
use rag_core::{Connectivity, Image, ImageView, Pixel};

pub use closing::area_closing;
pub use gradient::morphological_gradient;
pub use watershed::{WATERSHED_LINE, superpose_watershed, watershed_flooding};

/// Basin labels plus the number of basins.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub labels: Image<u32>,
    pub region_count: usize,
}

/// Area closing followed by watershed flooding under the same connectivity.
pub fn segment<T: Pixel>(
    src: &ImageView<'_, T>,
    connectivity: Connectivity,
    area_threshold: usize,
) -> Segmentation {
    let closed = area_closing(src, connectivity, area_threshold);
    debug!(
        "segment: area closing done ({}x{}, lambda={area_threshold})",
        closed.width(),
        closed.height()
    );

    let segmentation = watershed_flooding(&closed.as_view(), connectivity);
    debug!(
        "segment: watershed flooding produced {} basins",
        segmentation.region_count
    );
    segmentation
}

#[cfg(test)]
mod tests {
    use rag_core::{Connectivity, Image};

    use crate::{WATERSHED_LINE, segment};

    #[test]
    fn small_pits_are_merged_before_flooding() {
        // Two 2x2 pits (area 4) inside a flat 8x8 plateau.
        let mut data = vec![50u8; 64];
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2), (5, 5), (6, 5), (5, 6), (6, 6)] {
            data[y * 8 + x] = 10;
        }
        let img = Image::from_vec(8, 8, data).expect("valid image");

        let raw = segment(&img.as_view(), Connectivity::C4, 0);
        assert_eq!(raw.region_count, 2);

        let closed = segment(&img.as_view(), Connectivity::C4, 20);
        assert_eq!(closed.region_count, 1);
        assert!(closed.labels.data().iter().all(|&l| l == 1));
        assert!(!closed.labels.data().contains(&WATERSHED_LINE));
    }
}
