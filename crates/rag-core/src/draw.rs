use imageproc::drawing::BresenhamLineIter;

use crate::{ImageViewMut, Point2d};

/// Raster line drawing into a mutable image view.
pub trait LineRasterizer {
    /// Writes `value` to every pixel of the discrete segment `a -> b` that
    /// lies inside `image`. Returns the number of pixels written.
    fn draw_line<T: Copy>(
        &self,
        image: &mut ImageViewMut<'_, T>,
        a: Point2d,
        b: Point2d,
        value: T,
    ) -> usize;
}

/// Bresenham segments between the nearest pixel centers of both endpoints,
/// endpoints included, clipped to the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bresenham;

impl LineRasterizer for Bresenham {
    fn draw_line<T: Copy>(
        &self,
        image: &mut ImageViewMut<'_, T>,
        a: Point2d,
        b: Point2d,
        value: T,
    ) -> usize {
        let (Some(pa), Some(pb)) = (a.to_pixel(), b.to_pixel()) else {
            return 0;
        };

        let start = (pa.0 as f32, pa.1 as f32);
        let end = (pb.0 as f32, pb.1 as f32);

        let mut written = 0;
        for (x, y) in BresenhamLineIter::new(start, end) {
            if x < 0 || y < 0 {
                continue;
            }
            if image.put(x as usize, y as usize, value) {
                written += 1;
            }
        }
        written
    }
}
