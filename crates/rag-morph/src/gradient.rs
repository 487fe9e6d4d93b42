use rag_core::{Connectivity, Image, ImageView, Pixel};

/// Elementary morphological gradient: dilation minus erosion over the
/// structuring element (center included).
pub fn morphological_gradient<T: Pixel>(
    src: &ImageView<'_, T>,
    connectivity: Connectivity,
) -> Image<T> {
    let (w, h) = src.dimensions();
    let mut out = Image::new_fill(w, h, T::default());
    if src.is_empty() {
        return out;
    }

    let mut dst = out.as_view_mut();
    for y in 0..h {
        let row = src.row(y);
        for x in 0..w {
            let center = row[x];
            let (mut lo, mut hi) = (center, center);

            for &(dx, dy) in connectivity.offsets() {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if let Some(&v) = src.get(nx, ny) {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }

            dst.put(x, y, T::from_level(hi.level() - lo.level()));
        }
    }

    out
}
