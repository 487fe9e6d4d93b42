use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rag_core::{Connectivity, Error, Image, ImageView, ImageViewMut, Pixel};

use crate::Segmentation;

/// Label of pixels where two or more basins meet.
pub const WATERSHED_LINE: u32 = 0;

const UNLABELED: u32 = u32::MAX;

/// Meyer flooding from the regional minima of `src`.
///
/// Each regional minimum (a connected plateau with no lower neighbor) seeds a
/// basin. Pixels are then flooded in increasing level order, FIFO within a
/// level; a pixel that touches two different basins becomes a
/// [`WATERSHED_LINE`] pixel and stops the flood there.
pub fn watershed_flooding<T: Pixel>(
    src: &ImageView<'_, T>,
    connectivity: Connectivity,
) -> Segmentation {
    let (w, h) = src.dimensions();
    let packed = src.to_image();
    let f = packed.data();
    let n = f.len();

    let mut out = Image::new_fill(w, h, UNLABELED);
    let labels = out.data_mut();
    let region_count = label_regional_minima(f, w, h, connectivity, labels);

    let mut queued = vec![false; n];
    let mut heap = BinaryHeap::new();
    let mut seq = 0_u64;

    for p in 0..n {
        if labels[p] == UNLABELED {
            continue;
        }
        for q in connectivity.neighbors(p % w, p / w, w, h) {
            if labels[q] == UNLABELED && !queued[q] {
                queued[q] = true;
                heap.push(Reverse((f[q].level(), seq, q)));
                seq += 1;
            }
        }
    }

    while let Some(Reverse((_, _, p))) = heap.pop() {
        let mut basin = None;
        let mut conflict = false;
        for q in connectivity.neighbors(p % w, p / w, w, h) {
            let l = labels[q];
            if l == UNLABELED || l == WATERSHED_LINE {
                continue;
            }
            match basin {
                None => basin = Some(l),
                Some(b) if b != l => {
                    conflict = true;
                    break;
                }
                Some(_) => {}
            }
        }

        let Some(l) = basin.filter(|_| !conflict) else {
            labels[p] = WATERSHED_LINE;
            continue;
        };

        labels[p] = l;
        for q in connectivity.neighbors(p % w, p / w, w, h) {
            if labels[q] == UNLABELED && !queued[q] {
                queued[q] = true;
                heap.push(Reverse((f[q].level(), seq, q)));
                seq += 1;
            }
        }
    }

    // Pixels enclosed by watershed lines are never reached by a flood.
    for l in labels.iter_mut() {
        if *l == UNLABELED {
            *l = WATERSHED_LINE;
        }
    }

    Segmentation {
        labels: out,
        region_count,
    }
}

fn label_regional_minima<T: Pixel>(
    f: &[T],
    w: usize,
    h: usize,
    connectivity: Connectivity,
    labels: &mut [u32],
) -> usize {
    let n = f.len();
    let mut seen = vec![false; n];
    let mut plateau = Vec::new();
    let mut queue = VecDeque::new();
    let mut count = 0_u32;

    for start in 0..n {
        if seen[start] {
            continue;
        }

        let level = f[start];
        let mut is_minimum = true;
        plateau.clear();
        seen[start] = true;
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            plateau.push(p);
            for q in connectivity.neighbors(p % w, p / w, w, h) {
                if f[q] < level {
                    is_minimum = false;
                } else if f[q] == level && !seen[q] {
                    seen[q] = true;
                    queue.push_back(q);
                }
            }
        }

        if is_minimum {
            count += 1;
            for &p in &plateau {
                labels[p] = count;
            }
        }
    }

    count as usize
}

/// Writes `value` into `image` wherever `labels` holds [`WATERSHED_LINE`].
/// Returns the number of pixels written.
pub fn superpose_watershed<T: Pixel>(
    image: &mut ImageViewMut<'_, T>,
    labels: &ImageView<'_, u32>,
    value: T,
) -> Result<usize, Error> {
    if image.dimensions() != labels.dimensions() {
        return Err(Error::DimensionMismatch {
            expected: image.dimensions(),
            actual: labels.dimensions(),
        });
    }

    let mut written = 0;
    for y in 0..labels.height() {
        for (x, &l) in labels.row(y).iter().enumerate() {
            if l == WATERSHED_LINE && image.put(x, y, value) {
                written += 1;
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use rag_core::{Connectivity, Error, Image};

    use super::{WATERSHED_LINE, superpose_watershed, watershed_flooding};

    /// Two flat valleys separated by a one-pixel ridge at column 4.
    fn two_valleys() -> Image<u8> {
        let mut data = vec![10u8; 9 * 5];
        for y in 0..5 {
            data[y * 9 + 4] = 200;
        }
        Image::from_vec(9, 5, data).expect("valid image")
    }

    #[test]
    fn ridge_becomes_watershed_line() {
        let img = two_valleys();
        let seg = watershed_flooding(&img.as_view(), Connectivity::C4);

        assert_eq!(seg.region_count, 2);
        for y in 0..5 {
            assert_eq!(seg.labels.get(0, y), Some(&1));
            assert_eq!(seg.labels.get(4, y), Some(&WATERSHED_LINE));
            assert_eq!(seg.labels.get(8, y), Some(&2));
        }
    }

    #[test]
    fn constant_image_is_one_basin() {
        let img = Image::new_fill(6, 4, 33u16);
        let seg = watershed_flooding(&img.as_view(), Connectivity::C8);

        assert_eq!(seg.region_count, 1);
        assert!(seg.labels.data().iter().all(|&l| l == 1));
    }

    #[test]
    fn empty_image_has_no_regions() {
        let img = Image::<u8>::from_vec(0, 0, Vec::new()).expect("empty image");
        let seg = watershed_flooding(&img.as_view(), Connectivity::C4);

        assert_eq!(seg.region_count, 0);
        assert!(seg.labels.data().is_empty());
    }

    #[test]
    fn slopes_flood_towards_their_minimum() {
        // V-shaped profile along x: minima at both ends, peak in the middle.
        let profile = [0u8, 10, 20, 30, 40, 30, 20, 10, 0];
        let mut data = Vec::new();
        for _ in 0..3 {
            data.extend_from_slice(&profile);
        }
        let img = Image::from_vec(9, 3, data).expect("valid image");

        let seg = watershed_flooding(&img.as_view(), Connectivity::C4);
        assert_eq!(seg.region_count, 2);
        for y in 0..3 {
            let row = seg.labels.as_view().row(y).to_vec();
            assert_eq!(row, vec![1, 1, 1, 1, WATERSHED_LINE, 2, 2, 2, 2]);
        }
    }

    #[test]
    fn superpose_marks_line_pixels() {
        let img = two_valleys();
        let seg = watershed_flooding(&img.as_view(), Connectivity::C4);

        let mut canvas = Image::new_fill(9, 5, 0u8);
        let n = superpose_watershed(&mut canvas.as_view_mut(), &seg.labels.as_view(), 255)
            .expect("matching dimensions");
        assert_eq!(n, 5);
        assert_eq!(canvas.get(4, 2), Some(&255));
        assert_eq!(canvas.get(3, 2), Some(&0));
    }

    #[test]
    fn superpose_rejects_dimension_mismatch() {
        let labels = Image::new_fill(3, 3, 0u32);
        let mut canvas = Image::new_fill(4, 3, 0u8);
        let err = superpose_watershed(&mut canvas.as_view_mut(), &labels.as_view(), 1).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        );
    }
}
