use rag_core::{Connectivity, Image, ImageView, Pixel};

const UNVISITED: usize = usize::MAX;

/// Gray-level area closing.
///
/// Every pixel is raised to the lowest level `h` at which its connected
/// component of `{v <= h}` covers at least `lambda` pixels. Minima smaller
/// than `lambda` are filled; larger structures keep their values.
///
/// Union-find over pixels sorted by increasing level (Meijster & Wilkinson).
pub fn area_closing<T: Pixel>(
    src: &ImageView<'_, T>,
    connectivity: Connectivity,
    lambda: usize,
) -> Image<T> {
    let (w, h) = src.dimensions();
    let packed = src.to_image();
    if w == 0 || h == 0 || lambda <= 1 {
        return packed;
    }

    let f = packed.data();
    let n = f.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&p| f[p]);

    let mut parent = vec![UNVISITED; n];
    let mut area = vec![0_usize; n];

    for &p in &order {
        parent[p] = p;
        area[p] = 1;

        for q in connectivity.neighbors(p % w, p / w, w, h) {
            if parent[q] == UNVISITED {
                continue;
            }

            let r = find_root(&mut parent, q);
            if r == p {
                continue;
            }

            if f[r] == f[p] || area[r] < lambda {
                area[p] += area[r];
                parent[r] = p;
            } else {
                area[p] = area[p].max(lambda);
            }
        }
    }

    let mut out = packed.clone();
    let data = out.data_mut();
    for &p in order.iter().rev() {
        let r = parent[p];
        if r != p {
            data[p] = data[r];
        }
    }

    out
}

fn find_root(parent: &mut [usize], p: usize) -> usize {
    let mut root = p;
    while parent[root] != root {
        root = parent[root];
    }

    let mut cur = p;
    while parent[cur] != root {
        let next = parent[cur];
        parent[cur] = root;
        cur = next;
    }

    root
}
