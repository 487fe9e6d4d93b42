use region_overlay::Image;

pub const VALLEY: u8 = 10;
pub const RIDGE: u8 = 200;

/// Two flat valleys left and right of a one-pixel ridge at `ridge_col`.
pub fn side_by_side_valleys(width: usize, height: usize, ridge_col: usize) -> Image<u8> {
    assert!(ridge_col > 0 && ridge_col + 1 < width, "ridge must split the image");

    let mut data = vec![VALLEY; width * height];
    for y in 0..height {
        data[y * width + ridge_col] = RIDGE;
    }
    Image::from_vec(width, height, data).expect("valid image")
}

/// Two flat valleys above and below a one-pixel ridge at `ridge_row`.
pub fn stacked_valleys(width: usize, height: usize, ridge_row: usize) -> Image<u8> {
    assert!(ridge_row > 0 && ridge_row + 1 < height, "ridge must split the image");

    let mut data = vec![VALLEY; width * height];
    for x in 0..width {
        data[ridge_row * width + x] = RIDGE;
    }
    Image::from_vec(width, height, data).expect("valid image")
}

/// `cells x cells` flat valleys of `cell x cell` pixels separated by
/// one-pixel ridges.
pub fn valley_grid(cells: usize, cell: usize) -> Image<u8> {
    assert!(cells > 0 && cell > 0, "grid must be non-empty");

    let size = cells * cell + (cells - 1);
    let mut data = vec![VALLEY; size * size];
    for y in 0..size {
        for x in 0..size {
            if (x + 1) % (cell + 1) == 0 || (y + 1) % (cell + 1) == 0 {
                data[y * size + x] = RIDGE;
            }
        }
    }
    Image::from_vec(size, size, data).expect("valid image")
}

/// Dark left half, bright right half.
pub fn step_edge(width: usize, height: usize, step_col: usize) -> Image<u8> {
    let mut data = vec![20u8; width * height];
    for y in 0..height {
        for x in step_col..width {
            data[y * width + x] = 220;
        }
    }
    Image::from_vec(width, height, data).expect("valid image")
}
