use serde::{Deserialize, Serialize};

const OFFSETS_C4: [(isize, isize); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];
const OFFSETS_C8: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connectivity {
    #[default]
    C4,
    C8,
}

impl Connectivity {
    /// Neighbor offsets as `(dx, dy)`, center excluded.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Self::C4 => &OFFSETS_C4,
            Self::C8 => &OFFSETS_C8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::C4 => "C4",
            Self::C8 => "C8",
        }
    }

    /// In-bounds neighbors of `(x, y)` in a `width x height` grid, as linear
    /// row-major indices.
    pub fn neighbors(
        self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = usize> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            if nx >= width || ny >= height {
                return None;
            }
            Some(ny * width + nx)
        })
    }
}
