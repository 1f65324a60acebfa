/// A cell on the game grid
///
/// Plain value type: moving a coordinate yields a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The square, wrap-around playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: i32,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    /// Side length in cells
    pub fn size(&self) -> i32 {
        self.size
    }

    #[cfg(test)]
    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.size / 2, self.size / 2)
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        (0..self.size).contains(&pos.x) && (0..self.size).contains(&pos.y)
    }

    /// Step `pos` by `(dx, dy)` and bring the result back onto the grid.
    ///
    /// Leaving past the far edge re-enters offset by the overshoot; leaving
    /// past the near edge re-enters at `size - |step|`.
    pub fn step(&self, pos: Coordinate, dx: i32, dy: i32) -> Coordinate {
        Coordinate::new(
            self.wrap_axis(pos.x + dx, dx),
            self.wrap_axis(pos.y + dy, dy),
        )
    }

    fn wrap_axis(&self, value: i32, step: i32) -> i32 {
        if value >= self.size {
            value - self.size
        } else if value < 0 {
            self.size - step.abs()
        } else {
            value
        }
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Coordinate::new(x, y)))
    }
}
