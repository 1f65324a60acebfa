use super::snake::{BodyElement, SnakeState};

/// Read-only view of one tick, handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Head first
    pub segments: Vec<BodyElement>,
    /// Missing only once the snake fills the grid
    pub food: Option<BodyElement>,
    pub score: u32,
    pub state: SnakeState,
    /// Side length of the grid in cells
    pub grid_size: i32,
}

impl Snapshot {
    #[cfg(test)]
    pub fn head(&self) -> Option<&BodyElement> {
        self.segments.first()
    }
}
