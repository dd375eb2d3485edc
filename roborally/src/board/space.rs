use serde::{Deserialize, Serialize};

/// Board coordinates. `x` grows to the east, `y` to the south.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single square of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Space {
    pub x: usize,
    pub y: usize,
    /// Number of the player standing here.
    pub(crate) player: Option<usize>,
}

impl Space {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Self { x, y, player: None }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// The player number of the occupant, if any.
    pub fn player(&self) -> Option<usize> {
        self.player
    }

    pub fn is_free(&self) -> bool {
        self.player.is_none()
    }
}
