/// The error type for constructing and configuring a [`Board`](crate::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    EmptyDimensions { width: usize, height: usize },
    GameIdAlreadySet { existing: u32, requested: u32 },
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::EmptyDimensions { width, height } => write!(
                f,
                "A board needs a positive width and height, got {}x{}",
                width, height
            ),
            BoardError::GameIdAlreadySet {
                existing,
                requested,
            } => write!(
                f,
                "The board already belongs to game {} and cannot be assigned game {}",
                existing, requested
            ),
        }
    }
}
