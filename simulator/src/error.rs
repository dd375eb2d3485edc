use roborally::{BoardError, NO_REGISTERS};

#[derive(Debug)]
/// Error type for a game description that cannot be set up.
pub enum ConfigError {
    InvalidBoard(BoardError),
    NoPlayers,
    StartOutOfBounds {
        player: String,
        x: usize,
        y: usize,
    },
    SharedStart {
        first: String,
        second: String,
        x: usize,
        y: usize,
    },
    ProgramTooLong {
        player: String,
        len: usize,
    },
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBoard(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for ConfigError {
    fn from(err: BoardError) -> Self {
        ConfigError::InvalidBoard(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBoard(_) => write!(f, "The board cannot be created"),
            ConfigError::NoPlayers => write!(f, "The game needs at least one player"),
            ConfigError::StartOutOfBounds { player, x, y } => write!(
                f,
                "{} starts at ({}, {}), which is not on the board",
                player, x, y
            ),
            ConfigError::SharedStart {
                first,
                second,
                x,
                y,
            } => write!(f, "{} and {} both start at ({}, {})", first, second, x, y),
            ConfigError::ProgramTooLong { player, len } => write!(
                f,
                "The program of {} has {} commands, but there are only {} registers",
                player, len, NO_REGISTERS
            ),
        }
    }
}
