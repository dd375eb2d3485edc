use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An instruction a robot can be programmed with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Forward,
    Right,
    Left,
    FastForward,
}

impl Command {
    /// All commands, in the order random cards are drawn from.
    pub const ALL: [Command; 4] = [
        Command::Forward,
        Command::Right,
        Command::Left,
        Command::FastForward,
    ];

    /// The short label printed on a card.
    pub fn display_name(self) -> &'static str {
        match self {
            Command::Forward => "Fwd",
            Command::Right => "Turn Right",
            Command::Left => "Turn Left",
            Command::FastForward => "Fast Fwd",
        }
    }

    /// Picks a command uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Command {
        // ALL is non-empty, so choose() always yields a value
        *Self::ALL.choose(rng).unwrap_or(&Command::Forward)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A programming card. Cards never change once dealt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandCard {
    pub command: Command,
}

impl CommandCard {
    pub fn new(command: Command) -> Self {
        Self { command }
    }

    pub fn name(&self) -> &'static str {
        self.command.display_name()
    }
}

impl From<Command> for CommandCard {
    fn from(command: Command) -> Self {
        Self::new(command)
    }
}

impl std::fmt::Display for CommandCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.name())
    }
}
