use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use roborally::{Board, Command, Heading, Player, Position, DEFAULT_BOARD_NAME, NO_REGISTERS};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::recording::Recorder;

/// How the activation phase is driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// One `execute_programs` call per round.
    Programs,
    /// One `execute_step` call per player and register.
    Steps,
}

/// Settings for running games, independent of the game description.
pub struct Config {
    pub rng: StdRng,
    pub recorder: Option<Recorder>,
    pub rounds: usize,
    pub resolution: Resolution,
    pub show_board: bool,
}

/// A game description, as read from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// In turn order.
    pub players: Vec<PlayerConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub x: usize,
    pub y: usize,
    /// Defaults to `Heading::ALL[i % 4]` for the i-th player.
    #[serde(default)]
    pub heading: Option<Heading>,
    /// Commands put into the registers every round, starting at register 0.
    #[serde(default)]
    pub program: Vec<Command>,
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open game config '{}'", path.display()))?;
        let config: GameConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse game config '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Surfaces zero-sized boards as a config error
        self.new_board()?;
        if self.players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        for (idx, player) in self.players.iter().enumerate() {
            if player.x >= self.board.width || player.y >= self.board.height {
                return Err(ConfigError::StartOutOfBounds {
                    player: player.name.clone(),
                    x: player.x,
                    y: player.y,
                });
            }
            if let Some(first) = self.players[..idx]
                .iter()
                .find(|other| (other.x, other.y) == (player.x, player.y))
            {
                return Err(ConfigError::SharedStart {
                    first: first.name.clone(),
                    second: player.name.clone(),
                    x: player.x,
                    y: player.y,
                });
            }
            if player.program.len() > NO_REGISTERS {
                return Err(ConfigError::ProgramTooLong {
                    player: player.name.clone(),
                    len: player.program.len(),
                });
            }
        }
        Ok(())
    }

    fn new_board(&self) -> Result<Board, ConfigError> {
        let name = self.board.name.as_deref().unwrap_or(DEFAULT_BOARD_NAME);
        Ok(Board::with_name(self.board.width, self.board.height, name)?)
    }

    /// Creates the board with every player on its start space and the
    /// first player as current player.
    pub fn build_board(&self) -> Result<Board, ConfigError> {
        self.validate()?;
        let mut board = self.new_board()?;
        for (idx, config) in self.players.iter().enumerate() {
            let player = Player::new(&board, config.color.clone(), &config.name);
            board.add_player(player);
            board.set_player_space(idx, Some(Position::new(config.x, config.y)));
            let heading = config
                .heading
                .unwrap_or(Heading::ALL[idx % Heading::ALL.len()]);
            board.set_player_heading(idx, heading);
        }
        board.set_current_player(0);
        Ok(board)
    }
}
