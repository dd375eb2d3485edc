use serde::{Deserialize, Serialize};

use crate::{Board, Command, Heading, Phase, Player, Position};

/// A serializable copy of the board's state at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: String,
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub game_id: Option<u32>,
    pub phase: Phase,
    pub step: usize,
    pub step_mode: bool,
    /// Name of the current player.
    pub current_player: Option<String>,
    pub total_moves: u32,
    /// In turn order.
    pub players: Vec<PlayerSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub color: Option<String>,
    /// `None` if the player is not on the board.
    pub position: Option<Position>,
    pub heading: Heading,
    /// One entry per register, `None` for an empty register.
    pub program: Vec<Option<Command>>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: String::from(player.name()),
            color: player.color().map(String::from),
            position: player.space(),
            heading: player.heading(),
            program: player
                .program()
                .iter()
                .map(|field| field.card().map(|card| card.command))
                .collect(),
        }
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            board: String::from(board.name()),
            width: board.width(),
            height: board.height(),
            game_id: board.game_id(),
            phase: board.phase(),
            step: board.step(),
            step_mode: board.is_step_mode(),
            current_player: board.current_player().map(|p| String::from(p.name())),
            total_moves: board.total_moves(),
            players: board.players().iter().map(PlayerSnapshot::from).collect(),
        }
    }
}
