use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{Board, BoardId, CommandCardField, Heading, Position, Slot};

/// Number of program registers every player has.
pub const NO_REGISTERS: usize = 5;
/// Number of hand cards every player is dealt.
pub const NO_CARDS: usize = 8;

static NEXT_PLAYER_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Player`], unique for the lifetime of the process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerKey(u64);

impl PlayerKey {
    fn fresh() -> Self {
        Self(NEXT_PLAYER_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// A robot on the board, together with its program and hand.
///
/// All mutation goes through the [`Board`] the player was built for, so
/// that occupancy stays consistent and observers are notified.
#[derive(Debug)]
pub struct Player {
    key: PlayerKey,
    board: BoardId,
    name: String,
    color: Option<String>,
    pub(crate) space: Option<Position>,
    pub(crate) heading: Heading,
    pub(crate) program: [CommandCardField; NO_REGISTERS],
    pub(crate) cards: [CommandCardField; NO_CARDS],
}

impl Player {
    /// Creates a player for `board`. It still has to be added with
    /// [`Board::add_player()`].
    pub fn new(board: &Board, color: Option<String>, name: &str) -> Self {
        let key = PlayerKey::fresh();
        Self {
            key,
            board: board.id(),
            name: String::from(name),
            color,
            space: None,
            heading: Heading::South,
            program: std::array::from_fn(|_| CommandCardField::new(Some(key))),
            cards: std::array::from_fn(|_| CommandCardField::new(Some(key))),
        }
    }

    pub fn key(&self) -> PlayerKey {
        self.key
    }

    /// The board this player was created for.
    pub fn board_id(&self) -> BoardId {
        self.board
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn space(&self) -> Option<Position> {
        self.space
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn program_field(&self, register: usize) -> Option<&CommandCardField> {
        self.program.get(register)
    }

    pub fn card_field(&self, idx: usize) -> Option<&CommandCardField> {
        self.cards.get(idx)
    }

    pub fn program(&self) -> &[CommandCardField; NO_REGISTERS] {
        &self.program
    }

    pub fn cards(&self) -> &[CommandCardField; NO_CARDS] {
        &self.cards
    }

    pub fn field(&self, slot: Slot) -> Option<&CommandCardField> {
        match slot {
            Slot::Program(register) => self.program.get(register),
            Slot::Hand(idx) => self.cards.get(idx),
        }
    }

    pub(crate) fn field_mut(&mut self, slot: Slot) -> Option<&mut CommandCardField> {
        match slot {
            Slot::Program(register) => self.program.get_mut(register),
            Slot::Hand(idx) => self.cards.get_mut(idx),
        }
    }
}
