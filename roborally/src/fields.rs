use serde::{Deserialize, Serialize};

use crate::{CommandCard, PlayerKey};

/// A slot that holds at most one [`CommandCard`].
///
/// Program registers and hand cards are both fields. The visibility flag
/// only matters to whoever draws the cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandCardField {
    owner: Option<PlayerKey>,
    card: Option<CommandCard>,
    visible: bool,
}

impl CommandCardField {
    /// Creates an empty, visible field.
    pub fn new(owner: Option<PlayerKey>) -> Self {
        Self {
            owner,
            card: None,
            visible: true,
        }
    }

    pub fn owner(&self) -> Option<PlayerKey> {
        self.owner
    }

    pub fn card(&self) -> Option<CommandCard> {
        self.card
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns whether the card actually changed.
    pub fn set_card(&mut self, card: Option<CommandCard>) -> bool {
        if card == self.card {
            return false;
        }
        self.card = card;
        true
    }

    /// Returns whether the visibility actually changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if visible == self.visible {
            return false;
        }
        self.visible = visible;
        true
    }
}

/// Which of a player's fields is meant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// A program register, `0..NO_REGISTERS`.
    Program(usize),
    /// A hand card, `0..NO_CARDS`.
    Hand(usize),
}

/// Addresses one field on the board: a player number and a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub player: usize,
    pub slot: Slot,
}

impl FieldRef {
    pub fn program(player: usize, register: usize) -> Self {
        Self {
            player,
            slot: Slot::Program(register),
        }
    }

    pub fn hand(player: usize, card: usize) -> Self {
        Self {
            player,
            slot: Slot::Hand(card),
        }
    }
}
