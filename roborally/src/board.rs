mod space;

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub use space::*;

use crate::{
    BoardError, CommandCard, CommandCardField, FieldRef, Heading, ObserverId, ObserverRegistry,
    Player, PlayerKey, Subject,
};

pub const DEFAULT_BOARD_NAME: &str = "defaultboard";

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Board`], used to tie players to the board they were built for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

/// The phase the game is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Initialisation,
    Programming,
    Activation,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Initialisation => "INITIALISATION",
            Phase::Programming => "PROGRAMMING",
            Phase::Activation => "ACTIVATION",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A toroidal grid of spaces, the players on it, and the turn state.
///
/// Leaving the board on one side re-enters it on the opposite side, see
/// [`Self::get_neighbour()`].
///
/// Every setter is guarded: writing the current value again is a no-op,
/// returns false and notifies nobody.
#[derive(Debug)]
pub struct Board {
    id: BoardId,
    name: String,
    game_id: Option<u32>,
    width: usize,
    height: usize,
    /// In x-major order, i.e. indexed by `[x * height + y]`.
    spaces: Vec<Space>,
    /// Insertion order is turn order.
    players: Vec<Player>,
    current: Option<usize>,
    phase: Phase,
    step: usize,
    step_mode: bool,
    total_moves: u32,
    observers: ObserverRegistry,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_name(width, height, DEFAULT_BOARD_NAME)
    }

    pub fn with_name(width: usize, height: usize, name: &str) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyDimensions { width, height });
        }
        let mut spaces = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                spaces.push(Space::new(x, y));
            }
        }
        Ok(Self {
            id: BoardId(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed)),
            name: String::from(name),
            game_id: None,
            width,
            height,
            spaces,
            players: Vec::new(),
            current: None,
            phase: Phase::Initialisation,
            step: 0,
            step_mode: false,
            total_moves: 0,
            observers: ObserverRegistry::new(),
        })
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn game_id(&self) -> Option<u32> {
        self.game_id
    }

    /// Assigns the board to a game. Once set, the id can only be confirmed,
    /// not changed.
    pub fn set_game_id(&mut self, game_id: u32) -> Result<(), BoardError> {
        match self.game_id {
            None => {
                self.game_id = Some(game_id);
                Ok(())
            }
            Some(existing) if existing == game_id => Ok(()),
            Some(existing) => Err(BoardError::GameIdAlreadySet {
                existing,
                requested: game_id,
            }),
        }
    }

    fn space_index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.x * self.height + pos.y)
    }

    /// Returns `None` outside of `[0, width) x [0, height)`.
    pub fn get_space(&self, x: usize, y: usize) -> Option<&Space> {
        self.space_index(Position::new(x, y))
            .map(|idx| &self.spaces[idx])
    }

    pub fn space(&self, pos: Position) -> Option<&Space> {
        self.get_space(pos.x, pos.y)
    }

    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// The space one step from `pos` in direction `heading`, wrapping around
    /// the edges. Only `None` if `pos` itself is off the board.
    pub fn get_neighbour(&self, pos: Position, heading: Heading) -> Option<&Space> {
        self.space_index(pos)?;
        let Position { mut x, mut y } = pos;
        match heading {
            Heading::South => y = (y + 1) % self.height,
            Heading::West => x = (x + self.width - 1) % self.width,
            Heading::North => y = (y + self.height - 1) % self.height,
            Heading::East => x = (x + 1) % self.width,
        }
        self.get_space(x, y)
    }

    pub fn players_number(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Adds a player built for this board. Returns false, and changes
    /// nothing, if it was built for another board or is already present.
    pub fn add_player(&mut self, player: Player) -> bool {
        if player.board_id() != self.id || self.player_number_by_key(player.key()).is_some() {
            return false;
        }
        self.players.push(player);
        self.observers.notify(Subject::Board);
        true
    }

    pub fn get_player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    /// The player's position in turn order, if it is on this board.
    pub fn player_number(&self, player: &Player) -> Option<usize> {
        if player.board_id() != self.id {
            return None;
        }
        self.player_number_by_key(player.key())
    }

    pub fn player_number_by_key(&self, key: PlayerKey) -> Option<usize> {
        self.players.iter().position(|p| p.key() == key)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|idx| self.players.get(idx))
    }

    pub fn current_player_number(&self) -> Option<usize> {
        self.current
    }

    /// Ignored unless `idx` is a player on this board.
    pub fn set_current_player(&mut self, idx: usize) -> bool {
        if idx >= self.players.len() || self.current == Some(idx) {
            return false;
        }
        self.current = Some(idx);
        self.observers.notify(Subject::Board);
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) -> bool {
        if phase == self.phase {
            return false;
        }
        self.phase = phase;
        self.observers.notify(Subject::Board);
        true
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn set_step(&mut self, step: usize) -> bool {
        if step == self.step {
            return false;
        }
        self.step = step;
        self.observers.notify(Subject::Board);
        true
    }

    pub fn is_step_mode(&self) -> bool {
        self.step_mode
    }

    pub fn set_step_mode(&mut self, step_mode: bool) -> bool {
        if step_mode == self.step_mode {
            return false;
        }
        self.step_mode = step_mode;
        self.observers.notify(Subject::Board);
        true
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub(crate) fn count_move(&mut self) {
        self.total_moves += 1;
        self.observers.notify(Subject::Board);
    }

    /// Places a player on a space, or takes it off the board with `None`.
    ///
    /// The player's old space is vacated. A player already standing on the
    /// target space is pushed off the board. Returns false if nothing changed
    /// or the player or space does not exist.
    pub fn set_player_space(&mut self, player: usize, target: Option<Position>) -> bool {
        let Some(old) = self.players.get(player).map(Player::space) else {
            return false;
        };
        if old == target {
            return false;
        }
        let target_idx = match target {
            Some(pos) => match self.space_index(pos) {
                Some(idx) => Some(idx),
                None => return false,
            },
            None => None,
        };

        if let Some(idx) = old.and_then(|pos| self.space_index(pos)) {
            if self.spaces[idx].player == Some(player) {
                self.spaces[idx].player = None;
                self.observers.notify(Subject::Space(self.spaces[idx].position()));
            }
        }
        if let Some(idx) = target_idx {
            if let Some(evicted) = self.spaces[idx].player.replace(player) {
                self.players[evicted].space = None;
                self.observers.notify(Subject::Player(evicted));
            }
            self.observers.notify(Subject::Space(self.spaces[idx].position()));
        }
        self.players[player].space = target;
        self.observers.notify(Subject::Player(player));
        true
    }

    pub fn set_player_heading(&mut self, player: usize, heading: Heading) -> bool {
        match self.players.get_mut(player) {
            Some(p) if p.heading != heading => {
                p.heading = heading;
                self.observers.notify(Subject::Player(player));
                true
            }
            _ => false,
        }
    }

    pub fn field(&self, field: FieldRef) -> Option<&CommandCardField> {
        self.players.get(field.player)?.field(field.slot)
    }

    fn field_mut(&mut self, field: FieldRef) -> Option<&mut CommandCardField> {
        self.players.get_mut(field.player)?.field_mut(field.slot)
    }

    pub fn set_field_card(&mut self, field: FieldRef, card: Option<CommandCard>) -> bool {
        let changed = self
            .field_mut(field)
            .map_or(false, |f| f.set_card(card));
        if changed {
            self.observers.notify(Subject::Field(field));
        }
        changed
    }

    pub fn set_field_visible(&mut self, field: FieldRef, visible: bool) -> bool {
        let changed = self
            .field_mut(field)
            .map_or(false, |f| f.set_visible(visible));
        if changed {
            self.observers.notify(Subject::Field(field));
        }
        changed
    }

    pub fn subscribe<F: FnMut(Subject) + 'static>(&mut self, observer: F) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// One-line summary of the turn state for a status bar.
    pub fn status_message(&self) -> String {
        format!(
            "Phase: {}, Player = {}, Step: {}",
            self.phase,
            self.current_player().map_or("none", Player::name),
            self.step
        )
    }
}
