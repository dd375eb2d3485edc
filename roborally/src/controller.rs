use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::{
    Board, Command, CommandCard, CommandCardField, FieldRef, Phase, Position, Space, NO_CARDS,
    NO_REGISTERS,
};

/// Drives a [`Board`] through the programming and activation phases.
///
/// The game never ends by itself: once every register has been resolved,
/// a new programming phase starts.
#[derive(Debug)]
pub struct GameController<R = StdRng> {
    board: Board,
    rng: R,
}

impl<R: Rng> GameController<R> {
    /// `rng` is used to deal hand cards.
    pub fn new(board: Board, rng: R) -> Self {
        Self { board, rng }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Moves the current player to `pos` and passes the turn on, but only if
    /// nobody stands there. Returns false, and changes nothing, otherwise.
    pub fn move_current_player_to_space(&mut self, pos: Position) -> bool {
        let Some(current) = self.board.current_player_number() else {
            return false;
        };
        if !self.board.space(pos).map_or(false, Space::is_free) {
            return false;
        }
        self.board.set_player_space(current, Some(pos));
        self.board.count_move();
        let next = (current + 1) % self.board.players_number();
        self.board.set_current_player(next);
        true
    }

    pub fn start_programming_phase(&mut self) {
        self.board.set_phase(Phase::Programming);
        self.board.set_current_player(0);
        self.board.set_step(0);

        for player in 0..self.board.players_number() {
            for register in 0..NO_REGISTERS {
                let field = FieldRef::program(player, register);
                self.board.set_field_card(field, None);
                self.board.set_field_visible(field, true);
            }
            for idx in 0..NO_CARDS {
                let field = FieldRef::hand(player, idx);
                let card = self.generate_random_command_card();
                self.board.set_field_card(field, Some(card));
                self.board.set_field_visible(field, true);
            }
        }
        debug!(players = self.board.players_number(), "Programming phase started");
    }

    fn generate_random_command_card(&mut self) -> CommandCard {
        CommandCard::new(Command::random(&mut self.rng))
    }

    /// Locks in the programs. Registers are not validated; an empty
    /// register simply does nothing when resolved.
    pub fn finish_programming_phase(&mut self) {
        self.make_program_fields_invisible();
        self.make_program_fields_visible(0);
        self.board.set_phase(Phase::Activation);
        self.board.set_current_player(0);
        self.board.set_step(0);
        debug!("Activation phase started");
    }

    fn make_program_fields_visible(&mut self, register: usize) {
        if register < NO_REGISTERS {
            for player in 0..self.board.players_number() {
                self.board
                    .set_field_visible(FieldRef::program(player, register), true);
            }
        }
    }

    fn make_program_fields_invisible(&mut self) {
        for player in 0..self.board.players_number() {
            for register in 0..NO_REGISTERS {
                self.board
                    .set_field_visible(FieldRef::program(player, register), false);
            }
        }
    }

    /// Resolves registers until the activation phase is over.
    pub fn execute_programs(&mut self) {
        self.execute_programs_with(|_| ());
    }

    /// Like [`Self::execute_programs()`], but hands the board to
    /// `after_each` every time a player's register has been resolved.
    pub fn execute_programs_with<F: FnMut(&Board)>(&mut self, after_each: F) {
        self.board.set_step_mode(false);
        self.continue_programs(after_each);
    }

    /// Resolves the register of a single player.
    pub fn execute_step(&mut self) {
        self.board.set_step_mode(true);
        self.continue_programs(|_| ());
    }

    fn continue_programs<F: FnMut(&Board)>(&mut self, mut after_each: F) {
        while self.execute_next_step() {
            after_each(&self.board);
            if self.board.phase() != Phase::Activation || self.board.is_step_mode() {
                break;
            }
        }
    }

    // Resolves the current player's register for the current step and hands
    // the turn to the next player. Returns false if the board was not in a
    // state where anything could be resolved, which is a bug in the caller.
    fn execute_next_step(&mut self) -> bool {
        let phase = self.board.phase();
        let current = self.board.current_player_number();
        let step = self.board.step();
        debug_assert!(
            phase == Phase::Activation && current.is_some() && step < NO_REGISTERS,
            "Resolving a register requires the activation phase, a current player and a valid step"
        );
        let (Phase::Activation, Some(current)) = (phase, current) else {
            warn!(%phase, ?current, "Tried to resolve a register outside of the activation phase");
            return false;
        };
        if step >= NO_REGISTERS {
            warn!(step, "Tried to resolve a register that does not exist");
            return false;
        }

        let command = self
            .board
            .field(FieldRef::program(current, step))
            .and_then(CommandCardField::card)
            .map(|card| card.command);
        trace!(player = current, step, ?command, "Resolving register");
        if let Some(command) = command {
            self.execute_command(current, command);
        }

        let next = current + 1;
        if next < self.board.players_number() {
            self.board.set_current_player(next);
        } else {
            let step = step + 1;
            if step < NO_REGISTERS {
                self.make_program_fields_visible(step);
                self.board.set_step(step);
                self.board.set_current_player(0);
            } else {
                self.start_programming_phase();
            }
        }
        true
    }

    fn execute_command(&mut self, player: usize, command: Command) {
        match command {
            Command::Forward => {
                self.move_forward(player);
            }
            Command::Right => {
                self.turn_right(player);
            }
            Command::Left => {
                self.turn_left(player);
            }
            Command::FastForward => {
                self.fast_forward(player);
            }
        }
    }

    /// Moves the player one space along its heading, wrapping around the
    /// board. Players who are not on the board stay where they are.
    pub fn move_forward(&mut self, player: usize) -> bool {
        let Some((pos, heading)) = self
            .board
            .get_player(player)
            .and_then(|p| p.space().map(|pos| (pos, p.heading())))
        else {
            return false;
        };
        let Some(target) = self.board.get_neighbour(pos, heading).map(Space::position) else {
            return false;
        };
        self.board.set_player_space(player, Some(target))
    }

    /// Two forward moves, each one on its own.
    pub fn fast_forward(&mut self, player: usize) -> bool {
        let first = self.move_forward(player);
        let second = self.move_forward(player);
        first || second
    }

    pub fn turn_right(&mut self, player: usize) -> bool {
        match self.board.get_player(player).map(|p| p.heading().next()) {
            Some(heading) => self.board.set_player_heading(player, heading),
            None => false,
        }
    }

    pub fn turn_left(&mut self, player: usize) -> bool {
        match self.board.get_player(player).map(|p| p.heading().prev()) {
            Some(heading) => self.board.set_player_heading(player, heading),
            None => false,
        }
    }

    /// Moves the card in `source` to `target`. Fails, without touching
    /// either field, unless `source` holds a card and `target` is empty.
    pub fn move_cards(&mut self, source: FieldRef, target: FieldRef) -> bool {
        let source_card = self.board.field(source).and_then(CommandCardField::card);
        let target_is_empty = self
            .board
            .field(target)
            .map_or(false, |field| field.card().is_none());
        match source_card {
            Some(card) if target_is_empty => {
                self.board.set_field_card(target, Some(card));
                self.board.set_field_card(source, None);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;

    use super::*;
    use crate::{Heading, Player, Slot, Subject};

    const TEST_WIDTH: usize = 8;
    const TEST_HEIGHT: usize = 8;

    fn set_up() -> GameController {
        let mut board = Board::new(TEST_WIDTH, TEST_HEIGHT).unwrap();
        for i in 0..6 {
            let player = Player::new(&board, None, &format!("Player {}", i));
            board.add_player(player);
            board.set_player_space(i, Some(Position::new(i, i)));
            board.set_player_heading(i, Heading::ALL[i % Heading::ALL.len()]);
        }
        board.set_current_player(0);
        GameController::new(board, StdRng::seed_from_u64(42))
    }

    fn program(controller: &mut GameController, player: usize, commands: [Command; 5]) {
        for (register, command) in commands.into_iter().enumerate() {
            controller
                .board_mut()
                .set_field_card(FieldRef::program(player, register), Some(command.into()));
        }
    }

    fn position_of(controller: &GameController, player: usize) -> Option<Position> {
        controller.board().get_player(player).unwrap().space()
    }

    fn heading_of(controller: &GameController, player: usize) -> Heading {
        controller.board().get_player(player).unwrap().heading()
    }

    #[test]
    fn move_current_player_to_free_space() {
        let mut controller = set_up();
        assert!(controller.move_current_player_to_space(Position::new(0, 4)));

        let board = controller.board();
        assert_eq!(board.get_space(0, 4).unwrap().player(), Some(0));
        assert!(board.get_space(0, 0).unwrap().is_free());
        assert_eq!(board.current_player_number(), Some(1));
        assert_eq!(board.total_moves(), 1);
    }

    #[test]
    fn move_current_player_to_occupied_space_is_a_no_op() {
        let mut controller = set_up();
        assert!(!controller.move_current_player_to_space(Position::new(2, 2)));

        let board = controller.board();
        assert_eq!(board.get_space(2, 2).unwrap().player(), Some(2));
        assert_eq!(board.get_space(0, 0).unwrap().player(), Some(0));
        assert_eq!(board.current_player_number(), Some(0));
        assert_eq!(board.total_moves(), 0);
    }

    #[test]
    fn turn_order_wraps_after_last_player() {
        let mut controller = set_up();
        controller.board_mut().set_current_player(5);
        assert!(controller.move_current_player_to_space(Position::new(7, 0)));
        assert_eq!(controller.board().current_player_number(), Some(0));
    }

    #[test]
    fn move_forward() {
        let mut controller = set_up();
        assert!(controller.move_forward(0));
        assert_eq!(controller.board().get_space(0, 1).unwrap().player(), Some(0));
        assert_eq!(heading_of(&controller, 0), Heading::South);
        assert!(controller.board().get_space(0, 0).unwrap().is_free());
    }

    #[test]
    fn move_forward_wraps_around() {
        let mut controller = set_up();
        // Player 2 starts at (2, 2) facing north
        assert_eq!(heading_of(&controller, 2), Heading::North);
        controller.move_forward(2);
        controller.move_forward(2);
        controller.move_forward(2);
        assert_eq!(position_of(&controller, 2), Some(Position::new(2, 7)));
    }

    #[test]
    fn fast_forward() {
        let mut controller = set_up();
        assert!(controller.fast_forward(0));
        assert_eq!(controller.board().get_space(0, 2).unwrap().player(), Some(0));
        assert_eq!(heading_of(&controller, 0), Heading::South);
        assert!(controller.board().get_space(0, 0).unwrap().is_free());
    }

    #[test]
    fn turn_right_and_left() {
        let mut controller = set_up();
        controller.board_mut().set_player_heading(0, Heading::North);
        controller.turn_right(0);
        assert_eq!(heading_of(&controller, 0), Heading::East);
        controller.board_mut().set_player_heading(0, Heading::North);
        controller.turn_left(0);
        assert_eq!(heading_of(&controller, 0), Heading::West);
    }

    #[test]
    fn off_board_player_does_not_move() {
        let mut controller = set_up();
        controller.board_mut().set_player_space(0, None);
        assert!(!controller.move_forward(0));
        assert!(!controller.fast_forward(0));
        assert_eq!(position_of(&controller, 0), None);
    }

    #[test]
    fn moving_cards_requires_full_source_and_empty_target() {
        let mut controller = set_up();
        controller.start_programming_phase();
        let hand = FieldRef::hand(0, 3);
        let register = FieldRef::program(0, 0);
        let dealt = controller.board().field(hand).unwrap().card();
        assert!(dealt.is_some());

        assert!(controller.move_cards(hand, register));
        assert_eq!(controller.board().field(register).unwrap().card(), dealt);
        assert_eq!(controller.board().field(hand).unwrap().card(), None);

        // Source is empty now
        assert!(!controller.move_cards(hand, FieldRef::program(0, 1)));

        // Target already holds a card
        let other_hand = FieldRef::hand(0, 4);
        let other = controller.board().field(other_hand).unwrap().card();
        assert!(!controller.move_cards(other_hand, register));
        assert_eq!(controller.board().field(other_hand).unwrap().card(), other);
        assert_eq!(controller.board().field(register).unwrap().card(), dealt);

        // Fields that don't exist
        assert!(!controller.move_cards(other_hand, FieldRef::program(9, 0)));
        assert!(!controller.move_cards(FieldRef::hand(0, NO_CARDS), register));
    }

    #[test]
    fn start_programming_phase_clears_registers_and_deals_hands() {
        let mut controller = set_up();
        program(&mut controller, 0, [Command::Forward; 5]);
        controller
            .board_mut()
            .set_field_visible(FieldRef::program(1, 2), false);
        controller.board_mut().set_step(3);

        controller.start_programming_phase();

        let board = controller.board();
        assert_eq!(board.phase(), Phase::Programming);
        assert_eq!(board.current_player_number(), Some(0));
        assert_eq!(board.step(), 0);
        for player in board.players() {
            assert!(player
                .program()
                .iter()
                .all(|f| f.card().is_none() && f.is_visible()));
            assert!(player
                .cards()
                .iter()
                .all(|f| f.card().is_some() && f.is_visible()));
        }
    }

    #[test]
    fn dealing_is_deterministic_for_a_seed() {
        let hands = |seed| {
            let mut controller = set_up();
            controller.rng = StdRng::seed_from_u64(seed);
            controller.start_programming_phase();
            controller
                .board()
                .players()
                .iter()
                .flat_map(|p| p.cards().iter().map(|f| f.card()))
                .collect::<Vec<_>>()
        };
        assert_eq!(hands(3), hands(3));
    }

    #[test]
    fn finish_programming_phase_reveals_only_first_register() {
        let mut controller = set_up();
        let commands = [
            Command::FastForward,
            Command::Forward,
            Command::Forward,
            Command::Left,
            Command::Right,
        ];
        program(&mut controller, 0, commands);

        controller.finish_programming_phase();

        let board = controller.board();
        assert_eq!(board.phase(), Phase::Activation);
        assert_eq!(board.current_player_number(), Some(0));
        assert_eq!(board.step(), 0);
        for player in board.players() {
            for (register, field) in player.program().iter().enumerate() {
                assert_eq!(field.is_visible(), register == 0);
            }
        }
        let programmed: Vec<_> = board.players()[0]
            .program()
            .iter()
            .map(|f| f.card().map(|c| c.command))
            .collect();
        assert_eq!(programmed, commands.map(Some).to_vec());
    }

    #[test]
    fn execute_step_resolves_one_player_at_a_time() {
        let mut controller = set_up();
        program(&mut controller, 0, [Command::Forward; 5]);
        controller.finish_programming_phase();

        for i in 1..=5 {
            controller.execute_step();
            assert_eq!(controller.board().get_space(0, i).unwrap().player(), Some(0));
            assert_eq!(heading_of(&controller, 0), Heading::South);
            // Let every other player resolve their (empty) register
            for _ in 0..controller.board().players_number() - 1 {
                controller.execute_step();
            }
        }
        assert_eq!(controller.board().phase(), Phase::Programming);
    }

    #[test]
    fn execute_step_reveals_register_columns_as_it_goes() {
        let mut controller = set_up();
        controller.finish_programming_phase();
        for _ in 0..6 {
            controller.execute_step();
        }
        let board = controller.board();
        assert_eq!(board.step(), 1);
        assert_eq!(board.current_player_number(), Some(0));
        assert!(board.is_step_mode());
        for player in board.players() {
            let visible: Vec<bool> = player.program().iter().map(|f| f.is_visible()).collect();
            assert_eq!(visible, vec![true, true, false, false, false]);
        }
    }

    #[test]
    fn execute_programs_runs_every_register() {
        let mut controller = set_up();
        program(
            &mut controller,
            0,
            [
                Command::FastForward,
                Command::Forward,
                Command::Forward,
                Command::Left,
                Command::Right,
            ],
        );
        controller.finish_programming_phase();

        controller.execute_programs();

        let board = controller.board();
        assert_eq!(board.get_space(0, 4).unwrap().player(), Some(0));
        assert_eq!(heading_of(&controller, 0), Heading::South);
        assert!(!board.is_step_mode());
        assert_eq!(board.phase(), Phase::Programming);
        assert_eq!(board.step(), 0);
        // Moves by commands are not counted as moves to a chosen space
        assert_eq!(board.total_moves(), 0);
    }

    #[test]
    fn execute_programs_with_reports_every_resolved_register() {
        let mut controller = set_up();
        program(&mut controller, 0, [Command::Forward; 5]);
        controller.finish_programming_phase();

        let mut seen = Vec::new();
        controller.execute_programs_with(|board| {
            seen.push((board.step(), board.current_player_number(), board.phase()));
        });

        // Six players with five registers each
        assert_eq!(seen.len(), 30);
        assert_eq!(seen[0], (0, Some(1), Phase::Activation));
        assert_eq!(seen[5], (1, Some(0), Phase::Activation));
        assert_eq!(seen[29], (0, Some(0), Phase::Programming));
        assert_eq!(position_of(&controller, 0), Some(Position::new(0, 5)));
    }

    #[test]
    fn start_programming_phase_only_notifies_real_changes() {
        let mut controller = set_up();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        controller
            .board_mut()
            .subscribe(move |s| log_clone.borrow_mut().push(s));

        controller.start_programming_phase();

        let log = log.borrow();
        // Registers are already empty and visible, current player and step
        // are unchanged, so only the phase and the dealt cards notify
        assert_eq!(log[0], Subject::Board);
        assert_eq!(log.iter().filter(|&&s| s == Subject::Board).count(), 1);
        assert!(!log.iter().any(|s| matches!(
            s,
            Subject::Field(FieldRef {
                slot: Slot::Program(_),
                ..
            })
        )));
        let dealt = log
            .iter()
            .filter(|s| matches!(s, Subject::Field(FieldRef { slot: Slot::Hand(_), .. })))
            .count();
        assert_eq!(dealt, 6 * NO_CARDS);
        assert_eq!(log.len(), 1 + 6 * NO_CARDS);
    }

    #[test]
    fn empty_registers_resolve_as_no_ops() {
        let mut controller = set_up();
        controller.finish_programming_phase();
        controller.execute_programs();
        for i in 0..6 {
            assert_eq!(position_of(&controller, i), Some(Position::new(i, i)));
            assert_eq!(heading_of(&controller, i), Heading::ALL[i % 4]);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn executing_outside_of_activation_is_a_bug() {
        let mut controller = set_up();
        controller.execute_step();
    }
}
