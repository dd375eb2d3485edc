use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use roborally::{
    visualize_board, BoardSnapshot, Command, CommandCardField, FieldRef, GameController, Phase,
    NO_CARDS,
};
use tracing::{debug, info, trace};

use crate::config::{Config, GameConfig, Resolution};

/// What a finished game looked like.
#[derive(Debug)]
pub struct GameSummary {
    pub rounds: usize,
    /// Number of change notifications the board sent while playing.
    pub notifications: usize,
    pub final_state: BoardSnapshot,
}

/// Plays `config.rounds` rounds of the game described by `game`.
///
/// Each round deals fresh hands, puts every player's configured program
/// into their registers and resolves them.
pub fn play_game(game: &GameConfig, config: &mut Config) -> anyhow::Result<GameSummary> {
    let board = game.build_board()?;
    let rng = StdRng::from_rng(&mut config.rng)?;
    let mut controller = GameController::new(board, rng);

    let notifications = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&notifications);
    let observer = controller
        .board_mut()
        .subscribe(move |_| counter.set(counter.get() + 1));

    for round in 0..config.rounds {
        // After the first round, the last register already started the next
        // programming phase
        if controller.board().phase() != Phase::Programming {
            controller.start_programming_phase();
        }
        for (player, player_config) in game.players.iter().enumerate() {
            install_program(&mut controller, player, &player_config.program);
        }
        controller.finish_programming_phase();
        debug!(round, status = %controller.board().status_message());

        match config.resolution {
            Resolution::Programs => {
                controller.execute_programs_with(|board| {
                    if let Some(recorder) = &mut config.recorder {
                        recorder.store_snapshot(round, board);
                    }
                });
            }
            Resolution::Steps => {
                while controller.board().phase() == Phase::Activation {
                    controller.execute_step();
                    trace!(round, status = %controller.board().status_message());
                    if let Some(recorder) = &mut config.recorder {
                        recorder.store_snapshot(round, controller.board());
                    }
                }
            }
        }

        info!(round, notifications = notifications.get(), "Round finished");
        if config.show_board {
            info!("\n{}", visualize_board(controller.board()));
        }
    }
    controller.board_mut().unsubscribe(observer);

    if let Some(recorder) = &mut config.recorder {
        let path = recorder.write_game_recording()?;
        debug!(path = %path.display(), "Wrote game recording");
    }

    Ok(GameSummary {
        rounds: config.rounds,
        notifications: notifications.get(),
        final_state: BoardSnapshot::from(controller.board()),
    })
}

// Fills the registers from the front. Cards are taken from the hand when it
// holds a matching one, otherwise a new card is put into the register.
fn install_program(controller: &mut GameController, player: usize, program: &[Command]) {
    for (register, &command) in program.iter().enumerate() {
        let target = FieldRef::program(player, register);
        let from_hand = (0..NO_CARDS)
            .map(|idx| FieldRef::hand(player, idx))
            .find(|&field| {
                controller
                    .board()
                    .field(field)
                    .and_then(CommandCardField::card)
                    .map(|card| card.command)
                    == Some(command)
            });
        match from_hand {
            Some(source) => {
                controller.move_cards(source, target);
            }
            None => {
                debug!(player, register, %command, "Command not in hand, adding a card");
                controller
                    .board_mut()
                    .set_field_card(target, Some(command.into()));
            }
        }
    }
}
