//! Board model and turn engine for a robot-racing programming game.
//!
//! Players fill [`NO_REGISTERS`] program registers with command cards; the
//! [`GameController`] then resolves one register per player per step on a
//! toroidal [`Board`].

pub use board::*;
pub use commands::*;
pub use controller::*;
pub use errors::*;
pub use fields::*;
pub use heading::*;
pub use observer::*;
pub use player::*;
pub use snapshot::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod commands;
mod controller;
mod errors;
mod fields;
mod heading;
mod observer;
mod player;
mod snapshot;
mod visualization;
