mod config;
mod error;
mod game;
mod recording;
pub use config::*;
pub use error::*;
pub use game::*;
pub use recording::*;
