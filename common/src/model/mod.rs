mod board;
mod color;
mod game_state;
mod snake;
mod types;

pub use board::Board;
pub use color::Color;
pub use game_state::{Game, GameState};
pub use snake::Snake;
pub use types::{Coord, Direction};
