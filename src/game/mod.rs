//! Core Connect Four game logic: a gravity board with last-move win detection,
//! the two players, and a turn driver with a terminal state machine.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, DEFAULT_COLS, DEFAULT_ROWS, WIN_LENGTH};
pub use player::Player;
pub use state::{Game, GameStatus, MoveOutcome};
