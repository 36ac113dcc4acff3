use log::{debug, info};

use super::{Board, Player};
use crate::error::{BoardError, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Result of a single accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub player: Player,
    pub row: usize,
    pub column: usize,
    pub status: GameStatus,
}

/// Turn driver around a [`Board`]: alternates the two players, starting with
/// Red, and stops at the first win or when the board fills up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Player,
    status: GameStatus,
    moves_played: usize,
}

impl Game {
    /// Start a game on the given (normally empty) board
    pub fn new(board: Board) -> Self {
        Game {
            board,
            current_player: Player::Red, // Red starts
            status: GameStatus::InProgress,
            moves_played: 0,
        }
    }

    /// Start a game on an empty board of the given size
    pub fn with_size(width: usize, height: usize) -> Result<Self, BoardError> {
        Ok(Self::new(Board::new(width, height)?))
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }

        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's marker into `column`.
    ///
    /// A win is checked before a full board, so a winning move on the last
    /// empty cell ends the game as a win rather than a draw. The turn only
    /// passes to the other player while the game is still in progress.
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player;
        let (row, column) = self.board.drop_piece(column, player).map_err(|e| {
            debug!("{} move rejected: {e}", player.name());
            e
        })?;
        self.moves_played += 1;

        if self.board.is_winning_move() {
            self.status = GameStatus::Won(player);
            info!("{} wins after {} moves", player.name(), self.moves_played);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            info!("board full after {} moves, game drawn", self.moves_played);
        } else {
            self.current_player = player.other();
        }

        Ok(MoveOutcome {
            player,
            row,
            column,
            status: self.status,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// A recorded 7x6 game that fills the board without a winner.
    const DRAWN_GAME: [usize; 42] = [
        4, 3, 6, 0, 1, 4, 5, 5, 1, 1, 5, 0, 1, 6, 0, 1, 5, 5, 1, 0, 4, 6, 3, 2, 6, 6, 0, 4, 6,
        5, 2, 0, 4, 2, 4, 2, 2, 2, 3, 3, 3, 3,
    ];

    #[test]
    fn test_initial_state() {
        let game = Game::default();
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(!game.is_over());
        assert_eq!(game.legal_columns(), (0..7).collect::<Vec<_>>());
        assert_eq!(game.moves_played(), 0);
    }

    #[test]
    fn test_play_alternates_players() {
        let mut game = Game::default();
        let outcome = game.play(3).unwrap();

        assert_eq!(
            outcome,
            MoveOutcome {
                player: Player::Red,
                row: 5,
                column: 3,
                status: GameStatus::InProgress,
            }
        );
        assert_eq!(game.current_player(), Player::Green);
        assert_eq!(game.board().get(5, 3), Cell::Red);

        game.play(3).unwrap();
        assert_eq!(game.board().get(4, 3), Cell::Green);
        assert_eq!(game.current_player(), Player::Red);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut game = Game::with_size(7, 4).unwrap();
        for _ in 0..4 {
            game.play(3).unwrap();
        }
        let before = game.clone();

        assert_eq!(
            game.play(3),
            Err(GameError::Board(BoardError::ColumnFull { column: 3 }))
        );
        assert_eq!(
            game.play(7),
            Err(GameError::Board(BoardError::ColumnOutOfRange {
                column: 7,
                width: 7
            }))
        );
        assert_eq!(game, before);
        assert!(!game.legal_columns().contains(&3));
    }

    #[test]
    fn test_win_detection() {
        let mut game = Game::default();

        // Red wins with horizontal line
        for col in 0..4 {
            game.play(col).unwrap(); // Red
            if col < 3 {
                game.play(col).unwrap(); // Green (row above)
            }
        }

        assert!(game.is_over());
        assert_eq!(game.status(), GameStatus::Won(Player::Red));
        assert_eq!(game.current_player(), Player::Red);
        assert!(game.legal_columns().is_empty());
        assert_eq!(game.play(4), Err(GameError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut game = Game::default();
        for (i, &col) in DRAWN_GAME.iter().enumerate() {
            let outcome = game.play(col).unwrap();
            if i + 1 < DRAWN_GAME.len() {
                assert_eq!(outcome.status, GameStatus::InProgress);
            }
        }

        assert!(game.board().is_full());
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.moves_played(), 42);
        assert_eq!(game.play(0), Err(GameError::GameOver));
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_draw() {
        let mut game = Game::with_size(4, 4).unwrap();
        let moves = [1, 0, 3, 2, 2, 1, 0, 2, 0, 1, 0, 1, 2, 3, 3];
        for &col in &moves {
            assert_eq!(game.play(col).unwrap().status, GameStatus::InProgress);
        }

        let outcome = game.play(3).unwrap();
        assert!(game.board().is_full());
        assert_eq!(outcome.player, Player::Green);
        assert_eq!(outcome.status, GameStatus::Won(Player::Green));
    }
}
