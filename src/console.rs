//! Line-oriented front end: prompts each player for a column on `input`,
//! prints the board to `output` after every accepted move.

use std::io::{BufRead, Write};

use crate::config::DisplayConfig;
use crate::error::{BoardError, ConsoleError, GameError};
use crate::game::{Game, GameStatus};

pub struct ConsoleGame<R, W> {
    game: Game,
    display: DisplayConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleGame<R, W> {
    pub fn new(game: Game, display: DisplayConfig, input: R, output: W) -> Self {
        ConsoleGame {
            game,
            display,
            input,
            output,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until someone wins or the board is full.
    pub fn run(&mut self) -> Result<GameStatus, ConsoleError> {
        self.print_board()?;

        while !self.game.is_over() {
            let column = self.prompt_column()?;
            match self.game.play(column) {
                Ok(_) => self.print_board()?,
                Err(GameError::Board(BoardError::ColumnFull { column })) => {
                    writeln!(self.output, "Column {column} is full")?;
                }
                Err(GameError::Board(BoardError::ColumnOutOfRange { .. })) => {
                    self.print_range_hint()?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let status = self.game.status();
        match status {
            GameStatus::Won(player) => {
                let marker = self.display.marker(player);
                writeln!(self.output, "\nPlayer {marker} wins!")?
            }
            GameStatus::Draw => writeln!(self.output, "Game over, no winner. Try again!")?,
            GameStatus::InProgress => {}
        }
        self.output.flush()?;
        Ok(status)
    }

    /// Ask the current player until a non-negative integer is entered.
    /// Range and fullness are left to the game.
    fn prompt_column(&mut self) -> Result<usize, ConsoleError> {
        loop {
            let marker = self.display.marker(self.game.current_player());
            let max = self.max_column();
            write!(self.output, "\nPlayer {marker} choose column (0-{max}): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConsoleError::InputClosed);
            }

            let entry = line.trim();
            match entry.parse::<i64>() {
                Ok(n) if n < 0 => self.print_range_hint()?,
                Ok(n) => return Ok(usize::try_from(n).unwrap_or(usize::MAX)),
                Err(_) if is_all_digits(entry) => self.print_range_hint()?,
                Err(_) => writeln!(self.output, "'{entry}' is not a column number")?,
            }
        }
    }

    fn print_board(&mut self) -> Result<(), ConsoleError> {
        let board = self.game.board().render_with(&self.display);
        writeln!(self.output, "{board}")?;
        Ok(())
    }

    fn print_range_hint(&mut self) -> Result<(), ConsoleError> {
        let max = self.max_column();
        writeln!(self.output, "Column must be between 0 and {max}")?;
        Ok(())
    }

    fn max_column(&self) -> usize {
        self.game.board().width() - 1
    }
}

/// Digits too large for `i64` are still a number, just out of range.
fn is_all_digits(entry: &str) -> bool {
    !entry.is_empty() && entry.bytes().all(|b| b.is_ascii_digit())
}
