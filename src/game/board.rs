use std::fmt;

use log::debug;

use super::player::Player;
use crate::config::DisplayConfig;
use crate::error::BoardError;

pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

/// Number of aligned markers needed to win.
pub const WIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Green,
}

impl Cell {
    /// The player occupying this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Green => Some(Player::Green),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A gravity board of fixed dimensions.
///
/// Row 0 is the top row; cells are addressed `(row, col)`. Pieces always land
/// on the lowest empty row of their column, so every column is filled
/// contiguously from the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    last_move: Option<(usize, usize)>,
}

impl Board {
    /// Create an empty board `width` columns wide and `height` rows tall
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self::empty(width, height))
    }

    fn empty(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
            last_move: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row `height - 1` is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Position of the most recent successful drop
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        !self.cells[0][col].is_empty()
    }

    /// Drop a marker in a column, returns the `(row, col)` where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<(usize, usize), BoardError> {
        if col >= self.width {
            return Err(BoardError::ColumnOutOfRange {
                column: col,
                width: self.width,
            });
        }

        let row = (0..self.height)
            .rev()
            .find(|&row| self.cells[row][col].is_empty())
            .ok_or(BoardError::ColumnFull { column: col })?;

        self.cells[row][col] = player.to_cell();
        self.last_move = Some((row, col));
        debug!(
            "{} dropped into column {col}, landed on row {row}",
            player.name()
        );
        Ok((row, col))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// Check whether the most recent drop completed four in a row.
    ///
    /// Only lines through the last placement are inspected; any other line was
    /// already present before this move. Returns `false` before the first drop.
    pub fn is_winning_move(&self) -> bool {
        let Some((row, col)) = self.last_move else {
            return false;
        };
        let cell = self.get(row, col);
        if cell.is_empty() {
            return false;
        }

        [
            self.row_sequence(row),
            self.column_sequence(col),
            self.slash_diagonal(row, col),
            self.backslash_diagonal(row, col),
        ]
        .iter()
        .any(|line| longest_run(line, cell) >= WIN_LENGTH)
    }

    /// Entire row, left to right
    fn row_sequence(&self, row: usize) -> Vec<Cell> {
        self.cells[row].clone()
    }

    /// Entire column, top to bottom
    fn column_sequence(&self, col: usize) -> Vec<Cell> {
        self.cells.iter().map(|line| line[col]).collect()
    }

    /// The `/` diagonal through `(row, col)`, top to bottom
    fn slash_diagonal(&self, row: usize, col: usize) -> Vec<Cell> {
        let offset = (col + row) as isize;
        self.diagonal(|h| offset - h)
    }

    /// The `\` diagonal through `(row, col)`, top to bottom
    fn backslash_diagonal(&self, row: usize, col: usize) -> Vec<Cell> {
        let offset = col as isize - row as isize;
        self.diagonal(|h| offset + h)
    }

    fn diagonal(&self, col_at: impl Fn(isize) -> isize) -> Vec<Cell> {
        (0..self.height)
            .filter_map(|h| {
                let w = col_at(h as isize);
                (0..self.width as isize)
                    .contains(&w)
                    .then(|| self.cells[h][w as usize])
            })
            .collect()
    }

    /// Render the board with the given characters: a header of column indices
    /// (modulo 10) followed by one line per row.
    pub fn render_with(&self, display: &DisplayConfig) -> String {
        let header: String = (0..self.width)
            .map(|col| char::from_digit((col % 10) as u32, 10).unwrap_or('?'))
            .collect();

        let rows = self.cells.iter().map(|line| {
            line.iter()
                .map(|&cell| display.cell_char(cell))
                .collect::<String>()
        });

        std::iter::once(header)
            .chain(rows)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&DisplayConfig::default()))
    }
}

/// Length of the longest run of `target` in `line`.
fn longest_run(line: &[Cell], target: Cell) -> usize {
    let mut best = 0;
    let mut current = 0;
    for &cell in line {
        if cell == target {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
