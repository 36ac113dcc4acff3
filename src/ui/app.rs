use crate::error::{BoardError, GameError};
use crate::game::{Board, Game, GameStatus};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game: Game,
    width: usize,
    height: usize,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game: Game) -> Self {
        let width = game.board().width();
        let height = game.board().height();
        App {
            game,
            width,
            height,
            selected_column: width / 2, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(std::time::Duration::from_millis(100))? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => {}
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right if self.selected_column + 1 < self.width => {
                self.selected_column += 1;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        match Board::new(self.width, self.height) {
            Ok(board) => {
                self.game = Game::new(board);
                self.selected_column = self.width / 2;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game.play(self.selected_column) {
            Ok(outcome) => {
                // Check if game just ended
                self.message = match outcome.status {
                    GameStatus::Won(player) => Some(format!("{} wins!", player.name())),
                    GameStatus::Draw => Some("It's a draw!".to_string()),
                    GameStatus::InProgress => None,
                };
            }
            Err(GameError::Board(BoardError::ColumnFull { .. })) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(GameError::Board(e)) => {
                self.message = Some(e.to_string());
            }
            Err(GameError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.selected_column, &self.message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Game::default())
    }
}
