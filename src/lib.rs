//! # Connect Four
//!
//! A two-player Connect Four game on a board of any size. Pieces fall to the
//! lowest open cell of the chosen column; after each drop the lines through
//! that cell are scanned for four in a row.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, turn driver
//! - [`console`] — Line-oriented front end over any reader/writer
//! - [`ui`] — Terminal UI with a column selector
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod ui;
