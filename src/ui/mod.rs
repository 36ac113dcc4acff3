//! Terminal UI for playing Connect Four with a column selector.

mod app;
mod game_view;

pub use app::App;
